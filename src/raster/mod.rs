//! Preview rasterizer for cel chains
//!
//! Not the production renderer: it walks cel descriptors with floats and
//! forward-maps every texel, which is enough to eyeball what a group's
//! step values will look like on screen.

mod bitmap;
mod framebuffer;
mod render;

pub use bitmap::*;
pub use framebuffer::*;
pub use render::*;

/// Preview screen size
pub const WIDTH: usize = 320;
pub const HEIGHT: usize = 240;
