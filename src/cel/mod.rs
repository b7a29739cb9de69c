//! Cel descriptors and quad projection
//!
//! A cel is the hardware-ready description of one bitmap sprite:
//! declared size, step values the rasterizer walks, origin and flags.
//! Cels live in a caller-owned arena and are linked into render chains.

mod descriptor;
mod quad_map;
mod scale;

pub use descriptor::*;
pub use quad_map::*;
