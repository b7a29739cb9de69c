//! celgroup: fixed-point cel group engine
//!
//! Moves, stretches and rotates a group of bitmap cels as one unit while
//! every member keeps its own hardware-style descriptor:
//! - Quad projection: four screen corners to cel step values
//! - Bilinear stretch of the group frame onto any quad
//! - Rotation about an arbitrary screen pivot, 256 units per turn
//! - Lazy updates: transformation calls record intent, `update` applies it
//!
//! ```
//! use celgroup::{Cel, CelArena, CelGroup, MemberConfig, Point, projection};
//!
//! let mut arena = CelArena::with_key();
//! let body = arena.insert(Cel::new(16, 16));
//! let head = arena.insert(Cel::new(8, 8));
//!
//! let mut group = CelGroup::new(Point::new(10, 10), Point::new(20, 30), 2)?;
//! group.configure_members(&mut arena, &[
//!     MemberConfig::new(0, body, 0, 0),
//!     MemberConfig::new(1, head, 4, -8),
//! ])?;
//!
//! group.move_by(5, 0);
//! group.rotate(64, 20, 20);
//! group.update(&mut arena)?;
//!
//! let footprint = projection(&arena[body]);
//! assert_eq!(footprint.width(), 16);
//! # Ok::<(), celgroup::CelGroupError>(())
//! ```

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cel;
pub mod error;
pub mod fixed;
pub mod geometry;
pub mod group;
pub mod layout;
pub mod raster;

pub use cel::{chain, link_cel, projected_quad, projection, quad_map, Cel, CelArena, CelFlags, CelId};
pub use error::{CelGroupError, LayoutError, Result};
pub use geometry::{Corner, Point, Quad, Rectangle};
pub use group::{CelGroup, GroupMember, MemberConfig, PendingTransforms, Transform};
pub use layout::{load_layout, load_layout_from_str, save_layout, GroupLayout, MemberLayout};
