//! Cel groups: several cels moved, stretched and rotated as one unit
//!
//! Transformation calls only record intent; `CelGroup::update` applies
//! everything pending in one pass over the members.

mod engine;
mod pending;
mod transform;

pub use engine::*;
pub use pending::*;
