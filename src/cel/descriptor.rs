//! Cel descriptor, flags and render chain links

use bitflags::bitflags;
use slotmap::{new_key_type, SlotMap};
use tracing::error;

use crate::error::{CelGroupError, Result};
use crate::fixed::{ONE_F16, ONE_F20};
use crate::geometry::Point;

new_key_type! {
    /// Handle to a cel stored in a `CelArena`
    pub struct CelId;
}

/// Caller-owned storage for cels. Groups refer into it by `CelId`.
pub type CelArena = SlotMap<CelId, Cel>;

bitflags! {
    /// Renderer state reload requests
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct CelFlags: u32 {
        /// Reload the step values
        const LOAD_SIZE = 1 << 0;
        /// Reload the cross (perspective) steps
        const LOAD_PERSPECTIVE = 1 << 1;
        /// Everything a projection write invalidates
        const RELOAD = Self::LOAD_SIZE.bits() | Self::LOAD_PERSPECTIVE.bits();
    }
}

/// A cel descriptor.
///
/// Width and height are fixed when the cel is created; everything else is
/// rewritten by projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cel {
    width: i32,
    height: i32,
    /// Horizontal step per source pixel, 12.20
    pub hdx: i32,
    pub hdy: i32,
    /// Vertical step per source row, 16.16
    pub vdx: i32,
    pub vdy: i32,
    /// Change of the horizontal step per row, 12.20
    pub hddx: i32,
    pub hddy: i32,
    /// Screen origin, 16.16
    pub x_pos: i32,
    pub y_pos: i32,
    pub flags: CelFlags,
    next: Option<CelId>,
}

impl Cel {
    /// Unscaled cel at the screen origin. Negative sizes are treated as zero.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: width.max(0),
            height: height.max(0),
            hdx: ONE_F20,
            hdy: 0,
            vdx: 0,
            vdy: ONE_F16,
            hddx: 0,
            hddy: 0,
            x_pos: 0,
            y_pos: 0,
            flags: CelFlags::empty(),
            next: None,
        }
    }

    /// Declared width in pixels
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Declared height in pixels
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Origin in 16.16
    pub fn origin(&self) -> Point {
        Point::new(self.x_pos, self.y_pos)
    }

    /// Next cel in the render chain
    pub fn next(&self) -> Option<CelId> {
        self.next
    }
}

/// Make `next` the cel drawn after `prev`
pub fn link_cel(arena: &mut CelArena, prev: CelId, next: CelId) -> Result<()> {
    if !arena.contains_key(next) {
        error!(?next, "cannot link to unknown cel");
        return Err(CelGroupError::UnknownCel(next));
    }
    match arena.get_mut(prev) {
        Some(cel) => {
            cel.next = Some(next);
            Ok(())
        }
        None => {
            error!(?prev, "cannot link from unknown cel");
            Err(CelGroupError::UnknownCel(prev))
        }
    }
}

/// Walks a render chain starting at a cel
pub struct Chain<'a> {
    arena: &'a CelArena,
    current: Option<CelId>,
    remaining: usize,
}

impl<'a> Iterator for Chain<'a> {
    type Item = (CelId, &'a Cel);

    fn next(&mut self) -> Option<Self::Item> {
        // A chain can't be longer than the arena; anything past that is a loop.
        if self.remaining == 0 {
            return None;
        }
        let id = self.current?;
        let cel = self.arena.get(id)?;
        self.remaining -= 1;
        self.current = cel.next;
        Some((id, cel))
    }
}

/// Iterate the cels linked from `first`, in draw order
pub fn chain(arena: &CelArena, first: CelId) -> Chain<'_> {
    Chain {
        arena,
        current: Some(first),
        remaining: arena.len(),
    }
}
