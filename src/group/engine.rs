//! The cel group and its operations

use tracing::{debug, error, warn};

use super::pending::{PendingTransforms, Transform};
use super::transform::{CornerTransform, RotationBasis, StretchBasis};
use crate::cel::{link_cel, project_cel, quad_map, CelArena, CelId};
use crate::error::{CelGroupError, Result};
use crate::fixed::ANGLE_UNITS;
use crate::geometry::{Point, Quad};

/// Minimum number of member slots in a group
pub const MIN_MEMBERS: usize = 2;

/// One slot of a group: where the cel sits in the group frame and which
/// cel it is. `cel` is `None` until the slot is configured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupMember {
    /// Offset from the group position, pixels
    pub offset: Point,
    pub cel: Option<CelId>,
}

/// One entry of a bulk configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberConfig {
    pub index: usize,
    pub cel: CelId,
    pub x: i32,
    pub y: i32,
}

impl MemberConfig {
    pub fn new(index: usize, cel: CelId, x: i32, y: i32) -> Self {
        Self { index, cel, x, y }
    }
}

/// A fixed-size group of cels sharing one position, stretch and rotation.
///
/// The group never owns its cels: members refer into the caller's
/// `CelArena`, and only `configure_member` and `update` write to them.
/// All member cels are linked in index order, so drawing the chain from
/// `primary()` draws the whole group.
#[derive(Debug, Clone)]
pub struct CelGroup {
    /// Group origin on screen, pixels
    position: Point,
    /// Nominal frame, pixels; the undistorted rectangle for stretching
    size: Point,
    /// Stretch target, group-local pixels
    stretching: Quad,
    /// 256 units per turn, always < 256
    rotation_angle: u32,
    /// Absolute screen pixels
    rotation_pivot: Point,
    pending: PendingTransforms,
    members: Vec<GroupMember>,
    primary: Option<CelId>,
}

impl CelGroup {
    /// Create a group at `position` with a `size` frame and `count` member
    /// slots. Size is clamped to at least 1x1, count to at least 2.
    pub fn new(position: Point, size: Point, count: usize) -> Result<Self> {
        let size = Point::new(size.x.max(1), size.y.max(1));
        let count = count.max(MIN_MEMBERS);

        let mut members = Vec::new();
        members.try_reserve_exact(count).map_err(|e| {
            error!(count, "failed to allocate group members");
            CelGroupError::from(e)
        })?;
        members.resize(count, GroupMember::default());

        debug!(?position, ?size, count, "created cel group");

        Ok(Self {
            position,
            size,
            stretching: Quad::from_rect(Point::ZERO, size.x, size.y),
            rotation_angle: 0,
            rotation_pivot: Point::ZERO,
            pending: PendingTransforms::new(),
            members,
            primary: None,
        })
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Point {
        self.size
    }

    /// Current stretch quad, group-local pixels
    pub fn stretching(&self) -> Quad {
        self.stretching
    }

    pub fn rotation_angle(&self) -> u32 {
        self.rotation_angle
    }

    pub fn rotation_pivot(&self) -> Point {
        self.rotation_pivot
    }

    pub fn pending(&self) -> PendingTransforms {
        self.pending
    }

    /// Number of member slots
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false: a group has at least two slots
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[GroupMember] {
        &self.members
    }

    pub fn member(&self, index: usize) -> Option<&GroupMember> {
        self.members.get(index)
    }

    /// Cel of slot 0: the head of the group's render chain
    pub fn primary(&self) -> Option<CelId> {
        self.primary
    }

    /// Cel of the last configured slot, to continue a render chain from
    pub fn last(&self) -> Option<CelId> {
        self.members.iter().rev().find_map(|m| m.cel)
    }

    fn clamp_index(&self, index: usize) -> usize {
        let last = self.members.len() - 1;
        if index > last {
            warn!(index, last, "member index out of bounds, clamped to last slot");
            last
        } else {
            index
        }
    }

    /// Put `cel` in slot `index` at offset (`x`, `y`) and project it right
    /// away, unstretched and unrotated, at the current group position.
    ///
    /// An out-of-range index is clamped to the last slot; the slot actually
    /// used is returned. The cel is linked after the previous slot's cel
    /// (or becomes the primary for slot 0) and before the next slot's cel
    /// if that one is already configured.
    pub fn configure_member(
        &mut self,
        arena: &mut CelArena,
        index: usize,
        cel: CelId,
        x: i32,
        y: i32,
    ) -> Result<usize> {
        if !arena.contains_key(cel) {
            error!(?cel, index, "cannot configure group member with unknown cel");
            return Err(CelGroupError::UnknownCel(cel));
        }

        let index = self.clamp_index(index);
        let prev = index.checked_sub(1).and_then(|i| self.members[i].cel);
        let next = self.members.get(index + 1).and_then(|m| m.cel);

        // Neighbours must still exist before the slot is touched
        for neighbour in [prev, next].into_iter().flatten() {
            if !arena.contains_key(neighbour) {
                error!(?neighbour, index, "neighbouring group member cel is not in the arena");
                return Err(CelGroupError::UnknownCel(neighbour));
            }
        }

        self.members[index] = GroupMember {
            offset: Point::new(x, y),
            cel: Some(cel),
        };

        if index == 0 {
            self.primary = Some(cel);
        }
        if let Some(prev) = prev {
            link_cel(arena, prev, cel)?;
        }
        if let Some(next) = next {
            link_cel(arena, cel, next)?;
        }

        self.project_axis_aligned(arena, index)?;

        debug!(index, ?cel, x, y, "configured group member");
        Ok(index)
    }

    /// Configure several members in order. Stops at the first failure;
    /// members configured before it stay configured.
    pub fn configure_members(&mut self, arena: &mut CelArena, configs: &[MemberConfig]) -> Result<()> {
        for config in configs {
            if let Err(e) = self.configure_member(arena, config.index, config.cel, config.x, config.y) {
                error!(index = config.index, "bulk member configuration failed: {}", e);
                return Err(e);
            }
        }
        Ok(())
    }

    /// Move the group relative to its current position
    pub fn move_by(&mut self, dx: i32, dy: i32) {
        let position = self.position + Point::new(dx, dy);
        self.set_position(position.x, position.y);
    }

    /// Move the group to an absolute position
    pub fn set_position(&mut self, x: i32, y: i32) {
        self.position = Point::new(x, y);
        self.pending.insert(Transform::Move);
    }

    /// Move one member relative to its current offset
    pub fn move_member(&mut self, index: usize, dx: i32, dy: i32) {
        let index = self.clamp_index(index);
        let offset = self.members[index].offset + Point::new(dx, dy);
        self.set_member_position(index, offset.x, offset.y);
    }

    /// Set one member's offset inside the group frame
    pub fn set_member_position(&mut self, index: usize, x: i32, y: i32) {
        let index = self.clamp_index(index);
        self.members[index].offset = Point::new(x, y);
        self.pending.insert(Transform::Move);
    }

    /// Stretch the group frame onto four absolute screen corners
    /// (top-left, top-right, bottom-right, bottom-left)
    pub fn stretch(&mut self, p0: Point, p1: Point, p2: Point, p3: Point) {
        self.stretching = Quad::new(
            p0 - self.position,
            p1 - self.position,
            p2 - self.position,
            p3 - self.position,
        );
        self.pending.insert(Transform::Stretch);
    }

    /// Stretch with a quad in absolute screen corners
    pub fn stretch_to(&mut self, quad: &Quad) {
        self.stretch(quad.top_left, quad.top_right, quad.bottom_right, quad.bottom_left);
    }

    /// Rotate by `angle` (256 units per turn) about an absolute screen pivot
    pub fn rotate(&mut self, angle: u32, pivot_x: i32, pivot_y: i32) {
        self.rotation_angle = angle % ANGLE_UNITS;
        self.rotation_pivot = Point::new(pivot_x, pivot_y);
        self.pending.insert(Transform::Rotate);
    }

    /// Apply every pending transformation to the member cels.
    ///
    /// A pure move re-projects each member axis-aligned and clears Move.
    /// Any stretch or rotation runs the full corner pass, which also
    /// applies the current position, and clears all three kinds.
    ///
    /// A member whose cel left the arena is reported after the remaining
    /// members have been processed.
    pub fn update(&mut self, arena: &mut CelArena) -> Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }

        if self.pending.needs_full_pass() {
            let result = self.update_transformations(arena);
            self.pending.clear();
            return result;
        }

        let mut result = Ok(());
        for index in 0..self.members.len() {
            if let Err(e) = self.project_axis_aligned(arena, index) {
                result = result.and(Err(e));
            }
        }
        self.pending.remove(Transform::Move);

        debug!(position = ?self.position, "group moved");
        result
    }

    /// Project one member as an unstretched, unrotated rectangle
    fn project_axis_aligned(&self, arena: &mut CelArena, index: usize) -> Result<()> {
        let member = self.members[index];
        let Some(id) = member.cel else {
            debug!(index, "skipping unconfigured group member");
            return Ok(());
        };
        let Some(cel) = arena.get(id) else {
            error!(index, ?id, "group member cel is not in the arena");
            return Err(CelGroupError::UnknownCel(id));
        };
        let quad = Quad::from_rect(self.position + member.offset, cel.width(), cel.height()).to_f16();
        project_cel(arena, id, &quad)
    }

    fn update_transformations(&self, arena: &mut CelArena) -> Result<()> {
        let do_stretch = self.pending.contains(Transform::Stretch);
        let do_rotate = self.pending.contains(Transform::Rotate);

        let transform = CornerTransform {
            stretch: do_stretch.then(|| StretchBasis::new(self.size, &self.stretching)),
            rotation: do_rotate
                .then(|| RotationBasis::new(self.rotation_angle, self.rotation_pivot, self.position)),
            translation: self.position.to_f16(),
        };

        let mut result = Ok(());
        let mut quad = Quad::default();

        for (index, member) in self.members.iter().enumerate() {
            let Some(id) = member.cel else {
                debug!(index, "skipping unconfigured group member");
                continue;
            };
            let Some(cel) = arena.get_mut(id) else {
                error!(index, ?id, "group member cel is not in the arena");
                result = result.and(Err(CelGroupError::UnknownCel(id)));
                continue;
            };

            transform.map_rect(member.offset, cel.width(), cel.height(), &mut quad);
            quad_map(cel, &quad);
        }

        debug!(
            stretch = do_stretch,
            rotate = do_rotate,
            angle = self.rotation_angle,
            "group transformations applied"
        );
        result
    }

    /// Release the group. The member cels stay in the arena; their ids are
    /// handed back so the caller can dispose of them.
    pub fn destroy(self) -> Vec<CelId> {
        debug!(members = self.members.len(), "destroyed cel group");
        self.members.into_iter().filter_map(|m| m.cel).collect()
    }
}
