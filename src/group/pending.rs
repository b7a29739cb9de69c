//! Pending transformation kinds recorded between updates

use bitflags::bitflags;

/// A kind of group transformation waiting for `CelGroup::update`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transform {
    Move,
    Stretch,
    Rotate,
}

bitflags! {
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    struct TransformBits: u8 {
        const MOVE = 1 << 0;
        const STRETCH = 1 << 1;
        const ROTATE = 1 << 2;
    }
}

impl Transform {
    fn bits(self) -> TransformBits {
        match self {
            Transform::Move => TransformBits::MOVE,
            Transform::Stretch => TransformBits::STRETCH,
            Transform::Rotate => TransformBits::ROTATE,
        }
    }
}

/// Set of pending transformation kinds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingTransforms {
    bits: TransformBits,
}

impl PendingTransforms {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: Transform) {
        self.bits.insert(kind.bits());
    }

    pub fn remove(&mut self, kind: Transform) {
        self.bits.remove(kind.bits());
    }

    pub fn contains(&self, kind: Transform) -> bool {
        self.bits.contains(kind.bits())
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn clear(&mut self) {
        self.bits = TransformBits::empty();
    }

    /// Stretch or rotate pending: the update needs the full corner pass
    pub fn needs_full_pass(&self) -> bool {
        self.bits.intersects(TransformBits::STRETCH | TransformBits::ROTATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_remove() {
        let mut pending = PendingTransforms::new();
        assert!(pending.is_empty());
        pending.insert(Transform::Move);
        pending.insert(Transform::Rotate);
        pending.insert(Transform::Move);
        assert!(pending.contains(Transform::Move));
        assert!(!pending.contains(Transform::Stretch));
        assert!(pending.contains(Transform::Rotate));

        pending.remove(Transform::Move);
        assert!(!pending.contains(Transform::Move));
        assert!(pending.needs_full_pass());

        pending.clear();
        assert!(pending.is_empty());
    }

    #[test]
    fn test_move_alone_is_not_full_pass() {
        let mut pending = PendingTransforms::new();
        pending.insert(Transform::Move);
        assert!(!pending.needs_full_pass());
        pending.insert(Transform::Stretch);
        assert!(pending.needs_full_pass());
    }
}
