//! Mode flags of the pick-selection engine.

use bitflags::bitflags;

bitflags! {
    /// Independent on/off options of a pick-selection engine.
    ///
    /// The engine owns the only mutable copy and enforces the exclusions
    /// between flags in its setters.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ModeFlags: u16 {
        /// Selection happens only while the picker is active.
        const ON_CLICK            = 1 << 0;
        /// Selection follows the pointer without a click.
        const ON_HOVER            = 1 << 1;
        /// Require a ray hit on the world axis-aligned box.
        const CHECK_AABB          = 1 << 2;
        /// Require overlap with the projected on-screen box.
        const CHECK_ON_SCREEN_BOX = 1 << 3;
        /// Require a ray hit on the triangles of the oriented box.
        const CHECK_OBB_TRIANGLES = 1 << 4;
        /// Require confirmation from the pick pass pixels.
        const CHECK_FBO_PIXELS    = 1 << 5;
        /// Allow several objects to be selected at once.
        const GROUP_SELECTION     = 1 << 6;
        /// Picking a selected object again deselects it.
        const TOGGLE_SELECTION    = 1 << 7;
        /// Select with a dragged rectangle instead of a single point.
        const USE_PICKING_BOX     = 1 << 8;

        /// The pointer is down.
        const PICKER_ACTIVE       = 1 << 9;
        /// Inside a begin/end bracket.
        const BEGAN               = 1 << 10;
        /// Objects that miss this frame get deselected.
        const SHOULD_UNSELECT     = 1 << 11;
        /// Traversal should keep visiting objects.
        const SHOULD_CONTINUE     = 1 << 12;
    }
}

impl ModeFlags {
    /// Flags callers may configure.
    pub const PUBLIC: Self = Self::ON_CLICK
        .union(Self::ON_HOVER)
        .union(Self::CHECK_AABB)
        .union(Self::CHECK_ON_SCREEN_BOX)
        .union(Self::CHECK_OBB_TRIANGLES)
        .union(Self::CHECK_FBO_PIXELS)
        .union(Self::GROUP_SELECTION)
        .union(Self::TOGGLE_SELECTION)
        .union(Self::USE_PICKING_BOX);

    /// Per-frame bookkeeping owned by the engine.
    pub const INTERNAL: Self = Self::PICKER_ACTIVE
        .union(Self::BEGAN)
        .union(Self::SHOULD_UNSELECT)
        .union(Self::SHOULD_CONTINUE);
}

impl Default for ModeFlags {
    fn default() -> Self {
        Self::ON_CLICK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_on_click() {
        assert_eq!(ModeFlags::default(), ModeFlags::ON_CLICK);
    }

    #[test]
    fn test_public_and_internal_are_disjoint() {
        assert!(ModeFlags::PUBLIC.intersection(ModeFlags::INTERNAL).is_empty());
        assert_eq!(ModeFlags::PUBLIC.union(ModeFlags::INTERNAL), ModeFlags::all());
    }
}
