//! Pick results and the per-object picking record.

use std::any::Any;

use glam::{IVec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::rect::Rect;
use crate::spatial::ObjectId;

/// Outcome tier of the hit-test cascade for one object.
///
/// Tiers are ordered from weakest to strongest evidence of a hit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum PickResult {
    /// Not picked.
    #[default]
    NotPicked,
    /// The pick ray hit the bounding sphere.
    PickedSphere,
    /// The pick ray hit the world axis-aligned bounding box.
    PickedAABB,
    /// The pointer or picking box overlapped the projected on-screen box.
    PickedOnScreenBox,
    /// The pick ray hit one of the triangles of the oriented bounding box.
    PickedOBBTriangles,
    /// The pick pass confirmed the object's color under the pointer.
    PickedPixel,
}

impl PickResult {
    /// Returns true for any tier above [`PickResult::NotPicked`].
    #[must_use]
    pub fn is_picked(self) -> bool {
        self != PickResult::NotPicked
    }

    /// Returns a short display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            PickResult::NotPicked => "not picked",
            PickResult::PickedSphere => "sphere",
            PickResult::PickedAABB => "aabb",
            PickResult::PickedOnScreenBox => "on-screen box",
            PickResult::PickedOBBTriangles => "obb triangles",
            PickResult::PickedPixel => "pixel",
        }
    }
}

/// Picking state kept for one spatial object.
///
/// Records are owned by the engine's pool and reset rather than dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct PickingInfo {
    /// The object this record describes. Non-owning.
    pub object: Option<ObjectId>,
    /// Result of the last hit test.
    pub result: PickResult,
    /// World-space intersection point of the last hit test.
    pub intersection: Vec3,
    /// Rectangle the object's projected box covers on screen.
    pub on_screen: Rect,
    /// Center of the on-screen rectangle.
    pub center: IVec2,
    /// Radius of the on-screen circle around `center`.
    pub radius: i32,
    /// Seconds since engine construction when the selection state last
    /// changed, [`PickingInfo::UNSTAMPED`] if it never did.
    pub timestamp: f64,
    /// Whether the object is currently selected.
    pub selected: bool,
    /// Whether the picking box fully contains the on-screen rectangle.
    pub pick_box_contains: bool,
    /// Whether the picking box overlaps the on-screen rectangle.
    pub pick_box_overlaps: bool,
}

impl Default for PickingInfo {
    fn default() -> Self {
        Self {
            object: None,
            result: PickResult::NotPicked,
            intersection: Vec3::ZERO,
            on_screen: Rect::default(),
            center: IVec2::ZERO,
            radius: 0,
            timestamp: Self::UNSTAMPED,
            selected: false,
            pick_box_contains: false,
            pick_box_overlaps: false,
        }
    }
}

impl PickingInfo {
    /// Timestamp of a record whose selection never changed. Predates every
    /// pick gesture.
    pub const UNSTAMPED: f64 = -1.0;

    /// Creates a fresh record for an object.
    #[must_use]
    pub fn for_object(id: ObjectId) -> Self {
        Self {
            object: Some(id),
            ..Self::default()
        }
    }

    /// Resets every field to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Confirms hits against a color-coded pick image.
///
/// Implementations read from an already captured pixel buffer and must not
/// block on GPU readback inside the call.
pub trait PixelChecker: Any {
    /// Returns true if any pixel within `area` (pick space) carries the color
    /// encoding `color_code`.
    fn is_color_in_pixels(&self, color_code: u32, area: Rect) -> bool;

    /// Returns a reference to self as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Returns a mutable reference to self as `Any` for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_ordering() {
        assert!(PickResult::NotPicked < PickResult::PickedSphere);
        assert!(PickResult::PickedSphere < PickResult::PickedAABB);
        assert!(PickResult::PickedAABB < PickResult::PickedOnScreenBox);
        assert!(PickResult::PickedOnScreenBox < PickResult::PickedOBBTriangles);
        assert!(PickResult::PickedOBBTriangles < PickResult::PickedPixel);
        assert!(!PickResult::NotPicked.is_picked());
        assert!(PickResult::PickedPixel.is_picked());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut info = PickingInfo::for_object(ObjectId(5));
        info.selected = true;
        info.timestamp = 3.5;
        info.result = PickResult::PickedAABB;
        info.on_screen = Rect::new(1, 2, 3, 4);
        info.reset();
        assert_eq!(info, PickingInfo::default());
        assert!(info.object.is_none());
        assert!(info.timestamp < 0.0);
    }
}
