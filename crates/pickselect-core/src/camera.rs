//! Camera abstraction consumed by the picking engine.

use std::any::Any;

use glam::{Vec2, Vec3};

use crate::geometry::Ray;

/// What the picking engine needs from a camera.
///
/// Screen positions are in pick space: pixels with the origin in the
/// bottom-left corner of the viewport.
pub trait PickCamera: Any {
    /// Returns the world-space ray through a screen position, or `None` if
    /// the camera cannot produce one (degenerate viewport or matrices).
    fn pick_ray(&self, screen: Vec2) -> Option<Ray>;

    /// Projects a world-space point to screen space.
    ///
    /// `x` and `y` are pixels in pick space, `z` is the normalized depth.
    fn project(&self, world: Vec3) -> Vec3;

    /// Returns a reference to self as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Returns a mutable reference to self as `Any` for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
