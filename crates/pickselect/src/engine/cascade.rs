//! Per-object hit-test cascade.

use pickselect_core::{
    intersect_ray_box_triangles, IVec2, ModeFlags, PickCamera, PickError, PickResult, PickingInfo,
    PixelChecker, Ray, Rect, Result, SpatialObject, Vec2, Vec3,
};

use super::PickSelection;

/// Everything the cascade reads from the engine for one frame.
struct Frame<'a> {
    flags: ModeFlags,
    camera: &'a dyn PickCamera,
    checker: Option<&'a dyn PixelChecker>,
    ray: Option<Ray>,
    pick_box: Rect,
    pointer: Rect,
    good: PickResult,
}

impl PickSelection {
    /// Computes the weakest result that counts as a hit under the enabled
    /// checks. Each enabled check raises the bar above the sphere baseline.
    pub(super) fn good_pick_threshold(&self) -> PickResult {
        let mut good = PickResult::PickedSphere;
        if self.flags.contains(ModeFlags::CHECK_AABB) {
            good = PickResult::PickedAABB;
        }
        if self.flags.contains(ModeFlags::CHECK_ON_SCREEN_BOX) {
            good = PickResult::PickedOnScreenBox;
        }
        if self.flags.contains(ModeFlags::CHECK_OBB_TRIANGLES) {
            good = PickResult::PickedOBBTriangles;
        }
        if self.pixel_check_active() {
            good = PickResult::PickedPixel;
        } else if self.flags.contains(ModeFlags::CHECK_FBO_PIXELS) {
            log::debug!("pixel checks enabled without a pixel checker, skipping them");
        }
        good
    }

    /// Runs the hit-test cascade for one object and stores the outcome in
    /// its picking record.
    ///
    /// Fails with [`PickError::MissingCamera`] when no camera is attached.
    pub fn evaluate(&mut self, object: &dyn SpatialObject) -> Result<PickResult> {
        let camera = self.camera.as_deref().ok_or(PickError::MissingCamera)?;
        let checker = if self.pixel_check_active() {
            self.pixel_checker.as_deref()
        } else {
            None
        };
        let frame = Frame {
            flags: self.flags,
            camera,
            checker,
            ray: self
                .ray
                .or_else(|| camera.pick_ray(self.pick_pos.as_vec2())),
            pick_box: self.pick_box,
            pointer: Rect::pixel(self.pick_pos.x, self.pick_pos.y),
            good: self.good_pick_result,
        };

        let info = self.pool.obtain(object.id());
        let result = frame.run(object, info);
        log::trace!("{} evaluated as {}", object.id(), result.name());
        Ok(result)
    }
}

impl Frame<'_> {
    fn run(&self, object: &dyn SpatialObject, info: &mut PickingInfo) -> PickResult {
        info.result = PickResult::NotPicked;
        info.pick_box_overlaps = false;
        info.pick_box_contains = false;

        let transform = object.transform();
        let mut corners = None;

        if let Some(ray) = &self.ray {
            if let Some(hit) = object.bounding_sphere().intersect_ray(ray) {
                info.intersection = hit;
                info.result = PickResult::PickedSphere;

                if self.flags.contains(ModeFlags::CHECK_AABB) {
                    if let Some(hit) = object.bounding_box().intersect_ray(ray) {
                        info.intersection = hit;
                        info.result = PickResult::PickedAABB;
                    }
                }

                if self.flags.contains(ModeFlags::CHECK_OBB_TRIANGLES) {
                    let world = object.original_bounding_box().transformed_corners(&transform);
                    if let Some(hit) = intersect_ray_box_triangles(ray, &world) {
                        info.intersection = hit;
                        info.result = PickResult::PickedOBBTriangles;
                    }
                    corners = Some(world);
                }
            }
        }

        let drag_box = self.flags.contains(ModeFlags::ON_CLICK)
            && self.flags.contains(ModeFlags::USE_PICKING_BOX);

        if drag_box || self.flags.contains(ModeFlags::CHECK_ON_SCREEN_BOX) {
            let corners = corners
                .unwrap_or_else(|| object.original_bounding_box().transformed_corners(&transform));
            let target = if drag_box { self.pick_box } else { self.pointer };
            if self.project_on_screen(&corners, info) {
                info.pick_box_overlaps = target.overlaps(&info.on_screen);
                info.pick_box_contains = target.contains(&info.on_screen);
            }

            if info.pick_box_overlaps || info.pick_box_contains {
                match self.checker {
                    None if drag_box => info.result = self.good,
                    None => info.result = info.result.max(PickResult::PickedOnScreenBox),
                    Some(checker) => {
                        let area = target.intersection(&info.on_screen);
                        if checker.is_color_in_pixels(object.id().get(), area) {
                            info.result = self.good;
                        }
                    }
                }
            }
        } else if let Some(checker) = self.checker {
            if checker.is_color_in_pixels(object.id().get(), self.pointer) {
                info.result = self.good;
            }
        }

        info.result
    }

    /// Projects world-space box corners and records the enclosing screen
    /// rectangle, its center and radius.
    ///
    /// Corners without a projection (behind the camera) are left out.
    /// Returns false, with an empty rectangle recorded, if no corner projects.
    fn project_on_screen(&self, corners: &[Vec3; 8], info: &mut PickingInfo) -> bool {
        let mut min = Vec2::splat(f32::INFINITY);
        let mut max = Vec2::splat(f32::NEG_INFINITY);
        let mut projected = false;
        for &corner in corners {
            let screen = self.camera.project(corner).truncate();
            if !screen.is_finite() {
                continue;
            }
            min = min.min(screen);
            max = max.max(screen);
            projected = true;
        }
        if !projected {
            info.on_screen = Rect::default();
            info.center = IVec2::ZERO;
            info.radius = 0;
            return false;
        }
        info.on_screen = Rect::enclosing(min, max);
        info.center = info.on_screen.center();
        info.radius = info.on_screen.width.max(info.on_screen.height) / 2;
        true
    }
}
