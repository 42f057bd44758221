//! Camera and view management.

use std::any::Any;

use glam::{Mat4, Vec2, Vec3, Vec4};
use pickselect_core::{BoundingBox, PickCamera, Ray};

/// Camera projection mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionMode {
    /// Perspective projection.
    #[default]
    Perspective,
    /// Orthographic projection.
    Orthographic,
}

/// A 3D camera looking at the scene through a pixel viewport.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Up vector.
    pub up: Vec3,
    /// Field of view in radians.
    pub fov: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Projection mode.
    pub projection_mode: ProjectionMode,
    /// Orthographic half height (used when `projection_mode` is Orthographic).
    pub ortho_scale: f32,
    viewport: (u32, u32),
}

impl Camera {
    /// Creates a new camera for a viewport of the given pixel size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 3.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov: std::f32::consts::FRAC_PI_4, // 45 degrees
            near: 0.01,
            far: 1000.0,
            projection_mode: ProjectionMode::Perspective,
            ortho_scale: 1.0,
            viewport: (width, height),
        }
    }

    /// Sets the viewport size in pixels.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }

    /// Returns the viewport size in pixels.
    #[must_use]
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Returns the aspect ratio (width / height), 1 for a degenerate viewport.
    #[must_use]
    pub fn aspect_ratio(&self) -> f32 {
        let (width, height) = self.viewport;
        if width == 0 || height == 0 {
            1.0
        } else {
            width as f32 / height as f32
        }
    }

    /// Returns the view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Returns the projection matrix.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        match self.projection_mode {
            ProjectionMode::Perspective => {
                Mat4::perspective_rh(self.fov, self.aspect_ratio(), self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                let half_height = self.ortho_scale;
                let half_width = half_height * self.aspect_ratio();
                Mat4::orthographic_rh(
                    -half_width,
                    half_width,
                    -half_height,
                    half_height,
                    self.near,
                    self.far,
                )
            }
        }
    }

    /// Returns the combined view-projection matrix.
    #[must_use]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Moves the camera back along its current view direction until `bounds`
    /// fits the vertical field of view, looking at its center.
    ///
    /// Clip planes and the orthographic scale follow the box size.
    pub fn frame(&mut self, bounds: &BoundingBox) {
        if !bounds.is_valid() {
            return;
        }
        let center = bounds.center();
        let radius = bounds.half_extents().length().max(1e-3);
        let back = (self.position - self.target).try_normalize().unwrap_or(Vec3::Z);
        let distance = radius / (self.fov * 0.5).sin();

        self.target = center;
        self.position = center + back * distance;
        self.near = (distance - radius).max(radius * 0.01);
        self.far = distance + radius * 4.0;
        self.ortho_scale = radius;
    }

    /// Sets the field of view in radians.
    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov.clamp(0.1, std::f32::consts::PI - 0.1);
    }

    /// Returns the ray through a pick-space pixel (origin bottom-left).
    #[must_use]
    pub fn screen_ray(&self, screen: Vec2) -> Option<Ray> {
        let (width, height) = self.viewport;
        if width == 0 || height == 0 {
            return None;
        }

        let ndc_x = screen.x / width as f32 * 2.0 - 1.0;
        let ndc_y = screen.y / height as f32 * 2.0 - 1.0;

        let inv_view_proj = self.view_projection_matrix().inverse();

        // wgpu-style NDC depth [0, 1]
        let near = inv_view_proj * Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
        let far = inv_view_proj * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);

        if near.w.abs() < 1e-6 || far.w.abs() < 1e-6 {
            return None;
        }

        let origin = near.truncate() / near.w;
        let direction = (far.truncate() / far.w - origin).normalize_or_zero();
        if direction.length_squared() < 1e-12 {
            return None;
        }

        Some(Ray { origin, direction })
    }

    /// Projects a world point to pick space. `z` holds the NDC depth.
    ///
    /// Points on or behind the camera plane have no projection and come
    /// back as NaN.
    #[must_use]
    pub fn world_to_screen(&self, world: Vec3) -> Vec3 {
        let (width, height) = self.viewport;
        let clip = self.view_projection_matrix() * world.extend(1.0);
        if clip.w < 1e-6 {
            return Vec3::NAN;
        }
        let ndc = clip.truncate() / clip.w;
        Vec3::new(
            (ndc.x + 1.0) * 0.5 * width as f32,
            (ndc.y + 1.0) * 0.5 * height as f32,
            ndc.z,
        )
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

impl PickCamera for Camera {
    fn pick_ray(&self, screen: Vec2) -> Option<Ray> {
        self.screen_ray(screen)
    }

    fn project(&self, world: Vec3) -> Vec3 {
        self.world_to_screen(world)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
