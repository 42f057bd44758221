//! Geometric primitives and intersection tests used by the hit-test cascade.

use glam::{Mat4, Vec3};

const EPSILON: f32 = 1e-6;

/// Corner index triples of the 12 triangles making up a box.
///
/// Corner `i` of a box has `x = max` when bit 2 is set, `y = max` when bit 1
/// is set and `z = max` when bit 0 is set (see [`BoundingBox::corners`]).
/// Triangles are tested in this order; the first hit wins.
pub const BOX_TRIANGLES: [[usize; 3]; 12] = [
    // -X
    [0, 1, 3],
    [0, 3, 2],
    // +X
    [4, 6, 7],
    [4, 7, 5],
    // -Y
    [0, 4, 5],
    [0, 5, 1],
    // +Y
    [2, 3, 7],
    [2, 7, 6],
    // -Z
    [0, 2, 6],
    [0, 6, 4],
    // +Z
    [1, 5, 7],
    [1, 7, 3],
];

/// A ray with a normalized direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray origin.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Creates a ray, normalizing the direction.
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Returns the point at distance `t` along the ray.
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Returns the ray transformed by a matrix.
    #[must_use]
    pub fn transformed(&self, m: &Mat4) -> Self {
        let origin = m.transform_point3(self.origin);
        let direction = m.transform_vector3(self.direction);
        Self::new(origin, direction)
    }
}

/// A bounding sphere.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingSphere {
    /// Sphere center.
    pub center: Vec3,
    /// Sphere radius.
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new bounding sphere.
    #[must_use]
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Intersects a ray with this sphere.
    ///
    /// Returns the entry point nearest to the ray origin. Spheres whose
    /// center lies behind the ray origin are never hit.
    #[must_use]
    pub fn intersect_ray(&self, ray: &Ray) -> Option<Vec3> {
        let len = ray.direction.dot(self.center - ray.origin);
        if len < 0.0 {
            return None;
        }
        let dst2 = self.center.distance_squared(ray.at(len));
        let r2 = self.radius * self.radius;
        if dst2 > r2 {
            return None;
        }
        Some(ray.at(len - (r2 - dst2).sqrt()))
    }
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

impl BoundingBox {
    /// Creates a box from two opposite corners in any order.
    #[must_use]
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Creates a box from its center and half extents.
    #[must_use]
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        let half = half_extents.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Creates an inverted box that any [`BoundingBox::extend`] call replaces.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
        }
    }

    /// Returns whether the box encloses at least one point.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.min.cmple(self.max).all()
    }

    /// Grows the box to include a point.
    pub fn extend(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Returns the center.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Returns the full dimensions.
    #[must_use]
    pub fn dimensions(&self) -> Vec3 {
        self.max - self.min
    }

    /// Returns the half extents.
    #[must_use]
    pub fn half_extents(&self) -> Vec3 {
        self.dimensions() * 0.5
    }

    /// Returns the 8 corners, indexed by `x << 2 | y << 1 | z` where a set bit
    /// selects the maximum on that axis.
    #[must_use]
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Returns the corners transformed by a matrix.
    #[must_use]
    pub fn transformed_corners(&self, m: &Mat4) -> [Vec3; 8] {
        self.corners().map(|c| m.transform_point3(c))
    }

    /// Returns the axis-aligned box enclosing this box after transformation.
    #[must_use]
    pub fn transformed(&self, m: &Mat4) -> Self {
        if !self.is_valid() {
            return *self;
        }
        let translation = m.w_axis.truncate();
        let mut min = translation;
        let mut max = translation;
        let cols = [m.x_axis.truncate(), m.y_axis.truncate(), m.z_axis.truncate()];
        for (i, col) in cols.iter().enumerate() {
            let a = *col * self.min[i];
            let b = *col * self.max[i];
            min += a.min(b);
            max += a.max(b);
        }
        Self { min, max }
    }

    /// Slab test of a ray against this box.
    ///
    /// Returns the entry point, or the ray origin when it starts inside.
    #[must_use]
    pub fn intersect_ray(&self, ray: &Ray) -> Option<Vec3> {
        let center = self.center();
        let half = self.half_extents();
        let mut t_min = 0.0_f32;
        let mut t_max = f32::INFINITY;
        for axis in 0..3 {
            let origin = ray.origin[axis] - center[axis];
            let dir = ray.direction[axis];
            if dir.abs() < EPSILON {
                if origin.abs() > half[axis] {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / dir;
            let mut t0 = (-half[axis] - origin) * inv;
            let mut t1 = (half[axis] - origin) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }
        Some(ray.at(t_min))
    }
}

/// Moller-Trumbore ray/triangle intersection.
///
/// Returns the distance along the ray, ignoring hits behind the origin.
/// Both windings are accepted.
#[must_use]
pub fn intersect_ray_triangle(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);
    if a.abs() < EPSILON {
        return None;
    }
    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = f * edge2.dot(q);
    if t > EPSILON {
        Some(t)
    } else {
        None
    }
}

/// Tests a ray against the 12 triangles of a (possibly oriented) box given by
/// its 8 corners in [`BoundingBox::corners`] order.
///
/// Triangles are visited in [`BOX_TRIANGLES`] order and the first hit ends the
/// search, so the returned point is not necessarily the nearest one.
#[must_use]
pub fn intersect_ray_box_triangles(ray: &Ray, corners: &[Vec3; 8]) -> Option<Vec3> {
    BOX_TRIANGLES.iter().find_map(|&[a, b, c]| {
        intersect_ray_triangle(ray, corners[a], corners[b], corners[c]).map(|t| ray.at(t))
    })
}
