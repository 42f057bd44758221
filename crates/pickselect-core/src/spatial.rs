//! Spatial object trait and identity.
//!
//! A [`SpatialObject`] is anything in the scene the picking engine can test:
//! it exposes a stable id, bounding volumes and a world transform. The engine
//! only ever borrows spatial objects; the scene owns them.

use std::fmt;

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::geometry::{BoundingBox, BoundingSphere};

/// Stable identity of a spatial object within its owning scene.
///
/// The id doubles as the color code of the object in the pick pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

impl ObjectId {
    /// Returns the raw integer value.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for ObjectId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An object that can take part in pick selection.
///
/// Implementors must keep [`SpatialObject::id`] stable while the object is
/// tracked by a picking engine. Before an id is reassigned to a different
/// object the engine must be told to purge it.
pub trait SpatialObject {
    /// Returns the stable id of this object.
    fn id(&self) -> ObjectId;

    /// Returns the world-space bounding sphere.
    fn bounding_sphere(&self) -> BoundingSphere;

    /// Returns the model-space axis-aligned bounding box.
    fn original_bounding_box(&self) -> BoundingBox;

    /// Returns the world-space axis-aligned bounding box.
    fn bounding_box(&self) -> BoundingBox {
        self.original_bounding_box().transformed(&self.transform())
    }

    /// Returns the model-to-world transform.
    fn transform(&self) -> Mat4;

    /// Returns the world position.
    fn position(&self) -> Vec3;

    /// Returns the (possibly non-uniform) scale.
    fn scale(&self) -> Vec3;

    /// Returns whether the object is currently visible.
    ///
    /// Invisible objects are skipped by traversal.
    fn is_visible(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Marker {
        id: ObjectId,
        transform: Mat4,
    }

    impl SpatialObject for Marker {
        fn id(&self) -> ObjectId {
            self.id
        }

        fn bounding_sphere(&self) -> BoundingSphere {
            BoundingSphere::new(self.position(), 1.0)
        }

        fn original_bounding_box(&self) -> BoundingBox {
            BoundingBox::new(Vec3::splat(-0.5), Vec3::splat(0.5))
        }

        fn transform(&self) -> Mat4 {
            self.transform
        }

        fn position(&self) -> Vec3 {
            self.transform.w_axis.truncate()
        }

        fn scale(&self) -> Vec3 {
            Vec3::ONE
        }
    }

    #[test]
    fn test_default_bounding_box_follows_transform() {
        let marker = Marker {
            id: ObjectId(3),
            transform: Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0)),
        };
        let bb = marker.bounding_box();
        assert!((bb.min - Vec3::new(9.5, -0.5, -0.5)).length() < 1e-5);
        assert!((bb.max - Vec3::new(10.5, 0.5, 0.5)).length() < 1e-5);
        assert!(marker.is_visible());
    }

    #[test]
    fn test_object_id_display() {
        assert_eq!(ObjectId(42).to_string(), "#42");
        assert_eq!(ObjectId::from(7).get(), 7);
    }
}
