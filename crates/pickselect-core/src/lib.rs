//! Core abstractions for pickselect-rs.
//!
//! This crate provides the fundamental traits and types used throughout pickselect-rs:
//! - [`SpatialObject`] trait for pickable scene entities
//! - [`PickCamera`] and [`PixelChecker`] traits for the renderer-side collaborators
//! - Geometry (rays, spheres, boxes, triangles) and integer screen rectangles
//! - [`PickResult`] tiers, the per-object [`PickingInfo`] record and its pool
//! - Mode flags and serializable configuration options

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Options structs legitimately have many boolean flags
#![allow(clippy::struct_excessive_bools)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Geometry names like AABB and OBB are acronyms
#![allow(clippy::upper_case_acronyms)]

pub mod camera;
pub mod clock;
pub mod error;
pub mod flags;
pub mod geometry;
pub mod options;
pub mod pick;
pub mod pool;
pub mod rect;
pub mod spatial;

pub use camera::PickCamera;
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{PickError, Result};
pub use flags::ModeFlags;
pub use geometry::{
    intersect_ray_box_triangles, intersect_ray_triangle, BoundingBox, BoundingSphere, Ray,
    BOX_TRIANGLES,
};
pub use options::{PickOptions, SelectionTrigger};
pub use pick::{PickResult, PickingInfo, PixelChecker};
pub use pool::PickingInfoPool;
pub use rect::Rect;
pub use spatial::{ObjectId, SpatialObject};

// Re-export glam types for convenience
pub use glam::{IVec2, Mat4, Quat, Vec2, Vec3, Vec4};
