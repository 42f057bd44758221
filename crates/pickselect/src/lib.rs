//! pickselect-rs: pick selection for interactive 3D applications.
//!
//! Decides which objects are under the pointer, or inside a dragged
//! rectangle, and keeps a selection set across frames. Hit testing runs a
//! cascade of increasingly precise checks: bounding sphere, axis-aligned box,
//! projected on-screen box, oriented box triangles and finally the
//! color-coded pick pass pixels.
//!
//! # Quick Start
//!
//! ```no_run
//! use pickselect::*;
//!
//! fn main() -> Result<()> {
//!     let mut scene = Scene::new();
//!     let crate_id = scene.add(SceneObject::cube("crate", 1.0));
//!
//!     let mut picking = PickSelection::new();
//!     picking.set_screen_dimensions(1280, 720);
//!     picking.set_camera(Camera::new(1280, 720));
//!     picking.add_listener(|object: &dyn SpatialObject, _: &PickingInfo, selected: bool| {
//!         println!("{} selected: {selected}", object.id());
//!     });
//!
//!     // Mouse pressed over the middle of the window
//!     picking.set_pointer(640, 360);
//!     picking.click();
//!     picking.traverse(&scene.candidates(), true)?;
//!
//!     assert_eq!(picking.selected_object(), Some(crate_id));
//!     Ok(())
//! }
//! ```
//!
//! # Modes
//!
//! - Click or hover selection ([`PickSelection::set_on_click`], [`PickSelection::set_on_hover`])
//! - Single or group selection, optionally toggling on a second click
//! - Point picking or a dragged picking box
//! - Extra precision checks, each raising the bar for what counts as a hit

mod engine;
mod listener;
mod scene;

pub use engine::PickSelection;
pub use listener::{ListenerId, SelectionListener};
pub use scene::{Scene, SceneObject};

// Re-export core types
pub use pickselect_core::{
    error::{PickError, Result},
    BoundingBox, BoundingSphere, Clock, ManualClock, ModeFlags, ObjectId, PickCamera,
    PickOptions, PickResult, PickingInfo, PixelChecker, Ray, Rect, SelectionTrigger,
    SpatialObject, SystemClock,
};
pub use pickselect_core::{IVec2, Mat4, Quat, Vec2, Vec3, Vec4};

// Re-export render types
pub use pickselect_render::{
    decode_object_color, encode_object_color, Camera, PickPixelBuffer, ProjectionMode,
};
