//! Renderer-side collaborators for pickselect-rs.
//!
//! This crate provides the pieces that live on the renderer side of the
//! picking boundary:
//! - A perspective/orthographic [`Camera`] implementing [`pickselect_core::PickCamera`]
//! - The id to color codec used by the pick pass
//! - [`PickPixelBuffer`], a captured pick image implementing [`pickselect_core::PixelChecker`]

#![allow(clippy::missing_errors_doc)]
// Pixel math converts between screen and buffer integer spaces
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_precision_loss)]

pub mod camera;
pub mod pick;

pub use camera::{Camera, ProjectionMode};
pub use pick::{
    color_to_index, decode_object_color, encode_object_color, index_to_color, PickPixelBuffer,
    BACKGROUND_COLOR, MAX_PICK_INDEX, PICK_BUFFER_DEFAULT_WIDTH,
};
