//! Pick pass color codec and CPU-side pick pixel buffer.
//!
//! The pick pass renders each object with a flat color encoding its id plus
//! one, so a cleared (zero) pixel never decodes to an object. After readback
//! the pixels land in a [`PickPixelBuffer`], which answers the engine's
//! [`PixelChecker`] queries without touching the GPU.
//!
//! The buffer is narrower than the screen: its width is fixed and its height
//! follows the screen aspect ratio. Row 0 is the bottom row, matching pick
//! space and framebuffer readback order.

use std::any::Any;

use glam::IVec2;
use pickselect_core::{ObjectId, PickError, PixelChecker, Rect, Result};

/// Default width of the pick buffer in pixels.
pub const PICK_BUFFER_DEFAULT_WIDTH: u32 = 256;

/// Color of a pixel no object was drawn into.
pub const BACKGROUND_COLOR: [u8; 4] = [0, 0, 0, 0];

/// Largest index that fits the 24-bit color encoding.
pub const MAX_PICK_INDEX: u32 = 0x00FF_FFFF;

/// Encodes an index as a 24-bit RGB pick color.
///
/// - R contains bits 16-23
/// - G contains bits 8-15
/// - B contains bits 0-7
#[must_use]
pub fn index_to_color(index: u32) -> [u8; 3] {
    [
        ((index >> 16) & 0xFF) as u8,
        ((index >> 8) & 0xFF) as u8,
        (index & 0xFF) as u8,
    ]
}

/// Decodes a pick color back to an index.
#[must_use]
pub fn color_to_index(r: u8, g: u8, b: u8) -> u32 {
    (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

/// Returns the RGBA8 color an object is drawn with in the pick pass.
///
/// Ids above [`MAX_PICK_INDEX`] - 1 wrap and alias lower ids.
#[must_use]
pub fn encode_object_color(id: ObjectId) -> [u8; 4] {
    let [r, g, b] = index_to_color(id.get().wrapping_add(1));
    [r, g, b, 255]
}

/// Returns the object whose pick color this is, or `None` for the background.
#[must_use]
pub fn decode_object_color(rgba: [u8; 4]) -> Option<ObjectId> {
    color_to_index(rgba[0], rgba[1], rgba[2])
        .checked_sub(1)
        .map(ObjectId)
}

/// Captured pick pass pixels, queried as a [`PixelChecker`].
#[derive(Debug, Clone)]
pub struct PickPixelBuffer {
    screen_width: u32,
    screen_height: u32,
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl PickPixelBuffer {
    /// Creates a cleared buffer for a screen of the given size, using the
    /// default buffer width.
    pub fn new(screen_width: u32, screen_height: u32) -> Result<Self> {
        Self::with_width(screen_width, screen_height, PICK_BUFFER_DEFAULT_WIDTH)
    }

    /// Creates a cleared buffer with an explicit buffer width.
    pub fn with_width(screen_width: u32, screen_height: u32, width: u32) -> Result<Self> {
        let height = buffer_height(screen_width, screen_height, width)?;
        Ok(Self {
            screen_width,
            screen_height,
            width,
            height,
            pixels: vec![BACKGROUND_COLOR; width as usize * height as usize],
        })
    }

    /// Adapts the buffer to a new screen size. The contents are cleared.
    pub fn resize(&mut self, screen_width: u32, screen_height: u32) -> Result<()> {
        let height = buffer_height(screen_width, screen_height, self.width)?;
        self.screen_width = screen_width;
        self.screen_height = screen_height;
        self.height = height;
        self.pixels.clear();
        self.pixels
            .resize(self.width as usize * height as usize, BACKGROUND_COLOR);
        Ok(())
    }

    /// Returns the buffer width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the buffer height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the screen size the buffer maps from.
    #[must_use]
    pub fn screen_size(&self) -> (u32, u32) {
        (self.screen_width, self.screen_height)
    }

    /// Returns the pixels, bottom row first.
    #[must_use]
    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    /// Returns the pixels as raw RGBA8 bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Replaces the contents with a full RGBA8 readback, bottom row first.
    ///
    /// A readback of the wrong size is rejected and the old contents kept.
    pub fn upload(&mut self, rgba: &[u8]) -> Result<()> {
        let expected = self.pixels.len() * 4;
        if rgba.len() != expected {
            log::warn!(
                "dropping pick pixel upload of {} bytes, buffer is {}x{}",
                rgba.len(),
                self.width,
                self.height
            );
            return Err(PickError::SizeMismatch {
                expected,
                actual: rgba.len(),
            });
        }
        self.pixels
            .copy_from_slice(bytemuck::cast_slice::<u8, [u8; 4]>(rgba));
        Ok(())
    }

    /// Resets every pixel to the background color.
    pub fn clear(&mut self) {
        self.pixels.fill(BACKGROUND_COLOR);
    }

    /// Fills the buffer region covering a pick-space rectangle.
    ///
    /// This is a software stand-in for drawing an object in the pick pass.
    pub fn fill_rect(&mut self, area: Rect, color: [u8; 4]) {
        let Some((x0, y0, x1, y1)) = self.buffer_region(area) else {
            return;
        };
        let width = self.width as usize;
        for y in y0..y1 {
            self.pixels[y * width + x0..y * width + x1].fill(color);
        }
    }

    /// Returns the pixel at buffer coordinates, if inside the buffer.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// Maps a pick-space screen point to buffer coordinates.
    #[must_use]
    pub fn screen_to_buffer(&self, x: i32, y: i32) -> IVec2 {
        IVec2::new(
            scale_floor(x, self.width, self.screen_width),
            scale_floor(y, self.height, self.screen_height),
        )
    }

    /// Returns the clamped buffer region `[x0, x1) x [y0, y1)` covered by a
    /// pick-space rectangle. A non-empty rectangle covers at least one pixel.
    fn buffer_region(&self, area: Rect) -> Option<(usize, usize, usize, usize)> {
        if area.width < 0 || area.height < 0 {
            return None;
        }
        let x0 = scale_floor(area.x, self.width, self.screen_width);
        let y0 = scale_floor(area.y, self.height, self.screen_height);
        let x1 = scale_ceil(area.right(), self.width, self.screen_width).max(i64::from(x0) + 1);
        let y1 = scale_ceil(area.top(), self.height, self.screen_height).max(i64::from(y0) + 1);

        let x0 = x0.max(0) as usize;
        let y0 = y0.max(0) as usize;
        let x1 = x1.clamp(0, i64::from(self.width)) as usize;
        let y1 = y1.clamp(0, i64::from(self.height)) as usize;

        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }
}

impl PixelChecker for PickPixelBuffer {
    fn is_color_in_pixels(&self, color_code: u32, area: Rect) -> bool {
        let Some((x0, y0, x1, y1)) = self.buffer_region(area) else {
            return false;
        };
        let expected = Some(ObjectId(color_code));
        let width = self.width as usize;
        (y0..y1).any(|y| {
            self.pixels[y * width + x0..y * width + x1]
                .iter()
                .any(|&rgba| decode_object_color(rgba) == expected)
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn buffer_height(screen_width: u32, screen_height: u32, width: u32) -> Result<u32> {
    if screen_width == 0 || screen_height == 0 || width == 0 {
        return Err(PickError::InvalidDimensions {
            width: screen_width,
            height: screen_height,
        });
    }
    let height = u64::from(screen_height) * u64::from(width) / u64::from(screen_width);
    Ok(u32::try_from(height).unwrap_or(u32::MAX).max(1))
}

fn scale_floor(position: i32, buffer: u32, screen: u32) -> i32 {
    let scaled = (i64::from(position) * i64::from(buffer)).div_euclid(i64::from(screen.max(1)));
    scaled.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

fn scale_ceil(position: i64, buffer: u32, screen: u32) -> i64 {
    let screen = i64::from(screen.max(1));
    let scaled = position * i64::from(buffer);
    scaled.div_euclid(screen) + i64::from(scaled.rem_euclid(screen) != 0)
}
