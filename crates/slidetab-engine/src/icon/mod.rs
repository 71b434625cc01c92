//! Icon bitmaps and the tinting primitive segments use to recolor them.
//!
//! An [`Icon`] is a cheap-to-clone handle over straight-alpha RGBA8 pixels.
//! Tinting never mutates the source: it produces a new icon, and the source
//! pixels stay available for controls that preserve icon colors.

mod tint;

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use image::RgbaImage;

use crate::paint::Color;

pub use tint::tint;

/// Error returned when an icon cannot be decoded or constructed.
#[derive(Debug, Clone)]
pub struct IconError(pub String);

impl fmt::Display for IconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "icon error: {}", self.0)
    }
}

impl std::error::Error for IconError {}

/// Shared handle to an RGBA8 bitmap.
#[derive(Clone)]
pub struct Icon {
    pixels: Arc<RgbaImage>,
}

impl Icon {
    /// Wraps an already decoded image.
    pub fn from_image(image: RgbaImage) -> Self {
        Self { pixels: Arc::new(image) }
    }

    /// Builds an icon from raw straight-alpha RGBA bytes, row-major.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, IconError> {
        let expected = width as usize * height as usize * 4;
        let actual = rgba.len();
        RgbaImage::from_raw(width, height, rgba).map(Self::from_image).ok_or_else(|| {
            IconError(format!("{width}x{height} needs {expected} bytes, got {actual}"))
        })
    }

    /// Decodes any format the `image` crate was built with.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, IconError> {
        let path = path.as_ref();
        let rgba = image::open(path)
            .map_err(|e| IconError(format!("{}: {e}", path.display())))?
            .into_rgba8();
        log::debug!("loaded icon {} ({}x{})", path.display(), rgba.width(), rgba.height());
        Ok(Self::from_image(rgba))
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    #[inline]
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// A copy of this icon with every pixel recolored to `color`, alpha kept.
    pub fn tinted(&self, color: Color) -> Icon {
        Icon::from_image(tint(&self.pixels, color))
    }

    /// `true` when both handles point at the same allocation.
    #[inline]
    pub fn shares_pixels_with(&self, other: &Icon) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }
}

impl PartialEq for Icon {
    fn eq(&self, other: &Self) -> bool {
        self.shares_pixels_with(other) || *self.pixels == *other.pixels
    }
}

impl fmt::Debug for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Icon")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}
