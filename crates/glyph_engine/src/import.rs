//! Glyph import from raster images.
//!
//! Images with an alpha channel transfer their alpha samples directly. Images
//! without alpha are treated as dark ink on a white page: the alpha of a pixel
//! is its mean distance from white.

use std::path::Path;

use image::DynamicImage;

use crate::{EngineError, Glyph, PixelBuffer, Result};

/// Character assigned to freshly imported glyphs.
pub const IMPORTED_GLYPH_VALUE: char = 'A';

impl Glyph {
    /// Build a glyph from a decoded image.
    pub fn from_image(image: &DynamicImage) -> Result<Self> {
        let (width, height) = (image.width(), image.height());
        if width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(EngineError::UnsupportedImage {
                description: format!("{width}x{height} exceeds the maximum glyph size"),
            });
        }

        let color = image.color();
        let data: Vec<u8> = if color.has_alpha() {
            image.to_rgba8().pixels().map(|p| p.0[3]).collect()
        } else if color.has_color() {
            image.to_rgb8().pixels().map(|p| alpha_from_rgb(p.0)).collect()
        } else {
            image.to_luma8().pixels().map(|p| 255 - p.0[0]).collect()
        };

        log::debug!("imported {}x{} image ({:?}) as glyph", width, height, color);
        let buffer = PixelBuffer::from_data(width as i32, height as i32, data)?;
        Ok(Glyph::from_buffer(IMPORTED_GLYPH_VALUE, false, 0, Vec::new(), buffer))
    }
}

/// Open an image file and convert it into a glyph.
pub fn import_glyph(path: impl AsRef<Path>) -> Result<Glyph> {
    let path = path.as_ref();
    let image = image::open(path)?;
    log::info!("importing glyph from {}", path.display());
    Glyph::from_image(&image)
}

/// Mean distance of an RGB sample from white.
pub fn alpha_from_rgb(rgb: [u8; 3]) -> u8 {
    let sum = rgb[0] as u32 + rgb[1] as u32 + rgb[2] as u32;
    ((765 - sum) / 3) as u8
}
