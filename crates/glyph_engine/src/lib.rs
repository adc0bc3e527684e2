//! Data model for the bitmap glyph editor.
//!
//! Holds the types the editor core consumes: fonts, glyphs and their alpha
//! [`PixelBuffer`], grid geometry, colors, image import and the shared
//! [`EngineError`].

mod color;
mod error;
mod font;
mod glyph;
mod import;
mod pixel_buffer;
mod position;

pub use color::Rgba;
pub use error::{EngineError, Result};
pub use font::{Font, GlyphKey, GlyphMove};
pub use glyph::{Glyph, GlyphProperties};
pub use import::{alpha_from_rgb, import_glyph, IMPORTED_GLYPH_VALUE};
pub use pixel_buffer::PixelBuffer;
pub use position::{Position, Rectangle, Size};

/// Smallest zoom factor a glyph canvas supports.
pub const MIN_ZOOM: i32 = 1;

/// Largest zoom factor a glyph canvas supports.
pub const MAX_ZOOM: i32 = 40;
