//! Editable glyph: one character's alpha bitmap plus layout metrics.

use crate::{PixelBuffer, Result, Size};

/// A single editable glyph.
///
/// The pixel data lives in a [`PixelBuffer`], so `width * height` always
/// matches the number of alpha samples.
#[derive(Clone, Debug)]
pub struct Glyph {
    value: char,
    is_whitespace: bool,
    offset_y: i32,
    offset_x: Vec<(i32, i32)>,
    buffer: PixelBuffer,
    name: String,
}

/// Value object for the fields edited together in the glyph properties dialog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphProperties {
    pub value: char,
    pub width: i32,
    pub height: i32,
    pub is_whitespace: bool,
    pub offset_y: i32,
}

impl Glyph {
    /// Create a blank glyph.
    pub fn new(value: char, width: i32, height: i32, is_whitespace: bool, offset_y: i32) -> Result<Self> {
        let buffer = PixelBuffer::new(width, height)?;
        Ok(Self::from_buffer(value, is_whitespace, offset_y, Vec::new(), buffer))
    }

    /// Create a glyph from raw alpha samples (`width * height` bytes).
    pub fn from_parts(value: char, width: i32, height: i32, is_whitespace: bool, offset_y: i32, offset_x: Vec<(i32, i32)>, data: Vec<u8>) -> Result<Self> {
        let buffer = PixelBuffer::from_data(width, height, data)?;
        Ok(Self::from_buffer(value, is_whitespace, offset_y, offset_x, buffer))
    }

    pub fn from_buffer(value: char, is_whitespace: bool, offset_y: i32, offset_x: Vec<(i32, i32)>, buffer: PixelBuffer) -> Self {
        Self {
            value,
            is_whitespace,
            offset_y,
            offset_x,
            buffer,
            name: create_name(value),
        }
    }

    pub fn value(&self) -> char {
        self.value
    }

    /// Display name: the character itself, or its hex code for control and
    /// whitespace characters.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> i32 {
        self.buffer.width()
    }

    pub fn height(&self) -> i32 {
        self.buffer.height()
    }

    pub fn size(&self) -> Size {
        self.buffer.size()
    }

    pub fn is_whitespace(&self) -> bool {
        self.is_whitespace
    }

    pub fn offset_y(&self) -> i32 {
        self.offset_y
    }

    pub fn offset_x(&self) -> &[(i32, i32)] {
        &self.offset_x
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut PixelBuffer {
        &mut self.buffer
    }

    pub fn data(&self) -> &[u8] {
        self.buffer.data()
    }

    pub fn properties(&self) -> GlyphProperties {
        GlyphProperties {
            value: self.value,
            width: self.width(),
            height: self.height(),
            is_whitespace: self.is_whitespace,
            offset_y: self.offset_y,
        }
    }

    pub fn set_value(&mut self, value: char) {
        if value != self.value {
            self.value = value;
            self.name = create_name(value);
        }
    }

    pub fn set_whitespace(&mut self, is_whitespace: bool) {
        self.is_whitespace = is_whitespace;
    }

    pub fn set_offset_y(&mut self, offset_y: i32) {
        self.offset_y = offset_y;
    }

    pub fn set_offset_x(&mut self, offset_x: Vec<(i32, i32)>) {
        self.offset_x = offset_x;
    }

    /// Replace the pixel buffer wholesale (dimensions follow the new buffer).
    pub fn set_buffer(&mut self, buffer: PixelBuffer) {
        self.buffer = buffer;
    }

    /// Reallocate to new dimensions, keeping the overlapping region and
    /// zero-filling new area. Fails before mutating on invalid dimensions.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<()> {
        if width == self.width() && height == self.height() {
            return Ok(());
        }
        self.buffer = self.buffer.resized(width, height)?;
        Ok(())
    }

    /// Apply all fields of `props`, resizing when the dimensions differ.
    pub fn apply_properties(&mut self, props: GlyphProperties) -> Result<()> {
        self.resize(props.width, props.height)?;
        self.set_value(props.value);
        self.is_whitespace = props.is_whitespace;
        self.offset_y = props.offset_y;
        Ok(())
    }
}

impl PartialEq for Glyph {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
            && self.is_whitespace == other.is_whitespace
            && self.offset_y == other.offset_y
            && self.offset_x == other.offset_x
            && self.buffer == other.buffer
    }
}

impl Eq for Glyph {}

fn create_name(value: char) -> String {
    if value.is_control() || value.is_whitespace() {
        format!("0x{:X}", value as u32)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(Glyph::new('A', 1, 1, false, 0).unwrap().name(), "A");
        assert_eq!(Glyph::new(' ', 1, 1, true, 0).unwrap().name(), "0x20");
        assert_eq!(Glyph::new('\n', 1, 1, true, 0).unwrap().name(), "0xA");
    }
}
