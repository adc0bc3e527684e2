//! Alpha-only pixel storage for a single glyph.

use crate::{EngineError, Position, Rectangle, Result, Size};

/// A row-major grid of 8 bit alpha samples.
///
/// The sample array always holds exactly `width * height` bytes. Resizing
/// never happens in place: [`PixelBuffer::resized`] produces a new buffer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PixelBuffer {
    width: i32,
    height: i32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a zero-filled buffer. Negative dimensions are rejected.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        })
    }

    /// Wrap existing alpha samples. `data` must hold `width * height` bytes.
    pub fn from_data(width: i32, height: i32, data: Vec<u8>) -> Result<Self> {
        check_dimensions(width, height)?;
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(EngineError::DataLengthMismatch { expected, actual: data.len() });
        }
        Ok(Self { width, height, data })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(Position::default(), self.size())
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.contains(x, y) {
            Some(x as usize + y as usize * self.width as usize)
        } else {
            None
        }
    }

    /// Alpha at `(x, y)`, `None` outside the buffer.
    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        self.index(x, y).map(|i| self.data[i])
    }

    /// Write alpha at `(x, y)`. Returns `false` (and changes nothing) when the
    /// position is outside the buffer.
    pub fn set(&mut self, x: i32, y: i32, alpha: u8) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.data[i] = alpha;
                true
            }
            None => false,
        }
    }

    pub fn get_pt(&self, pos: Position) -> Option<u8> {
        self.get(pos.x, pos.y)
    }

    pub fn set_pt(&mut self, pos: Position, alpha: u8) -> bool {
        self.set(pos.x, pos.y, alpha)
    }

    /// Set every sample to zero.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|&a| a == 0)
    }

    /// Copy of this buffer with new dimensions. The overlapping top-left
    /// region is kept, new area is zero-filled.
    pub fn resized(&self, new_width: i32, new_height: i32) -> Result<PixelBuffer> {
        let mut result = PixelBuffer::new(new_width, new_height)?;
        let copy_width = self.width.min(new_width) as usize;
        let copy_height = self.height.min(new_height) as usize;
        for y in 0..copy_height {
            let src = y * self.width as usize;
            let dst = y * new_width as usize;
            result.data[dst..dst + copy_width].copy_from_slice(&self.data[src..src + copy_width]);
        }
        Ok(result)
    }
}

fn check_dimensions(width: i32, height: i32) -> Result<()> {
    if width < 0 || height < 0 {
        return Err(EngineError::InvalidDimensions { width, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_keeps_overlap() {
        let mut buf = PixelBuffer::new(3, 2).unwrap();
        buf.set(0, 0, 1);
        buf.set(2, 0, 2);
        buf.set(1, 1, 3);

        let grown = buf.resized(4, 3).unwrap();
        assert_eq!(grown.data(), &[1, 0, 2, 0, 0, 3, 0, 0, 0, 0, 0, 0]);

        let shrunk = buf.resized(2, 1).unwrap();
        assert_eq!(shrunk.data(), &[1, 0]);
    }

    #[test]
    fn test_set_out_of_bounds_is_noop() {
        let mut buf = PixelBuffer::new(2, 2).unwrap();
        assert!(!buf.set(-1, 0, 9));
        assert!(!buf.set(2, 0, 9));
        assert!(!buf.set(0, 2, 9));
        assert!(buf.is_blank());
    }

    #[test]
    fn test_negative_dimensions_fail() {
        assert!(matches!(PixelBuffer::new(-1, 4), Err(EngineError::InvalidDimensions { .. })));
        assert!(PixelBuffer::new(2, 2).unwrap().resized(2, -3).is_err());
    }
}
