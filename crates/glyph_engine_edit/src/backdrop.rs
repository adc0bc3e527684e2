//! Checkerboard backdrops shown behind transparent glyph pixels
//!
//! Backdrops are cached by size. The cache is owned by the editor and
//! bounded: once more than `capacity` sizes were requested, the least
//! recently used one is dropped. Callers may keep an `Arc` to a dropped
//! backdrop as long as they like.

use std::collections::HashMap;
use std::sync::Arc;

use glyph_engine::{EngineError, Position, Rectangle, Result, Rgba, Size};

/// Edge length of one checkerboard cell in pixels
pub const CELL_SIZE: i32 = 5;

pub const DEFAULT_BACKDROP_CAPACITY: usize = 16;

const CELL_LIGHT: Rgba = Rgba::WHITE;
const CELL_DARK: Rgba = Rgba::opaque(192, 192, 192);

/// A rendered checkerboard, safe to tile.
///
/// The size is a whole, even number of cells in both directions, so it may
/// be larger than requested.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Backdrop {
    size: Size,
    rgba: Vec<u8>,
}

impl Backdrop {
    fn render(size: Size) -> Self {
        let mut rgba = Vec::with_capacity(size.area() * 4);
        for y in 0..size.height {
            for x in 0..size.width {
                rgba.extend_from_slice(&cell_color(x, y).to_array());
            }
        }
        Self { size, rgba }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> i32 {
        self.size.width
    }

    pub fn height(&self) -> i32 {
        self.size.height
    }

    /// Row-major RGBA bytes
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba> {
        if x < 0 || y < 0 || x >= self.size.width || y >= self.size.height {
            return None;
        }
        let offset = (y as usize * self.size.width as usize + x as usize) * 4;
        let px = &self.rgba[offset..offset + 4];
        Some(Rgba::new(px[0], px[1], px[2], px[3]))
    }

    /// Color at `x`,`y` of an area tiled with this backdrop.
    pub fn tiled_pixel(&self, x: i32, y: i32) -> Rgba {
        cell_color(x.rem_euclid(self.size.width), y.rem_euclid(self.size.height))
    }

    /// Placement of the copies needed to cover `area`, row by row from the
    /// top-left corner. The last row and column may overhang the area.
    pub fn tiles(&self, area: Size) -> impl Iterator<Item = Rectangle> + '_ {
        let size = self.size;
        let columns = tile_count(area.width, size.width);
        let rows = tile_count(area.height, size.height);
        (0..rows).flat_map(move |row| (0..columns).map(move |column| Rectangle::new(Position::new(column * size.width, row * size.height), size)))
    }
}

fn tile_count(len: i32, tile: i32) -> i32 {
    if len <= 0 || tile <= 0 {
        0
    } else {
        (len + tile - 1) / tile
    }
}

fn cell_color(x: i32, y: i32) -> Rgba {
    if (x / CELL_SIZE + y / CELL_SIZE) % 2 == 0 {
        CELL_DARK
    } else {
        CELL_LIGHT
    }
}

/// Size a request for `width`x`height` is served with.
pub fn normalized_size(width: i32, height: i32) -> Result<Size> {
    if width < 1 || height < 1 {
        return Err(EngineError::InvalidDimensions { width, height });
    }
    Ok(Size::new(normalize_axis(width), normalize_axis(height)))
}

fn normalize_axis(len: i32) -> i32 {
    let mut cells = (len + CELL_SIZE - 1) / CELL_SIZE;
    if cells % 2 == 1 {
        cells += 1;
    }
    cells * CELL_SIZE
}

struct CachedBackdrop {
    backdrop: Arc<Backdrop>,
    last_access: u64,
}

/// Cache statistics for debugging
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BackdropCacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Bounded LRU cache of [`Backdrop`]s keyed by normalized size
pub struct BackdropCache {
    capacity: usize,
    entries: HashMap<Size, CachedBackdrop>,
    clock: u64,
    hits: u64,
    misses: u64,
}

impl Default for BackdropCache {
    fn default() -> Self {
        Self::new(DEFAULT_BACKDROP_CAPACITY)
    }
}

impl BackdropCache {
    /// A capacity of 0 is raised to 1.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: HashMap::new(),
            clock: 0,
            hits: 0,
            misses: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Backdrop covering at least `width`x`height` pixels.
    pub fn get(&mut self, width: i32, height: i32) -> Result<Arc<Backdrop>> {
        let size = normalized_size(width, height)?;
        self.clock += 1;

        if let Some(entry) = self.entries.get_mut(&size) {
            entry.last_access = self.clock;
            self.hits += 1;
            return Ok(entry.backdrop.clone());
        }

        self.misses += 1;
        while self.entries.len() >= self.capacity {
            self.evict_oldest();
        }
        log::debug!("render backdrop {size}");
        let backdrop = Arc::new(Backdrop::render(size));
        self.entries.insert(
            size,
            CachedBackdrop {
                backdrop: backdrop.clone(),
                last_access: self.clock,
            },
        );
        Ok(backdrop)
    }

    /// Whether a backdrop for the request is cached, without touching the
    /// LRU order.
    pub fn contains(&self, width: i32, height: i32) -> bool {
        normalized_size(width, height).is_ok_and(|size| self.entries.contains_key(&size))
    }

    fn evict_oldest(&mut self) {
        if let Some(oldest) = self.entries.iter().min_by_key(|(_, entry)| entry.last_access).map(|(size, _)| *size) {
            log::debug!("evict backdrop {oldest}");
            self.entries.remove(&oldest);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn stats(&self) -> BackdropCacheStats {
        BackdropCacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_size() {
        assert_eq!(normalized_size(1, 1).unwrap(), Size::new(10, 10));
        assert_eq!(normalized_size(10, 11).unwrap(), Size::new(10, 20));
        assert_eq!(normalized_size(15, 20).unwrap(), Size::new(20, 20));
        assert!(matches!(normalized_size(0, 5), Err(EngineError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_checker_pattern() {
        let backdrop = Backdrop::render(Size::new(10, 10));
        assert_eq!(backdrop.pixel(0, 0), Some(CELL_DARK));
        assert_eq!(backdrop.pixel(4, 4), Some(CELL_DARK));
        assert_eq!(backdrop.pixel(5, 0), Some(CELL_LIGHT));
        assert_eq!(backdrop.pixel(0, 5), Some(CELL_LIGHT));
        assert_eq!(backdrop.pixel(9, 9), Some(CELL_DARK));
        assert_eq!(backdrop.pixel(10, 0), None);
    }

    #[test]
    fn test_tiles_cover_area() {
        let backdrop = Backdrop::render(Size::new(10, 20));
        let tiles: Vec<Rectangle> = backdrop.tiles(Size::new(25, 20)).collect();
        assert_eq!(
            tiles,
            vec![
                Rectangle::new(Position::new(0, 0), Size::new(10, 20)),
                Rectangle::new(Position::new(10, 0), Size::new(10, 20)),
                Rectangle::new(Position::new(20, 0), Size::new(10, 20)),
            ]
        );
        assert_eq!(backdrop.tiles(Size::new(0, 5)).count(), 0);
    }

    #[test]
    fn test_tiled_pixel_repeats() {
        let backdrop = Backdrop::render(Size::new(10, 10));
        assert_eq!(backdrop.tiled_pixel(10, 0), CELL_DARK);
        assert_eq!(backdrop.tiled_pixel(15, 0), CELL_LIGHT);
        assert_eq!(backdrop.tiled_pixel(-1, 0), CELL_LIGHT);
        assert_eq!(backdrop.tiled_pixel(-6, 0), CELL_DARK);
    }

    #[test]
    fn test_hit_returns_same_backdrop() {
        let mut cache = BackdropCache::new(4);
        let a = cache.get(7, 7).unwrap();
        let b = cache.get(10, 10).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.stats(), BackdropCacheStats { entries: 1, hits: 1, misses: 1 });
    }

    #[test]
    fn test_lru_eviction() {
        let mut cache = BackdropCache::new(2);
        cache.get(10, 10).unwrap();
        cache.get(20, 20).unwrap();
        // touch 10x10 so 20x20 becomes the oldest
        cache.get(10, 10).unwrap();
        cache.get(30, 30).unwrap();

        assert_eq!(cache.len(), 2);
        assert!(cache.contains(10, 10));
        assert!(!cache.contains(20, 20));
        assert!(cache.contains(30, 30));
    }
}
