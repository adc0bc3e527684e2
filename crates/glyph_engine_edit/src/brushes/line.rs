//! Line rasterization
//!
//! Fills the gap between two pointer samples of a drag so fast strokes stay
//! connected.

use glyph_engine::Position;

/// Iterator over the pixels of a digital line from `p0` to `p1`, both ends
/// included.
///
/// Steps one pixel along the major axis (the axis with the larger absolute
/// delta) per iteration and carries the minor-axis error, so consecutive
/// pixels are 8-connected and no pixel is produced twice. The pixel set does
/// not depend on the direction: lines are always traced from the same
/// canonical end point and reversed when needed.
#[derive(Clone, Debug)]
pub struct LineRasterizer {
    points: std::vec::IntoIter<Position>,
}

impl LineRasterizer {
    pub fn new(p0: Position, p1: Position) -> Self {
        Self {
            points: line_pixels(p0, p1).into_iter(),
        }
    }
}

impl Iterator for LineRasterizer {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        self.points.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.points.size_hint()
    }
}

impl ExactSizeIterator for LineRasterizer {}

/// All pixels on the segment from `p0` to `p1`, ordered from `p0` to `p1`.
pub fn line_pixels(p0: Position, p1: Position) -> Vec<Position> {
    if p0.x == p1.x {
        let step = if p1.y >= p0.y { 1 } else { -1 };
        let len = (p1.y - p0.y).abs();
        return (0..=len).map(|i| Position::new(p0.x, p0.y + i * step)).collect();
    }

    if p0.y == p1.y {
        let step = if p1.x >= p0.x { 1 } else { -1 };
        let len = (p1.x - p0.x).abs();
        return (0..=len).map(|i| Position::new(p0.x + i * step, p0.y)).collect();
    }

    // trace from the smaller end point so both directions yield the same set
    if (p1.x, p1.y) < (p0.x, p0.y) {
        let mut points = trace_diagonal(p1, p0);
        points.reverse();
        points
    } else {
        trace_diagonal(p0, p1)
    }
}

fn trace_diagonal(p0: Position, p1: Position) -> Vec<Position> {
    let dx = (p1.x - p0.x).abs();
    let dy = (p1.y - p0.y).abs();
    let sx = if p1.x > p0.x { 1 } else { -1 };
    let sy = if p1.y > p0.y { 1 } else { -1 };

    // major axis first, minor axis second
    let (major_len, minor_len) = if dx >= dy { (dx, dy) } else { (dy, dx) };
    let mut points = Vec::with_capacity(major_len as usize + 1);

    let mut x = p0.x;
    let mut y = p0.y;
    let mut err = 2 * minor_len - major_len;

    for _ in 0..=major_len {
        points.push(Position::new(x, y));
        if err > 0 {
            if dx >= dy {
                y += sy;
            } else {
                x += sx;
            }
            err -= 2 * major_len;
        }
        err += 2 * minor_len;
        if dx >= dy {
            x += sx;
        } else {
            y += sy;
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_connected(points: &[Position]) {
        for pair in points.windows(2) {
            assert_eq!(pair[0].chebyshev_distance(pair[1]), 1, "gap between {} and {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_horizontal_line() {
        let points = line_pixels(Position::new(0, 0), Position::new(5, 0));
        assert_eq!(points.len(), 6);
        assert_eq!(points[0], Position::new(0, 0));
        assert_eq!(points[5], Position::new(5, 0));

        // All points should have same y
        for pt in &points {
            assert_eq!(pt.y, 0);
        }
    }

    #[test]
    fn test_vertical_line_reverse() {
        let points = line_pixels(Position::new(2, 6), Position::new(2, 2));
        assert_eq!(points, vec![Position::new(2, 6), Position::new(2, 5), Position::new(2, 4), Position::new(2, 3), Position::new(2, 2)]);
    }

    #[test]
    fn test_diagonal_line() {
        let points = line_pixels(Position::new(0, 0), Position::new(5, 5));
        assert_eq!(points.len(), 6);
        for (i, pt) in points.iter().enumerate() {
            assert_eq!(*pt, Position::new(i as i32, i as i32));
        }
    }

    #[test]
    fn test_single_point() {
        let points = line_pixels(Position::new(3, 3), Position::new(3, 3));
        assert_eq!(points, vec![Position::new(3, 3)]);
    }

    #[test]
    fn test_steep_line() {
        // Line with slope > 1
        let points = line_pixels(Position::new(0, 0), Position::new(2, 6));
        assert_eq!(points.len(), 7);
        assert_eq!(points[0], Position::new(0, 0));
        assert_eq!(points[points.len() - 1], Position::new(2, 6));
        assert_connected(&points);
    }

    #[test]
    fn test_direction_keeps_pixel_set() {
        let forward = line_pixels(Position::new(1, 7), Position::new(12, 2));
        let mut backward = line_pixels(Position::new(12, 2), Position::new(1, 7));
        assert_eq!(forward[0], Position::new(1, 7));
        assert_eq!(backward[0], Position::new(12, 2));
        backward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_iterator_matches_vec() {
        let p0 = Position::new(-4, 3);
        let p1 = Position::new(9, -8);
        let iter = LineRasterizer::new(p0, p1);
        assert_eq!(iter.len(), line_pixels(p0, p1).len());
        assert_eq!(iter.collect::<Vec<_>>(), line_pixels(p0, p1));
    }
}
