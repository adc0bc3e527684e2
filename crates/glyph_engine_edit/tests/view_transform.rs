//! Tests for view <-> buffer coordinate mapping

use glyph_engine_edit::view::{clamp_pan, clamp_zoom};
use glyph_engine_edit::{Position, Rectangle, Size, ViewTransform, MAX_ZOOM, MIN_ZOOM};

const BUFFER: Size = Size::new(10, 10);
const VIEWPORT: Size = Size::new(100, 100);

#[test]
fn test_center_pixel_of_small_buffer() {
    let view = ViewTransform::new(Position::new(5, 5), 1);
    assert_eq!(view.to_buffer_pixel(50, 50, VIEWPORT, BUFFER), Some(Position::new(5, 5)));
    assert_eq!(view.to_buffer_pixel(200, 200, VIEWPORT, BUFFER), None);
}

#[test]
fn test_corners_map_to_edge_pixels() {
    let view = ViewTransform::new(Position::new(5, 5), 4);
    let rect = view.screen_rect(VIEWPORT, BUFFER);
    assert_eq!(rect, Rectangle::from(30, 30, 40, 40));

    assert_eq!(view.to_buffer_pixel(rect.left(), rect.top(), VIEWPORT, BUFFER), Some(Position::new(0, 0)));
    assert_eq!(view.to_buffer_pixel(rect.right() - 1, rect.bottom() - 1, VIEWPORT, BUFFER), Some(Position::new(9, 9)));

    // one unit outside any edge
    assert_eq!(view.to_buffer_pixel(rect.left() - 1, rect.top(), VIEWPORT, BUFFER), None);
    assert_eq!(view.to_buffer_pixel(rect.left(), rect.top() - 1, VIEWPORT, BUFFER), None);
    assert_eq!(view.to_buffer_pixel(rect.right(), rect.top(), VIEWPORT, BUFFER), None);
    assert_eq!(view.to_buffer_pixel(rect.left(), rect.bottom(), VIEWPORT, BUFFER), None);
}

#[test]
fn test_points_inside_a_pixel_snap_down() {
    let view = ViewTransform::new(Position::new(5, 5), 4);
    assert_eq!(view.to_buffer_pixel(33, 33, VIEWPORT, BUFFER), Some(Position::new(0, 0)));
    assert_eq!(view.to_buffer_pixel(34, 30, VIEWPORT, BUFFER), Some(Position::new(1, 0)));
    assert_eq!(view.pixel_rect(Position::new(1, 2), VIEWPORT, BUFFER), Rectangle::from(34, 38, 4, 4));
}

#[test]
fn test_buffer_point_outside_is_negative() {
    let view = ViewTransform::new(Position::new(5, 5), 4);
    assert_eq!(view.to_buffer_point(29, 30, VIEWPORT, BUFFER), Position::new(-1, 0));
    assert_eq!(view.to_buffer_point(70, 26, VIEWPORT, BUFFER), Position::new(10, -1));
}

#[test]
fn test_zoom_is_clamped() {
    let mut view = ViewTransform::default();
    assert_eq!(view.zoom(), MIN_ZOOM);
    assert!(!view.set_zoom(0));
    assert!(!view.zoom_out());
    assert!(view.set_zoom(100));
    assert_eq!(view.zoom(), MAX_ZOOM);
    assert!(!view.zoom_in());
    assert_eq!(clamp_zoom(-7), MIN_ZOOM);
    assert_eq!(clamp_zoom(12), 12);
}

#[test]
fn test_zoom_keeps_pan() {
    let mut view = ViewTransform::centered(BUFFER, 1);
    assert!(view.zoom_in());
    assert_eq!(view.pan(), Position::new(5, 5));
    assert_eq!(view.to_buffer_pixel(50, 50, VIEWPORT, BUFFER), Some(Position::new(5, 5)));
}

#[test]
fn test_clamp_pan_large_buffer() {
    let buffer = Size::new(100, 100);
    let viewport = Size::new(20, 20);
    assert_eq!(clamp_pan(Position::new(-5, 150), 1, viewport, buffer), Position::new(0, 100));
    assert_eq!(clamp_pan(Position::new(30, 70), 1, viewport, buffer), Position::new(30, 70));
}

#[test]
fn test_clamp_pan_small_buffer() {
    // centred buffer stays where it is
    assert_eq!(clamp_pan(Position::new(5, 5), 1, VIEWPORT, BUFFER), Position::new(5, 5));

    // buffer dragged far right: its centre is stopped at the right edge
    let pan = clamp_pan(Position::new(-50, 5), 1, VIEWPORT, BUFFER);
    assert_eq!(pan, Position::new(-45, 5));
    let rect = ViewTransform::new(pan, 1).screen_rect(VIEWPORT, BUFFER);
    assert_eq!(rect.left() + rect.size.width / 2, VIEWPORT.width);

    // buffer dragged far left: its centre is stopped at the left edge
    let pan = clamp_pan(Position::new(60, 5), 1, VIEWPORT, BUFFER);
    assert_eq!(pan, Position::new(55, 5));
    let rect = ViewTransform::new(pan, 1).screen_rect(VIEWPORT, BUFFER);
    assert_eq!(rect.left() + rect.size.width / 2, 0);
}

#[test]
fn test_dragged_pan_rounds_half_up() {
    let view = ViewTransform::new(Position::new(5, 5), 2);
    assert_eq!(view.dragged_pan(Position::new(5, 5), Position::new(5, -3)), Position::new(2, 6));
    assert_eq!(view.dragged_pan(Position::new(5, 5), Position::new(0, 0)), Position::new(5, 5));
}

#[test]
fn test_visible_pixels_whole_buffer() {
    let view = ViewTransform::centered(BUFFER, 1);
    assert_eq!(view.visible_pixels(VIEWPORT, BUFFER), Rectangle::from(0, 0, 10, 10));
}
