//! Mapping between view space (viewport pixels) and buffer space (glyph pixels)
//!
//! The pan value is the buffer-space point shown at the centre of the
//! viewport, so zooming scales around the viewport centre and leaves the pan
//! untouched. On screen the buffer starts at `viewport / 2 - pan * zoom` and
//! spans `buffer * zoom` view pixels.

use glyph_engine::{Position, Rectangle, Size, MAX_ZOOM, MIN_ZOOM};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewTransform {
    pan: Position,
    zoom: i32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            pan: Position::default(),
            zoom: MIN_ZOOM,
        }
    }
}

impl ViewTransform {
    pub fn new(pan: Position, zoom: i32) -> Self {
        Self {
            pan,
            zoom: clamp_zoom(zoom),
        }
    }

    /// Transform showing the centre of a buffer of the given size.
    pub fn centered(buffer: Size, zoom: i32) -> Self {
        Self::new(center_of(buffer), zoom)
    }

    pub fn pan(&self) -> Position {
        self.pan
    }

    pub fn zoom(&self) -> i32 {
        self.zoom
    }

    pub fn set_pan(&mut self, pan: Position) {
        self.pan = pan;
    }

    pub fn center_on(&mut self, buffer: Size) {
        self.pan = center_of(buffer);
    }

    /// Set the zoom factor, clamped to `MIN_ZOOM..=MAX_ZOOM`.
    /// Returns `false` when the effective zoom did not change.
    pub fn set_zoom(&mut self, zoom: i32) -> bool {
        let zoom = clamp_zoom(zoom);
        if zoom == self.zoom {
            return false;
        }
        log::debug!("zoom {} -> {}", self.zoom, zoom);
        self.zoom = zoom;
        true
    }

    pub fn zoom_in(&mut self) -> bool {
        self.set_zoom(self.zoom + 1)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.set_zoom(self.zoom - 1)
    }

    /// On-screen rectangle covered by the scaled buffer.
    pub fn screen_rect(&self, viewport: Size, buffer: Size) -> Rectangle {
        Rectangle::from(
            viewport.width / 2 - self.pan.x * self.zoom,
            viewport.height / 2 - self.pan.y * self.zoom,
            buffer.width * self.zoom,
            buffer.height * self.zoom,
        )
    }

    /// Buffer pixel under a view-space point, `None` outside the buffer.
    ///
    /// Points between pixel boundaries resolve to the lower-indexed pixel.
    pub fn to_buffer_pixel(&self, view_x: i32, view_y: i32, viewport: Size, buffer: Size) -> Option<Position> {
        if !self.screen_rect(viewport, buffer).contains(view_x, view_y) {
            return None;
        }
        Some(self.to_buffer_point(view_x, view_y, viewport, buffer))
    }

    /// Buffer-space grid point under a view-space point, without bounds
    /// checking. Points left of or above the buffer map to negative values.
    pub fn to_buffer_point(&self, view_x: i32, view_y: i32, viewport: Size, buffer: Size) -> Position {
        let rect = self.screen_rect(viewport, buffer);
        Position::new(
            (view_x - rect.left()).div_euclid(self.zoom),
            (view_y - rect.top()).div_euclid(self.zoom),
        )
    }

    /// View-space rectangle covered by one buffer pixel.
    pub fn pixel_rect(&self, pixel: Position, viewport: Size, buffer: Size) -> Rectangle {
        let rect = self.screen_rect(viewport, buffer);
        Rectangle::from(rect.left() + pixel.x * self.zoom, rect.top() + pixel.y * self.zoom, self.zoom, self.zoom)
    }

    /// Range of buffer pixels at least partially visible in the viewport.
    pub fn visible_pixels(&self, viewport: Size, buffer: Size) -> Rectangle {
        let rect = self.screen_rect(viewport, buffer);
        let visible = rect.intersect(&Rectangle::new(Position::default(), viewport));
        if visible.is_empty() {
            return Rectangle::default();
        }
        let left = (visible.left() - rect.left()).div_euclid(self.zoom);
        let top = (visible.top() - rect.top()).div_euclid(self.zoom);
        let right = ceil_div(visible.right() - rect.left(), self.zoom);
        let bottom = ceil_div(visible.bottom() - rect.top(), self.zoom);
        Rectangle::from(left, top, right - left, bottom - top)
    }

    /// Pan reached by dragging `delta` view pixels from `anchor_pan`,
    /// snapped to whole buffer pixels.
    pub fn dragged_pan(&self, anchor_pan: Position, delta: Position) -> Position {
        Position::new(
            anchor_pan.x - round_div(delta.x, self.zoom),
            anchor_pan.y - round_div(delta.y, self.zoom),
        )
    }

    /// Clamp this transform's pan for the given viewport and buffer.
    pub fn clamp(&mut self, viewport: Size, buffer: Size) {
        self.pan = clamp_pan(self.pan, self.zoom, viewport, buffer);
    }
}

/// Keep the scaled buffer from drifting off screen.
///
/// When the scaled buffer is at least as large as the viewport, the viewport
/// centre must stay over the buffer. When it is smaller, the buffer's scaled
/// centre must stay inside the viewport.
pub fn clamp_pan(pan: Position, zoom: i32, viewport: Size, buffer: Size) -> Position {
    let zoom = clamp_zoom(zoom);
    Position::new(
        clamp_axis(pan.x, zoom, viewport.width, buffer.width),
        clamp_axis(pan.y, zoom, viewport.height, buffer.height),
    )
}

pub fn clamp_zoom(zoom: i32) -> i32 {
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

fn clamp_axis(pan: i32, zoom: i32, view_len: i32, buffer_len: i32) -> i32 {
    let scaled = buffer_len * zoom;
    if scaled >= view_len {
        return pan.clamp(0, buffer_len);
    }

    let half_view = view_len / 2;
    let half_scaled = scaled / 2;
    let center = half_view - pan * zoom + half_scaled;
    if center < 0 {
        (half_view + half_scaled).div_euclid(zoom)
    } else if center > view_len {
        ceil_div(half_view + half_scaled - view_len, zoom)
    } else {
        pan
    }
}

fn center_of(buffer: Size) -> Position {
    Position::new(buffer.width / 2, buffer.height / 2)
}

fn ceil_div(a: i32, b: i32) -> i32 {
    -((-a).div_euclid(b))
}

/// `a / b` rounded half up.
fn round_div(a: i32, b: i32) -> i32 {
    (2 * a + b).div_euclid(2 * b)
}
