//! Shared test helpers for editor tests

#![allow(dead_code)]

use glyph_engine_edit::{CanvasId, EditorEvents, Glyph, HistoryEventKind, Size};

/// Notification captured by [`RecordingEvents`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Recorded {
    Dirty(CanvasId, bool),
    AlphaPicked(u8),
    History(CanvasId, HistoryEventKind, isize),
    Resized(CanvasId, i32, i32),
    FontDirty(bool),
}

/// Event sink remembering every call in order
#[derive(Debug, Default)]
pub struct RecordingEvents {
    pub events: Vec<Recorded>,
}

impl RecordingEvents {
    pub fn take(&mut self) -> Vec<Recorded> {
        std::mem::take(&mut self.events)
    }

    pub fn dirty_count(&self) -> usize {
        self.events.iter().filter(|e| matches!(e, Recorded::Dirty(..))).count()
    }
}

impl EditorEvents for RecordingEvents {
    fn on_dirty_changed(&mut self, canvas: CanvasId, dirty: bool) {
        self.events.push(Recorded::Dirty(canvas, dirty));
    }

    fn on_alpha_picked(&mut self, alpha: u8) {
        self.events.push(Recorded::AlphaPicked(alpha));
    }

    fn on_history_changed(&mut self, canvas: CanvasId, kind: HistoryEventKind, position: isize) {
        self.events.push(Recorded::History(canvas, kind, position));
    }

    fn on_glyph_resized(&mut self, canvas: CanvasId, width: i32, height: i32, data: &[u8]) {
        assert_eq!(data.len(), (width * height) as usize);
        self.events.push(Recorded::Resized(canvas, width, height));
    }

    fn on_font_dirty_changed(&mut self, dirty: bool) {
        self.events.push(Recorded::FontDirty(dirty));
    }
}

/// Blank glyph of the given size
pub fn blank_glyph(width: i32, height: i32) -> Glyph {
    Glyph::new('A', width, height, false, 0).unwrap()
}

/// Viewport at zoom 1 where view coordinates equal buffer coordinates:
/// a 10x10 viewport centred on a 10x10 glyph.
pub const IDENTITY_VIEWPORT: Size = Size::new(10, 10);

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
