//! Glyph editing sessions
//!
//! - `canvas.rs` - One open glyph: pixels, history, view, dirty state
//! - `tool_engine.rs` - Active tool, color and pointer gesture handling
//! - `glyph_editor.rs` - Coordinator over the open font and all open canvases
//!
//! Everything here runs on the UI thread. The host is informed about state
//! changes through [`EditorEvents`].

mod canvas;
mod glyph_editor;
mod tool_engine;

pub use canvas::GlyphCanvas;
pub use glyph_editor::GlyphEditor;
pub use tool_engine::ToolEngine;

use glyph_engine::Position;

use crate::history::HistoryEventKind;

/// Identity of an open canvas, also the owner key of its edit history
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanvasId(u32);

impl CanvasId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CanvasId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "canvas#{}", self.0)
    }
}

/// Callbacks from the editor core into the host application.
///
/// All methods default to doing nothing.
pub trait EditorEvents {
    /// The dirty flag of `canvas` flipped. Fires at most once per gesture.
    fn on_dirty_changed(&mut self, _canvas: CanvasId, _dirty: bool) {}

    /// The picker changed the tool alpha.
    fn on_alpha_picked(&mut self, _alpha: u8) {}

    /// The history of `canvas` changed structurally.
    fn on_history_changed(&mut self, _canvas: CanvasId, _kind: HistoryEventKind, _position: isize) {}

    /// The glyph of `canvas` got new dimensions through an edit, undo or redo.
    fn on_glyph_resized(&mut self, _canvas: CanvasId, _width: i32, _height: i32, _data: &[u8]) {}

    /// The dirty flag of the open font flipped.
    fn on_font_dirty_changed(&mut self, _dirty: bool) {}
}

/// Sink for hosts that do not care about notifications
#[derive(Clone, Copy, Debug, Default)]
pub struct NoEvents;

impl EditorEvents for NoEvents {}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PointerButton {
    #[default]
    Left,
    Middle,
    Right,
}

/// Pointer sample in view coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerEvent {
    pub position: Position,
    pub button: PointerButton,
}

impl PointerEvent {
    pub fn new(x: i32, y: i32, button: PointerButton) -> Self {
        Self {
            position: Position::new(x, y),
            button,
        }
    }

    pub fn left(x: i32, y: i32) -> Self {
        Self::new(x, y, PointerButton::Left)
    }

    pub fn right(x: i32, y: i32) -> Self {
        Self::new(x, y, PointerButton::Right)
    }
}
