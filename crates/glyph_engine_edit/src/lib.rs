//! Editor core for bitmap glyphs: undo history, view mapping, drawing tools
//! and the per-glyph editing sessions built on them.

pub mod backdrop;
pub mod brushes;
pub mod editor;
pub mod glyph_edit;
pub mod history;
pub mod logging;
pub mod settings;
pub mod tools;
pub mod view;

pub use backdrop::{Backdrop, BackdropCache};
pub use editor::{CanvasId, EditorEvents, GlyphCanvas, GlyphEditor, NoEvents, PointerButton, PointerEvent, ToolEngine};
pub use glyph_edit::{GlyphEdit, GlyphEditKind, PixelChange, PropertyChange};
pub use history::{EditHistory, EditRecord, HistoryEvent, HistoryEventKind, HistoryListener, ListenerId};
pub use settings::EditorSettings;
pub use tools::{Tool, ToolColor};
pub use view::ViewTransform;

// Re-export all necessary types from glyph_engine
pub use glyph_engine::{
    alpha_from_rgb, import_glyph, EngineError, Font, Glyph, GlyphKey, GlyphMove, GlyphProperties, PixelBuffer, Position, Rectangle, Result, Rgba, Size, MAX_ZOOM, MIN_ZOOM,
};
