//! Undoable glyph edits
//!
//! Every mutation of a glyph under edit is captured as a [`GlyphEdit`]: the
//! owning canvas plus one [`GlyphEditKind`] carrying typed old/new values.
//! Replaying a record just writes the captured values back.

use glyph_engine::{Glyph, PixelBuffer};

use crate::editor::CanvasId;
use crate::history::EditRecord;
use crate::Result;

/// One pixel written during a gesture
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelChange {
    pub x: i32,
    pub y: i32,
    pub old: u8,
    pub new: u8,
}

/// A single glyph property change
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyChange {
    Value { old: char, new: char },
    Whitespace { old: bool, new: bool },
    OffsetY { old: i32, new: i32 },
    OffsetX { old: Vec<(i32, i32)>, new: Vec<(i32, i32)> },
}

impl PropertyChange {
    fn apply(&self, glyph: &mut Glyph, forward: bool) {
        match self {
            PropertyChange::Value { old, new } => glyph.set_value(if forward { *new } else { *old }),
            PropertyChange::Whitespace { old, new } => glyph.set_whitespace(if forward { *new } else { *old }),
            PropertyChange::OffsetY { old, new } => glyph.set_offset_y(if forward { *new } else { *old }),
            PropertyChange::OffsetX { old, new } => glyph.set_offset_x(if forward { new.clone() } else { old.clone() }),
        }
    }

    fn is_noop(&self) -> bool {
        match self {
            PropertyChange::Value { old, new } => old == new,
            PropertyChange::Whitespace { old, new } => old == new,
            PropertyChange::OffsetY { old, new } => old == new,
            PropertyChange::OffsetX { old, new } => old == new,
        }
    }
}

/// What an edit does to its glyph
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GlyphEditKind {
    /// Several edits undone/redone as one step
    Atomic { description: String, edits: Vec<GlyphEditKind> },

    /// Reallocate the pixel buffer. The old buffer is kept so undo restores
    /// cropped pixels.
    Resize { old: PixelBuffer, new_width: i32, new_height: i32 },

    /// Pixels written by one pencil or eraser gesture, in paint order
    PixelWrite { erase: bool, changes: Vec<PixelChange> },

    SetProperty(PropertyChange),
}

impl GlyphEditKind {
    pub fn description(&self) -> String {
        match self {
            GlyphEditKind::Atomic { description, .. } => description.clone(),
            GlyphEditKind::Resize { new_width, new_height, .. } => format!("Resize to {new_width}x{new_height}"),
            GlyphEditKind::PixelWrite { erase, .. } => {
                if *erase {
                    "Erase pixels".to_string()
                } else {
                    "Draw pixels".to_string()
                }
            }
            GlyphEditKind::SetProperty(change) => match change {
                PropertyChange::Value { .. } => "Change character".to_string(),
                PropertyChange::Whitespace { .. } => "Change whitespace".to_string(),
                PropertyChange::OffsetY { .. } => "Change vertical offset".to_string(),
                PropertyChange::OffsetX { .. } => "Change horizontal offsets".to_string(),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            GlyphEditKind::Atomic { edits, .. } => edits.iter().all(|e| e.is_empty()),
            GlyphEditKind::Resize { old, new_width, new_height } => old.width() == *new_width && old.height() == *new_height,
            GlyphEditKind::PixelWrite { changes, .. } => changes.is_empty(),
            GlyphEditKind::SetProperty(change) => change.is_noop(),
        }
    }

    fn redo(&self, glyph: &mut Glyph) -> Result<()> {
        match self {
            GlyphEditKind::Atomic { edits, .. } => {
                for edit in edits {
                    edit.redo(glyph)?;
                }
                Ok(())
            }
            GlyphEditKind::Resize { new_width, new_height, .. } => glyph.resize(*new_width, *new_height),
            GlyphEditKind::PixelWrite { changes, .. } => {
                let buffer = glyph.buffer_mut();
                for change in changes {
                    buffer.set(change.x, change.y, change.new);
                }
                Ok(())
            }
            GlyphEditKind::SetProperty(change) => {
                change.apply(glyph, true);
                Ok(())
            }
        }
    }

    fn undo(&self, glyph: &mut Glyph) -> Result<()> {
        match self {
            GlyphEditKind::Atomic { edits, .. } => {
                for edit in edits.iter().rev() {
                    edit.undo(glyph)?;
                }
                Ok(())
            }
            GlyphEditKind::Resize { old, .. } => {
                glyph.set_buffer(old.clone());
                Ok(())
            }
            GlyphEditKind::PixelWrite { changes, .. } => {
                let buffer = glyph.buffer_mut();
                for change in changes.iter().rev() {
                    buffer.set(change.x, change.y, change.old);
                }
                Ok(())
            }
            GlyphEditKind::SetProperty(change) => {
                change.apply(glyph, false);
                Ok(())
            }
        }
    }
}

/// History record for a glyph canvas
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphEdit {
    owner: CanvasId,
    kind: GlyphEditKind,
}

impl GlyphEdit {
    pub fn new(owner: CanvasId, kind: GlyphEditKind) -> Self {
        Self { owner, kind }
    }

    pub fn kind(&self) -> &GlyphEditKind {
        &self.kind
    }
}

impl EditRecord for GlyphEdit {
    type Owner = Glyph;
    type Key = CanvasId;

    fn owner(&self) -> CanvasId {
        self.owner
    }

    fn description(&self) -> String {
        self.kind.description()
    }

    fn redo(&self, owner: &mut Glyph) -> Result<()> {
        self.kind.redo(owner)
    }

    fn undo(&self, owner: &mut Glyph) -> Result<()> {
        self.kind.undo(owner)
    }

    fn is_empty(&self) -> bool {
        self.kind.is_empty()
    }
}
