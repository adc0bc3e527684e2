//! Editing session for a single glyph
//!
//! A [`GlyphCanvas`] owns the glyph being edited together with its edit
//! history and the view used to display it. All pixel and metric changes
//! that should be undoable go through [`GlyphCanvas::apply`] or
//! [`GlyphCanvas::record`]; the history is dropped with the canvas.

use glyph_engine::{Glyph, GlyphKey, GlyphProperties, Position, Rgba, Size};

use crate::glyph_edit::{GlyphEdit, GlyphEditKind, PixelChange, PropertyChange};
use crate::history::{EditHistory, EditRecord};
use crate::view::ViewTransform;
use crate::{EngineError, Result};

use super::CanvasId;

pub struct GlyphCanvas {
    id: CanvasId,
    glyph: Glyph,
    history: EditHistory<GlyphEdit>,
    view: ViewTransform,
    viewport: Size,
    is_dirty: bool,
    border_color: Option<Rgba>,
    font_glyph: Option<GlyphKey>,
}

impl GlyphCanvas {
    pub fn new(id: CanvasId, glyph: Glyph, zoom: i32) -> Self {
        let view = ViewTransform::centered(glyph.size(), zoom);
        Self {
            id,
            glyph,
            history: EditHistory::new(id),
            view,
            viewport: Size::default(),
            is_dirty: false,
            border_color: None,
            font_glyph: None,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Getters
    // ═══════════════════════════════════════════════════════════════════════

    pub fn id(&self) -> CanvasId {
        self.id
    }

    pub fn glyph(&self) -> &Glyph {
        &self.glyph
    }

    /// Give the glyph back, e.g. to store it in the font after closing.
    pub fn into_glyph(self) -> Glyph {
        self.glyph
    }

    pub fn history(&self) -> &EditHistory<GlyphEdit> {
        &self.history
    }

    /// Mutable history access, for listener registration.
    pub fn history_mut(&mut self) -> &mut EditHistory<GlyphEdit> {
        &mut self.history
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    pub fn border_color(&self) -> Option<Rgba> {
        self.border_color
    }

    /// Font glyph this canvas edits a copy of, if it was opened from a font.
    pub fn font_glyph(&self) -> Option<GlyphKey> {
        self.font_glyph
    }

    // ═══════════════════════════════════════════════════════════════════════
    // State
    // ═══════════════════════════════════════════════════════════════════════

    /// Returns `true` when the flag actually flipped.
    pub fn set_dirty(&mut self, dirty: bool) -> bool {
        if self.is_dirty == dirty {
            return false;
        }
        self.is_dirty = dirty;
        true
    }

    /// Clear the dirty flag after the host stored the glyph.
    pub fn mark_saved(&mut self) -> bool {
        self.set_dirty(false)
    }

    pub fn set_border_color(&mut self, color: Option<Rgba>) {
        self.border_color = color;
    }

    pub(crate) fn set_font_glyph(&mut self, key: Option<GlyphKey>) {
        self.font_glyph = key;
    }

    /// Take over offset pairs rewritten by a glyph list change. Not an edit
    /// of this glyph, so nothing is recorded.
    pub(crate) fn adopt_offset_x(&mut self, offset_x: &[(i32, i32)]) {
        if offset_x != self.glyph.offset_x() {
            self.glyph.set_offset_x(offset_x.to_vec());
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // View
    // ═══════════════════════════════════════════════════════════════════════

    /// Update the viewport size after the host widget was resized.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.clamp_view();
    }

    /// Show the centre of the glyph in the middle of the viewport.
    pub fn center_image(&mut self) {
        self.view.center_on(self.glyph.size());
    }

    pub fn set_pan(&mut self, pan: Position) {
        self.view.set_pan(pan);
        self.clamp_view();
    }

    /// Returns `true` if the zoom changed.
    pub fn set_zoom(&mut self, zoom: i32) -> bool {
        let changed = self.view.set_zoom(zoom);
        if changed {
            self.clamp_view();
        }
        changed
    }

    pub fn zoom_in(&mut self) -> bool {
        self.set_zoom(self.view.zoom() + 1)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.set_zoom(self.view.zoom() - 1)
    }

    /// Glyph pixel under a view-space point, `None` outside the glyph.
    pub fn pixel_at(&self, view_pos: Position) -> Option<Position> {
        self.view.to_buffer_pixel(view_pos.x, view_pos.y, self.viewport, self.glyph.size())
    }

    /// Unchecked buffer-space grid point under a view-space point.
    pub fn point_at(&self, view_pos: Position) -> Position {
        self.view.to_buffer_point(view_pos.x, view_pos.y, self.viewport, self.glyph.size())
    }

    fn clamp_view(&mut self) {
        if self.viewport.is_empty() {
            return;
        }
        self.view.clamp(self.viewport, self.glyph.size());
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Edits
    // ═══════════════════════════════════════════════════════════════════════

    /// Apply `kind` to the glyph and record it.
    ///
    /// Edits without effect are refused before anything is touched.
    pub fn apply(&mut self, kind: GlyphEditKind) -> Result<()> {
        let edit = GlyphEdit::new(self.id, kind);
        if edit.is_empty() {
            return Err(EngineError::invalid_argument("edit has no effect"));
        }
        edit.redo(&mut self.glyph)?;
        self.history.record(edit)?;
        self.set_dirty(true);
        Ok(())
    }

    /// Record an edit whose effect is already visible in the glyph, as
    /// happens at the end of a paint gesture.
    pub fn record(&mut self, kind: GlyphEditKind) -> Result<()> {
        self.history.record(GlyphEdit::new(self.id, kind))
    }

    pub fn undo(&mut self) -> Result<()> {
        self.history.undo(&mut self.glyph)?;
        self.after_replay();
        Ok(())
    }

    pub fn redo(&mut self) -> Result<()> {
        self.history.redo(&mut self.glyph)?;
        self.after_replay();
        Ok(())
    }

    fn after_replay(&mut self) {
        self.set_dirty(true);
        self.clamp_view();
    }

    /// Write one pixel without recording it.
    ///
    /// Returns the change when `pos` is inside the glyph, `None` otherwise.
    pub(crate) fn write_pixel_internal(&mut self, pos: Position, alpha: u8) -> Option<PixelChange> {
        let buffer = self.glyph.buffer_mut();
        let old = buffer.get_pt(pos)?;
        buffer.set_pt(pos, alpha);
        Some(PixelChange {
            x: pos.x,
            y: pos.y,
            old,
            new: alpha,
        })
    }

    /// Resize the glyph as one undoable step. Returns `false` if the size
    /// is unchanged.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<bool> {
        if width == self.glyph.width() && height == self.glyph.height() {
            return Ok(false);
        }
        self.apply(GlyphEditKind::Resize {
            old: self.glyph.buffer().clone(),
            new_width: width,
            new_height: height,
        })?;
        self.clamp_view();
        Ok(true)
    }

    /// Apply a property dialog result as one undoable step.
    ///
    /// The resize (if any) runs first, followed by the property changes.
    /// Returns `false` when nothing differs from the current glyph.
    pub fn commit_properties(&mut self, props: GlyphProperties) -> Result<bool> {
        if props.width < 0 || props.height < 0 {
            return Err(EngineError::InvalidDimensions {
                width: props.width,
                height: props.height,
            });
        }

        let current = self.glyph.properties();
        let mut edits = Vec::new();
        if props.width != current.width || props.height != current.height {
            edits.push(GlyphEditKind::Resize {
                old: self.glyph.buffer().clone(),
                new_width: props.width,
                new_height: props.height,
            });
        }
        if props.value != current.value {
            edits.push(GlyphEditKind::SetProperty(PropertyChange::Value {
                old: current.value,
                new: props.value,
            }));
        }
        if props.is_whitespace != current.is_whitespace {
            edits.push(GlyphEditKind::SetProperty(PropertyChange::Whitespace {
                old: current.is_whitespace,
                new: props.is_whitespace,
            }));
        }
        if props.offset_y != current.offset_y {
            edits.push(GlyphEditKind::SetProperty(PropertyChange::OffsetY {
                old: current.offset_y,
                new: props.offset_y,
            }));
        }

        let kind = match edits.len() {
            0 => return Ok(false),
            1 => edits.remove(0),
            _ => GlyphEditKind::Atomic {
                description: "Change glyph properties".to_string(),
                edits,
            },
        };
        self.apply(kind)?;
        self.clamp_view();
        Ok(true)
    }

    /// Replace the horizontal offset pairs as one undoable step.
    pub fn set_offset_x(&mut self, offset_x: Vec<(i32, i32)>) -> Result<bool> {
        if offset_x.as_slice() == self.glyph.offset_x() {
            return Ok(false);
        }
        self.apply(GlyphEditKind::SetProperty(PropertyChange::OffsetX {
            old: self.glyph.offset_x().to_vec(),
            new: offset_x,
        }))?;
        Ok(true)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Rendering
    // ═══════════════════════════════════════════════════════════════════════

    /// RGBA image of the glyph in `color`, alpha taken from the pixels.
    ///
    /// Whitespace glyphs render fully transparent.
    pub fn render_rgba(&self, color: [u8; 3]) -> Vec<u8> {
        let data = self.glyph.data();
        let mut result = vec![0; data.len() * 4];
        if self.glyph.is_whitespace() {
            return result;
        }
        for (dst, &alpha) in result.chunks_exact_mut(4).zip(data) {
            dst.copy_from_slice(&[color[0], color[1], color[2], alpha]);
        }
        result
    }
}
