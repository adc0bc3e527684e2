//! Coordinator over the open font and all open glyph canvases
//!
//! The editor owns the [`Font`], every [`GlyphCanvas`], the single
//! [`ToolEngine`] they share and the backdrop cache used to render them.
//! Pointer input goes to the active canvas. History notifications are
//! queued while an operation runs and handed to the host once it is
//! complete.
//!
//! A canvas opened from the font edits a copy of the font glyph. The copy is
//! written back after every operation, and a canvas turning dirty makes the
//! font dirty.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;

use glyph_engine::{Font, Glyph, GlyphMove, GlyphProperties, Rgba, Size, MIN_ZOOM};

use crate::backdrop::{Backdrop, BackdropCache};
use crate::glyph_edit::GlyphEdit;
use crate::history::{HistoryEvent, HistoryEventKind};
use crate::settings::EditorSettings;
use crate::tools::{Tool, ToolColor};
use crate::{EngineError, Result};

use super::{CanvasId, EditorEvents, GlyphCanvas, PointerEvent, ToolEngine};

type HistoryQueue = Rc<RefCell<VecDeque<(CanvasId, HistoryEventKind, isize)>>>;

/// What a canvas looked like before an operation, to find out what to
/// report afterwards.
struct Snapshot {
    id: CanvasId,
    dirty: bool,
    size: Size,
}

pub struct GlyphEditor<S: EditorEvents> {
    canvases: Vec<GlyphCanvas>,
    active: Option<usize>,
    next_id: u32,
    engine: ToolEngine,
    backdrops: BackdropCache,
    font: Option<Font>,
    default_zoom: i32,
    border_color: Option<Rgba>,
    pending: HistoryQueue,
    events: S,
}

impl<S: EditorEvents> GlyphEditor<S> {
    pub fn new(events: S, backdrops: BackdropCache) -> Self {
        Self {
            canvases: Vec::new(),
            active: None,
            next_id: 0,
            engine: ToolEngine::default(),
            backdrops,
            font: None,
            default_zoom: MIN_ZOOM,
            border_color: None,
            pending: Rc::new(RefCell::new(VecDeque::new())),
            events,
        }
    }

    /// Editor set up from persisted settings. The last used tool only comes
    /// back once a canvas is open.
    pub fn with_settings(settings: &EditorSettings, events: S) -> Self {
        let settings = settings.clone().normalized();
        let mut editor = Self::new(events, BackdropCache::new(settings.backdrop_cache_capacity));
        editor.engine = ToolEngine::new(Tool::Move, ToolColor::new(settings.font_color, settings.tool_alpha));
        editor.default_zoom = settings.default_zoom;
        editor.border_color = settings.border_color();
        editor
    }

    /// Copy the current tool and color back into `settings`.
    pub fn store_settings(&self, settings: &mut EditorSettings) {
        let color = self.engine.color();
        settings.font_color = color.rgb();
        settings.tool_alpha = color.alpha();
        settings.last_tool = self.engine.tool();
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Getters
    // ═══════════════════════════════════════════════════════════════════════

    pub fn events(&self) -> &S {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut S {
        &mut self.events
    }

    pub fn tool(&self) -> Tool {
        self.engine.tool()
    }

    pub fn color(&self) -> ToolColor {
        self.engine.color()
    }

    pub fn canvas_count(&self) -> usize {
        self.canvases.len()
    }

    pub fn canvases(&self) -> impl Iterator<Item = &GlyphCanvas> {
        self.canvases.iter()
    }

    pub fn canvas(&self, id: CanvasId) -> Option<&GlyphCanvas> {
        self.canvases.iter().find(|c| c.id() == id)
    }

    pub fn active_id(&self) -> Option<CanvasId> {
        self.active_canvas().map(|c| c.id())
    }

    pub fn active_canvas(&self) -> Option<&GlyphCanvas> {
        self.active.and_then(|i| self.canvases.get(i))
    }

    pub fn can_undo(&self) -> bool {
        self.active_canvas().is_some_and(|c| c.history().can_undo())
    }

    pub fn can_redo(&self) -> bool {
        self.active_canvas().is_some_and(|c| c.history().can_redo())
    }

    fn index_of(&self, id: CanvasId) -> Result<usize> {
        self.canvases
            .iter()
            .position(|c| c.id() == id)
            .ok_or_else(|| EngineError::invalid_argument(format!("{id} is not open")))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Canvases
    // ═══════════════════════════════════════════════════════════════════════

    /// Open `glyph` in a new canvas and make it the active one.
    pub fn open_canvas(&mut self, glyph: Glyph) -> CanvasId {
        let id = CanvasId::new(self.next_id);
        self.next_id += 1;

        let mut canvas = GlyphCanvas::new(id, glyph, self.default_zoom);
        canvas.set_border_color(self.border_color);
        let queue = self.pending.clone();
        canvas
            .history_mut()
            .add_listener(move |event: &HistoryEvent<'_, GlyphEdit>| queue.borrow_mut().push_back((id, event.kind, event.position)));

        log::debug!("open {id} for glyph '{}'", canvas.glyph().name());
        self.finish_gesture_quietly();
        self.canvases.push(canvas);
        self.active = Some(self.canvases.len() - 1);
        id
    }

    /// Close a canvas and hand its glyph back. Closing the last canvas
    /// switches to [`Tool::Move`].
    pub fn close_canvas(&mut self, id: CanvasId) -> Result<Glyph> {
        let index = self.index_of(id)?;
        if self.active == Some(index) {
            self.finish_gesture()?;
        }
        self.sync_font_glyph(index);

        let canvas = self.canvases.remove(index);
        self.active = match self.active {
            _ if self.canvases.is_empty() => None,
            Some(active) if active > index => Some(active - 1),
            Some(active) if active == index => Some(index.min(self.canvases.len() - 1)),
            other => other,
        };
        // records of a closed canvas are not reported anymore
        self.pending.borrow_mut().retain(|(canvas_id, _, _)| *canvas_id != id);

        if self.canvases.is_empty() {
            self.engine.set_tool(Tool::Move);
        }
        log::debug!("closed {id}");
        Ok(canvas.into_glyph())
    }

    pub fn set_active(&mut self, id: CanvasId) -> Result<()> {
        let index = self.index_of(id)?;
        if self.active != Some(index) {
            self.finish_gesture()?;
            self.active = Some(index);
        }
        Ok(())
    }

    pub fn set_viewport(&mut self, id: CanvasId, viewport: Size) -> Result<()> {
        let index = self.index_of(id)?;
        self.canvases[index].set_viewport(viewport);
        Ok(())
    }

    /// Clear the dirty flag after the host saved the glyph of `id`.
    pub fn mark_saved(&mut self, id: CanvasId) -> Result<()> {
        let index = self.index_of(id)?;
        if self.canvases[index].mark_saved() {
            self.events.on_dirty_changed(id, false);
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Font
    // ═══════════════════════════════════════════════════════════════════════

    pub fn font(&self) -> Option<&Font> {
        self.font.as_ref()
    }

    /// Replace the open font. All canvases are closed first, so the
    /// returned previous font holds every change made to its glyphs.
    pub fn set_font(&mut self, font: Option<Font>) -> Result<Option<Font>> {
        let open: Vec<CanvasId> = self.canvases.iter().map(|c| c.id()).collect();
        for id in open {
            self.close_canvas(id)?;
        }
        if let Some(font) = &font {
            log::info!("opened font '{}' with {} glyph(s)", font.name(), font.len());
        }
        Ok(std::mem::replace(&mut self.font, font))
    }

    /// Open the font glyph at `index`, or activate its canvas if it is
    /// already open.
    pub fn open_font_glyph(&mut self, index: usize) -> Result<CanvasId> {
        let font = self.font.as_ref().ok_or_else(no_font)?;
        let (Some(key), Some(glyph)) = (font.key_at(index), font.glyph(index)) else {
            return Err(EngineError::invalid_argument(format!("glyph index {index} out of range 0..{}", font.len())));
        };
        let glyph = glyph.clone();

        if let Some(id) = self.canvases.iter().find(|c| c.font_glyph() == Some(key)).map(|c| c.id()) {
            self.set_active(id)?;
            return Ok(id);
        }
        let id = self.open_canvas(glyph);
        if let Some(canvas) = self.canvases.last_mut() {
            canvas.set_font_glyph(Some(key));
        }
        Ok(id)
    }

    /// Append `glyph` to the font and open it.
    pub fn add_glyph(&mut self, glyph: Glyph) -> Result<CanvasId> {
        let font = self.font.as_mut().ok_or_else(no_font)?;
        let was_dirty = font.is_dirty();
        font.add_glyph(glyph);
        let index = font.len() - 1;
        self.report_font(was_dirty);
        self.open_font_glyph(index)
    }

    /// Delete the font glyphs at `indices` and close the canvases editing
    /// them. Returns the deleted glyphs in list order.
    pub fn delete_glyphs(&mut self, indices: &[usize]) -> Result<Vec<Glyph>> {
        if self.font.is_none() {
            return Err(no_font());
        }
        self.sync_all_font_glyphs();
        let font = self.font.as_mut().ok_or_else(no_font)?;
        let was_dirty = font.is_dirty();
        let removed = font.remove_glyphs(indices)?;

        for (key, _) in &removed {
            let open: Vec<CanvasId> = self.canvases.iter().filter(|c| c.font_glyph() == Some(*key)).map(|c| c.id()).collect();
            for id in open {
                self.close_canvas(id)?;
            }
        }
        self.adopt_font_offsets();
        self.report_font(was_dirty);
        Ok(removed.into_iter().map(|(_, glyph)| glyph).collect())
    }

    /// Move the font glyphs at `indices`, see [`Font::move_glyphs`].
    pub fn move_glyphs(&mut self, indices: &[usize], target: GlyphMove) -> Result<bool> {
        if self.font.is_none() {
            return Err(no_font());
        }
        self.sync_all_font_glyphs();
        let font = self.font.as_mut().ok_or_else(no_font)?;
        let was_dirty = font.is_dirty();
        let moved = font.move_glyphs(indices, target)?;
        if moved {
            self.adopt_font_offsets();
            self.report_font(was_dirty);
        }
        Ok(moved)
    }

    pub fn set_font_name(&mut self, name: impl Into<String>) -> Result<bool> {
        let font = self.font.as_mut().ok_or_else(no_font)?;
        let was_dirty = font.is_dirty();
        let changed = font.set_name(name);
        self.report_font(was_dirty);
        Ok(changed)
    }

    pub fn set_font_height(&mut self, height: i32) -> Result<bool> {
        let font = self.font.as_mut().ok_or_else(no_font)?;
        let was_dirty = font.is_dirty();
        let changed = font.set_height(height)?;
        self.report_font(was_dirty);
        Ok(changed)
    }

    /// The host stored the font: clear the dirty flag of the font and of
    /// every canvas opened from it.
    pub fn mark_font_saved(&mut self) -> Result<()> {
        if self.font.is_none() {
            return Err(no_font());
        }
        self.finish_gesture()?;
        self.sync_all_font_glyphs();
        if let Some(font) = self.font.as_mut() {
            if font.mark_saved() {
                self.events.on_font_dirty_changed(false);
            }
        }
        for canvas in &mut self.canvases {
            if canvas.font_glyph().is_some() && canvas.mark_saved() {
                self.events.on_dirty_changed(canvas.id(), false);
            }
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Tool & Color
    // ═══════════════════════════════════════════════════════════════════════

    pub fn set_tool(&mut self, tool: Tool) -> bool {
        self.engine.set_tool(tool)
    }

    /// Toolbar behaviour: selecting the active tool again returns to
    /// [`Tool::Move`].
    pub fn toggle_tool(&mut self, tool: Tool) -> Tool {
        let next = if self.engine.tool() == tool { Tool::Move } else { tool };
        self.engine.set_tool(next);
        next
    }

    /// Font-wide color pushed in by the host.
    pub fn set_font_rgb(&mut self, rgb: [u8; 3]) -> bool {
        self.engine.set_rgb(rgb)
    }

    /// Alpha from the host's alpha control. Does not call
    /// [`EditorEvents::on_alpha_picked`].
    pub fn set_alpha(&mut self, alpha: u8) -> bool {
        self.engine.set_alpha(alpha)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Pointer Input
    // ═══════════════════════════════════════════════════════════════════════

    pub fn pointer_pressed(&mut self, event: PointerEvent) -> Result<()> {
        let Some(index) = self.active else {
            return Ok(());
        };
        // dirty changes are reported by the engine itself, once per gesture
        let result = self.engine.on_press(&mut self.canvases[index], event, &mut self.events);
        self.sync_font_glyph(index);
        self.flush_history();
        result
    }

    pub fn pointer_dragged(&mut self, event: PointerEvent) {
        let Some(index) = self.active else {
            return;
        };
        self.engine.on_drag(&mut self.canvases[index], event, &mut self.events);
        self.sync_font_glyph(index);
    }

    pub fn pointer_released(&mut self) -> Result<()> {
        self.finish_gesture()
    }

    /// Negative rotation zooms in, positive zooms out.
    pub fn mouse_wheel(&mut self, rotation: i32) -> bool {
        let Some(canvas) = self.active.and_then(|i| self.canvases.get_mut(i)) else {
            return false;
        };
        match rotation.signum() {
            -1 => canvas.zoom_in(),
            1 => canvas.zoom_out(),
            _ => false,
        }
    }

    fn finish_gesture(&mut self) -> Result<()> {
        let Some(index) = self.active else {
            return Ok(());
        };
        let result = self.engine.on_release(&mut self.canvases[index]);
        self.sync_font_glyph(index);
        self.flush_history();
        result
    }

    fn finish_gesture_quietly(&mut self) {
        if let Err(err) = self.finish_gesture() {
            log::warn!("could not record stroke: {err}");
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Edits
    // ═══════════════════════════════════════════════════════════════════════

    pub fn undo(&mut self) -> Result<()> {
        let Some(index) = self.active else {
            return Err(EngineError::no_pending("undo"));
        };
        self.finish_gesture()?;
        let snapshot = self.snapshot(index);
        let result = self.canvases[index].undo();
        self.report(snapshot);
        result
    }

    pub fn redo(&mut self) -> Result<()> {
        let Some(index) = self.active else {
            return Err(EngineError::no_pending("redo"));
        };
        self.finish_gesture()?;
        let snapshot = self.snapshot(index);
        let result = self.canvases[index].redo();
        self.report(snapshot);
        result
    }

    /// Apply a glyph properties dialog result to the active canvas.
    pub fn commit_properties(&mut self, props: GlyphProperties) -> Result<bool> {
        self.with_active(|canvas| canvas.commit_properties(props))
    }

    pub fn resize_glyph(&mut self, width: i32, height: i32) -> Result<bool> {
        self.with_active(|canvas| canvas.resize(width, height))
    }

    pub fn set_offset_x(&mut self, offset_x: Vec<(i32, i32)>) -> Result<bool> {
        self.with_active(|canvas| canvas.set_offset_x(offset_x))
    }

    fn with_active<T>(&mut self, op: impl FnOnce(&mut GlyphCanvas) -> Result<T>) -> Result<T> {
        let Some(index) = self.active else {
            return Err(EngineError::invalid_argument("no canvas is open"));
        };
        self.finish_gesture()?;
        let snapshot = self.snapshot(index);
        let result = op(&mut self.canvases[index]);
        self.report(snapshot);
        result
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Rendering
    // ═══════════════════════════════════════════════════════════════════════

    /// Checkerboard for the active glyph, sized after the unscaled glyph.
    ///
    /// The renderer tiles it across the zoomed glyph area (see
    /// [`Backdrop::tiles`]), so every zoom level shares one cache entry.
    pub fn active_backdrop(&mut self) -> Result<Option<Arc<Backdrop>>> {
        let Some(canvas) = self.active.and_then(|i| self.canvases.get(i)) else {
            return Ok(None);
        };
        let size = canvas.glyph().size();
        if size.is_empty() {
            return Ok(None);
        }
        self.backdrops.get(size.width, size.height).map(Some)
    }

    pub fn backdrops(&self) -> &BackdropCache {
        &self.backdrops
    }

    /// RGBA image of the active glyph in the current font color.
    pub fn render_active(&self) -> Option<Vec<u8>> {
        let rgb = self.engine.color().rgb();
        self.active_canvas().map(|canvas| canvas.render_rgba(rgb))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Notifications
    // ═══════════════════════════════════════════════════════════════════════

    fn snapshot(&self, index: usize) -> Snapshot {
        let canvas = &self.canvases[index];
        Snapshot {
            id: canvas.id(),
            dirty: canvas.is_dirty(),
            size: canvas.glyph().size(),
        }
    }

    /// Tell the host what changed on the canvas since `before` was taken.
    fn report(&mut self, before: Snapshot) {
        if let Some(index) = self.canvases.iter().position(|c| c.id() == before.id) {
            let canvas = &self.canvases[index];
            if canvas.is_dirty() != before.dirty {
                self.events.on_dirty_changed(before.id, canvas.is_dirty());
            }
            let glyph = canvas.glyph();
            if glyph.size() != before.size {
                self.events.on_glyph_resized(before.id, glyph.width(), glyph.height(), glyph.data());
            }
            self.sync_font_glyph(index);
        }
        self.flush_history();
    }

    /// Write the glyph of the canvas at `index` back into the font.
    fn sync_font_glyph(&mut self, index: usize) {
        let (Some(font), Some(canvas)) = (self.font.as_mut(), self.canvases.get(index)) else {
            return;
        };
        let Some(stored) = canvas.font_glyph().and_then(|key| font.glyph_by_key_mut(key)) else {
            return;
        };
        if *stored != *canvas.glyph() {
            *stored = canvas.glyph().clone();
        }
        if canvas.is_dirty() && font.set_dirty(true) {
            self.events.on_font_dirty_changed(true);
        }
    }

    fn sync_all_font_glyphs(&mut self) {
        for index in 0..self.canvases.len() {
            self.sync_font_glyph(index);
        }
    }

    /// Hand offset pairs rewritten by the font to the canvases editing them.
    fn adopt_font_offsets(&mut self) {
        let Some(font) = self.font.as_ref() else {
            return;
        };
        for canvas in &mut self.canvases {
            if let Some(glyph) = canvas.font_glyph().and_then(|key| font.glyph_by_key(key)) {
                canvas.adopt_offset_x(glyph.offset_x());
            }
        }
    }

    fn report_font(&mut self, was_dirty: bool) {
        if let Some(font) = self.font.as_ref() {
            if font.is_dirty() != was_dirty {
                self.events.on_font_dirty_changed(font.is_dirty());
            }
        }
    }

    fn flush_history(&mut self) {
        loop {
            let next = self.pending.borrow_mut().pop_front();
            let Some((id, kind, position)) = next else {
                break;
            };
            self.events.on_history_changed(id, kind, position);
        }
    }
}

fn no_font() -> EngineError {
    EngineError::invalid_argument("no font is open")
}
