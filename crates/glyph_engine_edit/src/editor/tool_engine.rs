//! Pointer handling for the glyph tools
//!
//! | Tool    | Press                      | Drag                               | Release        |
//! |---------|----------------------------|------------------------------------|----------------|
//! | Move    | remember pan anchor        | pan by `round(delta / zoom)`       | clear anchor   |
//! | Pencil  | paint pixel                | paint line from last point         | record stroke  |
//! | Eraser  | clear pixel                | clear line from last point         | record stroke  |
//! | Picker  | take alpha from the pixel  | -                                  | clear anchor   |
//! | Zoom    | left: zoom in, right: out  | -                                  | -              |
//! | Select  | -                          | -                                  | -              |
//!
//! Writes outside the glyph are dropped silently, a drag that leaves the
//! canvas keeps going.

use glyph_engine::Position;

use crate::brushes::LineRasterizer;
use crate::glyph_edit::{GlyphEditKind, PixelChange};
use crate::tools::{Tool, ToolColor};
use crate::Result;

use super::{EditorEvents, GlyphCanvas, PointerButton, PointerEvent};

/// State of one press/drag/release interaction
#[derive(Debug)]
struct Gesture {
    /// Tool that started the gesture, switching tools mid-drag does not
    /// change it
    tool: Tool,
    anchor_view: Position,
    anchor_pan: Position,
    /// Last sampled buffer point, may lie outside the glyph
    last_point: Position,
    changes: Vec<PixelChange>,
    dirtied: bool,
}

#[derive(Debug, Default)]
pub struct ToolEngine {
    tool: Tool,
    color: ToolColor,
    gesture: Option<Gesture>,
}

impl ToolEngine {
    pub fn new(tool: Tool, color: ToolColor) -> Self {
        Self { tool, color, gesture: None }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Returns `true` if the tool changed. A running gesture finishes with
    /// the tool it was started with.
    pub fn set_tool(&mut self, tool: Tool) -> bool {
        if self.tool == tool {
            return false;
        }
        log::debug!("tool {} -> {}", self.tool.name(), tool.name());
        self.tool = tool;
        true
    }

    pub fn color(&self) -> ToolColor {
        self.color
    }

    pub fn set_rgb(&mut self, rgb: [u8; 3]) -> bool {
        self.color.set_rgb(rgb)
    }

    pub fn set_alpha(&mut self, alpha: u8) -> bool {
        self.color.set_alpha(alpha)
    }

    pub fn is_gesture_active(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn on_press(&mut self, canvas: &mut GlyphCanvas, event: PointerEvent, events: &mut dyn EditorEvents) -> Result<()> {
        if self.gesture.is_some() {
            log::debug!("press without release, finishing previous gesture");
            self.on_release(canvas)?;
        }

        let mut gesture = Gesture {
            tool: self.tool,
            anchor_view: event.position,
            anchor_pan: canvas.view().pan(),
            last_point: canvas.point_at(event.position),
            changes: Vec::new(),
            dirtied: false,
        };

        match self.tool {
            Tool::Move | Tool::Select => {}
            Tool::Pencil | Tool::Eraser => {
                let start = gesture.last_point;
                let alpha = paint_alpha(self.tool, self.color);
                paint(canvas, &mut gesture, start, alpha, events);
            }
            Tool::Picker => self.pick(canvas, event.position, events),
            Tool::Zoom => match event.button {
                PointerButton::Left => {
                    canvas.zoom_in();
                }
                PointerButton::Right => {
                    canvas.zoom_out();
                }
                PointerButton::Middle => {}
            },
        }

        self.gesture = Some(gesture);
        Ok(())
    }

    pub fn on_drag(&mut self, canvas: &mut GlyphCanvas, event: PointerEvent, events: &mut dyn EditorEvents) {
        let color = self.color;
        let Some(gesture) = self.gesture.as_mut() else {
            return;
        };

        match gesture.tool {
            Tool::Move => {
                let delta = event.position - gesture.anchor_view;
                let pan = canvas.view().dragged_pan(gesture.anchor_pan, delta);
                canvas.set_pan(pan);
            }
            Tool::Pencil | Tool::Eraser => {
                let point = canvas.point_at(event.position);
                if point == gesture.last_point {
                    return;
                }
                let alpha = paint_alpha(gesture.tool, color);
                // the start point was painted by the previous sample
                for p in LineRasterizer::new(gesture.last_point, point).skip(1) {
                    paint(canvas, gesture, p, alpha, events);
                }
                gesture.last_point = point;
            }
            Tool::Picker | Tool::Zoom | Tool::Select => {}
        }
    }

    /// End the current gesture. A paint stroke becomes one history record.
    pub fn on_release(&mut self, canvas: &mut GlyphCanvas) -> Result<()> {
        let Some(gesture) = self.gesture.take() else {
            return Ok(());
        };
        if !gesture.tool.is_paint_tool() || gesture.changes.is_empty() {
            return Ok(());
        }
        log::debug!("{} stroke with {} pixel(s) on {}", gesture.tool.name(), gesture.changes.len(), canvas.id());
        canvas.record(GlyphEditKind::PixelWrite {
            erase: gesture.tool == Tool::Eraser,
            changes: gesture.changes,
        })
    }

    fn pick(&mut self, canvas: &GlyphCanvas, view_pos: Position, events: &mut dyn EditorEvents) {
        let Some(alpha) = canvas.pixel_at(view_pos).and_then(|p| canvas.glyph().buffer().get_pt(p)) else {
            return;
        };
        if self.color.set_alpha(alpha) {
            log::debug!("picked alpha {alpha}");
            events.on_alpha_picked(alpha);
        }
    }
}

fn paint_alpha(tool: Tool, color: ToolColor) -> u8 {
    if tool == Tool::Eraser {
        0
    } else {
        color.alpha()
    }
}

fn paint(canvas: &mut GlyphCanvas, gesture: &mut Gesture, point: Position, alpha: u8, events: &mut dyn EditorEvents) {
    let Some(change) = canvas.write_pixel_internal(point, alpha) else {
        log::trace!("skip {point} outside {}", canvas.glyph().size());
        return;
    };
    log::trace!("paint {point} = {alpha}");
    if !gesture.dirtied {
        gesture.dirtied = true;
        if canvas.set_dirty(true) {
            events.on_dirty_changed(canvas.id(), true);
        }
    }
    if change.old != change.new {
        gesture.changes.push(change);
    }
}
