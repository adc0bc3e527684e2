//! Tool definitions for glyph editing
//!
//! The active tool only changes through an explicit selection, except that
//! closing the last open canvas falls back to [`Tool::Move`].

use glyph_engine::Rgba;
use serde::{Deserialize, Serialize};

/// Available editing tools
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tool {
    /// Drag the view around
    #[default]
    Move,
    /// Reserved, does not touch pixels
    Select,
    /// Paint pixels with the tool alpha
    Pencil,
    /// Clear pixels to zero alpha
    Eraser,
    /// Take the tool alpha from the canvas
    Picker,
    /// Left click zooms in, right click zooms out
    Zoom,
}

pub const ALL_TOOLS: [Tool; 6] = [Tool::Move, Tool::Select, Tool::Pencil, Tool::Eraser, Tool::Picker, Tool::Zoom];

impl Tool {
    /// Get the icon filename (without extension) for this tool
    pub fn icon(&self) -> &'static str {
        match self {
            Tool::Move => "move",
            Tool::Select => "select",
            Tool::Pencil => "pencil",
            Tool::Eraser => "eraser",
            Tool::Picker => "dropper",
            Tool::Zoom => "zoom",
        }
    }

    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Move => "Move",
            Tool::Select => "Select",
            Tool::Pencil => "Pencil",
            Tool::Eraser => "Eraser",
            Tool::Picker => "Picker",
            Tool::Zoom => "Zoom",
        }
    }

    /// Get the tooltip text
    pub fn tooltip(&self) -> &'static str {
        match self {
            Tool::Move => "Drag to move the glyph in the view",
            Tool::Select => "Select an area",
            Tool::Pencil => "Draw pixels with the current alpha",
            Tool::Eraser => "Erase pixels",
            Tool::Picker => "Pick the alpha value of a pixel",
            Tool::Zoom => "Left click to zoom in, right click to zoom out",
        }
    }

    /// Get the keyboard shortcut
    pub fn shortcut(&self) -> Option<char> {
        match self {
            Tool::Move => Some('m'),
            Tool::Select => Some('s'),
            Tool::Pencil => Some('p'),
            Tool::Eraser => Some('e'),
            Tool::Picker => Some('i'),
            Tool::Zoom => Some('z'),
        }
    }

    /// Tool bound to a keyboard shortcut
    pub fn from_shortcut(ch: char) -> Option<Tool> {
        let ch = ch.to_ascii_lowercase();
        ALL_TOOLS.into_iter().find(|tool| tool.shortcut() == Some(ch))
    }

    /// Check if this tool writes pixels
    pub fn is_paint_tool(&self) -> bool {
        matches!(self, Tool::Pencil | Tool::Eraser)
    }

    /// Check if this tool needs drag tracking
    pub fn needs_drag(&self) -> bool {
        matches!(self, Tool::Move | Tool::Pencil | Tool::Eraser)
    }
}

/// Drawing color with independently settable RGB and alpha.
///
/// RGB is the font-wide color pushed in by the host, alpha comes from the
/// alpha control or the picker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToolColor {
    rgb: [u8; 3],
    alpha: u8,
}

impl Default for ToolColor {
    fn default() -> Self {
        Self { rgb: [0, 0, 0], alpha: 255 }
    }
}

impl ToolColor {
    pub fn new(rgb: [u8; 3], alpha: u8) -> Self {
        Self { rgb, alpha }
    }

    pub fn rgb(&self) -> [u8; 3] {
        self.rgb
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    /// Returns `true` if the value changed.
    pub fn set_rgb(&mut self, rgb: [u8; 3]) -> bool {
        if self.rgb == rgb {
            return false;
        }
        self.rgb = rgb;
        true
    }

    /// Returns `true` if the value changed.
    pub fn set_alpha(&mut self, alpha: u8) -> bool {
        if self.alpha == alpha {
            return false;
        }
        self.alpha = alpha;
        true
    }

    /// Opaque base color
    pub fn base(&self) -> Rgba {
        Rgba::from_rgb(self.rgb, 255)
    }

    /// Color shown in the swatch and used for previews
    pub fn swatch(&self) -> Rgba {
        let base = self.base();
        if self.alpha == 255 {
            base
        } else {
            base.with_alpha(self.alpha)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tool() {
        assert_eq!(Tool::default(), Tool::Move);
    }

    #[test]
    fn test_shortcuts_unique() {
        for tool in ALL_TOOLS {
            let ch = tool.shortcut().unwrap();
            assert_eq!(Tool::from_shortcut(ch), Some(tool));
        }
        assert_eq!(Tool::from_shortcut('P'), Some(Tool::Pencil));
        assert_eq!(Tool::from_shortcut('x'), None);
    }

    #[test]
    fn test_swatch_opaque_is_base() {
        let color = ToolColor::new([10, 20, 30], 255);
        assert_eq!(color.swatch(), Rgba::new(10, 20, 30, 255));
    }

    #[test]
    fn test_swatch_translucent() {
        let mut color = ToolColor::new([10, 20, 30], 255);
        assert!(color.set_alpha(100));
        assert!(!color.set_alpha(100));
        assert_eq!(color.swatch(), Rgba::new(10, 20, 30, 100));
        assert_eq!(color.base(), Rgba::new(10, 20, 30, 255));
    }
}
