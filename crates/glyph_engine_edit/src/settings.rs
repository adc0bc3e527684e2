use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use glyph_engine::{Rgba, MAX_ZOOM, MIN_ZOOM};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::backdrop::DEFAULT_BACKDROP_CAPACITY;
use crate::tools::Tool;
use crate::Result;

// =============================================================================
// Project directory constants
// =============================================================================

const PROJECT_QUALIFIER: &str = "dk";
const PROJECT_ORGANIZATION: &str = "martinu";
const PROJECT_APPLICATION: &str = "glyph_editor";

/// Lazily initialized project directories (computed once on first access)
pub(crate) static PROJECT_DIRS: Lazy<Option<directories::ProjectDirs>> =
    Lazy::new(|| directories::ProjectDirs::from(PROJECT_QUALIFIER, PROJECT_ORGANIZATION, PROJECT_APPLICATION));

// =============================================================================
// EditorSettings
// =============================================================================

/// Persisted editor options, stored in `settings.toml`.
///
/// Missing keys fall back to their defaults, so older files keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorSettings {
    #[serde(default = "default_zoom")]
    pub default_zoom: i32,

    #[serde(default = "default_alpha")]
    pub tool_alpha: u8,

    #[serde(default)]
    pub font_color: [u8; 3],

    #[serde(default = "default_canvas_background")]
    pub canvas_background: [u8; 3],

    #[serde(default = "default_canvas_border")]
    pub canvas_border: [u8; 3],

    #[serde(default = "default_true")]
    pub show_canvas_border: bool,

    #[serde(default = "default_backdrop_cache_capacity")]
    pub backdrop_cache_capacity: usize,

    #[serde(default)]
    pub last_tool: Tool,
}

fn default_zoom() -> i32 {
    MIN_ZOOM
}

fn default_alpha() -> u8 {
    255
}

fn default_canvas_background() -> [u8; 3] {
    [210, 210, 210]
}

fn default_canvas_border() -> [u8; 3] {
    [155, 155, 155]
}

fn default_true() -> bool {
    true
}

fn default_backdrop_cache_capacity() -> usize {
    DEFAULT_BACKDROP_CAPACITY
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            default_zoom: default_zoom(),
            tool_alpha: default_alpha(),
            font_color: [0, 0, 0],
            canvas_background: default_canvas_background(),
            canvas_border: default_canvas_border(),
            show_canvas_border: true,
            backdrop_cache_capacity: default_backdrop_cache_capacity(),
            last_tool: Tool::default(),
        }
    }
}

impl EditorSettings {
    pub const FILE_NAME: &'static str = "settings.toml";

    /// Load settings from the platform config directory.
    ///
    /// Never fails: problems are logged and the defaults are used instead.
    pub fn load() -> Self {
        let Some(file) = Self::config_file() else {
            return Self::default();
        };
        if !file.exists() {
            return Self::default();
        }
        match Self::load_from(&file) {
            Ok(settings) => settings,
            Err(err) => {
                log::error!("Error reading settings file {:?}: {}", file, err);
                Self::default()
            }
        }
    }

    /// Store settings in the platform config directory, logging failures.
    pub fn store(&self) {
        let Some(config_dir) = Self::config_dir() else {
            log::error!("Cannot determine config directory for saving settings");
            return;
        };
        if let Err(err) = fs::create_dir_all(&config_dir) {
            log::error!("Can't create configuration directory {:?}: {}", config_dir, err);
            return;
        }
        if let Err(err) = self.store_to(config_dir.join(Self::FILE_NAME)) {
            log::error!("Error writing settings file: {}", err);
        }
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let txt = fs::read_to_string(path)?;
        let settings = toml::from_str::<EditorSettings>(&txt)?;
        Ok(settings.normalized())
    }

    /// Atomically write settings to `path` (write to temp, then rename).
    pub fn store_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = toml::to_string_pretty(self)?;
        let file_name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_else(|| Self::FILE_NAME.to_string());
        let temp_path = path.with_file_name(format!(".{file_name}.tmp"));

        let write_result = (|| -> std::io::Result<()> {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(text.as_bytes())?;
            file.sync_all()?;
            Ok(())
        })();

        if let Err(err) = write_result.and_then(|_| fs::rename(&temp_path, path)) {
            let _ = fs::remove_file(&temp_path);
            return Err(err.into());
        }
        Ok(())
    }

    /// Keep values in a sane range even if the file was edited by hand.
    pub fn normalized(mut self) -> Self {
        self.default_zoom = self.default_zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.backdrop_cache_capacity = self.backdrop_cache_capacity.max(1);
        self
    }

    pub fn font_rgba(&self) -> Rgba {
        Rgba::from_rgb(self.font_color, 255)
    }

    /// Border drawn around the glyph, `None` when disabled
    pub fn border_color(&self) -> Option<Rgba> {
        self.show_canvas_border.then(|| Rgba::from_rgb(self.canvas_border, 255))
    }

    pub fn config_dir() -> Option<PathBuf> {
        PROJECT_DIRS.as_ref().map(|p| p.config_dir().to_path_buf())
    }

    pub fn config_file() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join(Self::FILE_NAME))
    }

    pub fn log_dir() -> Option<PathBuf> {
        Self::config_dir()
    }
}
