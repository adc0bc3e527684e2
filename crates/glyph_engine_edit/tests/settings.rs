//! Tests for persisted editor settings

use std::path::PathBuf;

use glyph_engine_edit::{EditorSettings, EngineError, Rgba, Tool, MAX_ZOOM};
use pretty_assertions::assert_eq;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("glyph_engine_edit_{}_{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_defaults() {
    let settings = EditorSettings::default();
    assert_eq!(settings.default_zoom, 1);
    assert_eq!(settings.tool_alpha, 255);
    assert_eq!(settings.canvas_background, [210, 210, 210]);
    assert_eq!(settings.border_color(), Some(Rgba::opaque(155, 155, 155)));
    assert_eq!(settings.last_tool, Tool::Move);
}

#[test]
fn test_store_and_load() {
    let dir = scratch_dir("roundtrip");
    let path = dir.join(EditorSettings::FILE_NAME);

    let settings = EditorSettings {
        default_zoom: 8,
        tool_alpha: 64,
        font_color: [10, 20, 30],
        show_canvas_border: false,
        last_tool: Tool::Eraser,
        ..Default::default()
    };
    settings.store_to(&path).unwrap();
    assert_eq!(EditorSettings::load_from(&path).unwrap(), settings);
    assert_eq!(EditorSettings::load_from(&path).unwrap().border_color(), None);

    // no temp file is left behind
    let entries: Vec<_> = std::fs::read_dir(&dir).unwrap().collect();
    assert_eq!(entries.len(), 1);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_missing_keys_use_defaults() {
    let dir = scratch_dir("partial");
    let path = dir.join(EditorSettings::FILE_NAME);
    std::fs::write(&path, "tool_alpha = 3\nlast_tool = \"Picker\"\n").unwrap();

    let settings = EditorSettings::load_from(&path).unwrap();
    assert_eq!(settings.tool_alpha, 3);
    assert_eq!(settings.last_tool, Tool::Picker);
    assert_eq!(settings.default_zoom, 1);
    assert_eq!(settings.backdrop_cache_capacity, EditorSettings::default().backdrop_cache_capacity);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_out_of_range_values_are_normalized() {
    let dir = scratch_dir("normalize");
    let path = dir.join(EditorSettings::FILE_NAME);
    std::fs::write(&path, "default_zoom = 500\nbackdrop_cache_capacity = 0\n").unwrap();

    let settings = EditorSettings::load_from(&path).unwrap();
    assert_eq!(settings.default_zoom, MAX_ZOOM);
    assert_eq!(settings.backdrop_cache_capacity, 1);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_load_errors() {
    let dir = scratch_dir("errors");
    assert!(matches!(EditorSettings::load_from(dir.join("missing.toml")), Err(EngineError::Io(_))));

    let path = dir.join(EditorSettings::FILE_NAME);
    std::fs::write(&path, "tool_alpha = \"lots\"").unwrap();
    assert!(matches!(EditorSettings::load_from(&path), Err(EngineError::ConfigParse(_))));
    let _ = std::fs::remove_dir_all(&dir);
}
