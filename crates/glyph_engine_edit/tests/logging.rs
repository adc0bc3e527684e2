//! Test for the file logger bootstrap

use glyph_engine_edit::logging::start_file_logger;

#[test]
fn test_file_logger_writes_log_file() {
    let dir = std::env::temp_dir().join(format!("glyph_engine_edit_log_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);

    let handle = start_file_logger(&dir, "glyph_editor").unwrap();
    log::info!("logger started");
    handle.flush();
    drop(handle);

    let names: Vec<String> = std::fs::read_dir(&dir)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    assert!(names.iter().any(|name| name.starts_with("glyph_editor") && name.ends_with(".log")), "{names:?}");
    let _ = std::fs::remove_dir_all(&dir);
}
