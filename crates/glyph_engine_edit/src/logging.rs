use std::path::Path;

use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming};

use crate::{EngineError, Result};

/// Default log specification, overridable through `RUST_LOG`
pub const DEFAULT_LOG_SPEC: &str = "info";

/// Start logging into `<dir>/<basename>.log`.
///
/// The file is rotated at 64 KiB, three old files are kept and warnings are
/// mirrored to stderr. Logging stops when the returned handle is dropped.
pub fn start_file_logger(dir: impl AsRef<Path>, basename: &str) -> Result<LoggerHandle> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;
    Logger::try_with_env_or_str(DEFAULT_LOG_SPEC)
        .map_err(logger_error)?
        .log_to_file(FileSpec::default().directory(dir).basename(basename).suffix("log").suppress_timestamp())
        .rotate(Criterion::Size(64 * 1024), Naming::Numbers, Cleanup::KeepLogFiles(3))
        .duplicate_to_stderr(Duplicate::Warn)
        .start()
        .map_err(logger_error)
}

fn logger_error(err: flexi_logger::FlexiLoggerError) -> EngineError {
    EngineError::Logger { message: err.to_string() }
}
