//! # Logging Setup
//!
//! Installs the global `tracing` subscriber.
//!
//! ```text
//! tracing macros (all crates)
//!        │
//!        ▼
//! ┌──────────────────────┐     ┌───────────────────────────────────────┐
//! │ EnvFilter            │────►│ fmt layer, no ANSI                    │
//! │ RUST_LOG, else       │     │ 2025-01-31 12:00:00  INFO tally_...   │
//! │ [logging] filter     │     │ writer: Mutex<File> logs/app.log      │
//! └──────────────────────┘     │ fallback: stderr                      │
//!                              └───────────────────────────────────────┘
//! ```
//!
//! Each event is written under the file mutex, so lines from the worker
//! and the controller never interleave and keep their emission order.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Local;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::state::LoggingSettings;

/// Local wall-clock timestamps, `YYYY-mm-dd HH:MM:SS`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTimestamp;

impl FormatTime for LocalTimestamp {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%d %H:%M:%S"))
    }
}

/// Where log output ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(PathBuf),
    /// The log file could not be opened; carries the reason.
    Stderr(String),
}

/// Opens `path` for appending, creating parent directories first.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Installs the subscriber. Calling it twice keeps the first subscriber.
pub fn init_logging(settings: &LoggingSettings) -> LogTarget {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let (writer, target) = match open_log_file(&settings.log_path) {
        Ok(file) => (
            BoxMakeWriter::new(Mutex::new(file)),
            LogTarget::File(settings.log_path.clone()),
        ),
        Err(e) => {
            eprintln!(
                "Warning: cannot open log file {}: {}. Logging to stderr.",
                settings.log_path.display(),
                e
            );
            (BoxMakeWriter::new(io::stderr), LogTarget::Stderr(e.to_string()))
        }
    };

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_timer(LocalTimestamp)
                .with_writer(writer),
        )
        .try_init();

    if installed.is_err() {
        tracing::debug!("Global subscriber already set, keeping it");
    }

    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};

    #[test]
    fn test_open_log_file_creates_parents_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("logs").join("app.log");

        open_log_file(&path).unwrap().write_all(b"first\n").unwrap();
        open_log_file(&path).unwrap().write_all(b"second\n").unwrap();

        let mut contents = String::new();
        File::open(&path).unwrap().read_to_string(&mut contents).unwrap();
        assert_eq!(contents, "first\nsecond\n");
    }

    #[test]
    fn test_unopenable_log_path_falls_back_to_stderr() {
        let dir = tempfile::tempdir().unwrap();
        // a directory cannot be opened as a log file
        let settings = LoggingSettings {
            log_path: dir.path().to_path_buf(),
            filter: "info".into(),
        };

        assert!(matches!(init_logging(&settings), LogTarget::Stderr(_)));
    }
}
