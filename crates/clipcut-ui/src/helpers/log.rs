// crates/clipcut-ui/src/helpers/log.rs
//
// Logging setup for the whole process (UI thread and export thread alike).
//
// In release builds with `windows_subsystem = "windows"` (double-click launch)
// there is no console attached, so stderr output is silently discarded. Every
// event therefore also goes to a temp file.
//
// File: <temp dir>/clipcut.log, append-only, shared across sessions.
//
// Filtering: `RUST_LOG` when set, otherwise `info`.
//
// Usage, anywhere in the workspace:
//   tracing::info!(path = %p.display(), "opened");
//   tracing::warn!(%job_id, "export already running");

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_FILE: &str = "clipcut.log";

/// Where the log file lives.
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join(LOG_FILE)
}

/// Install the global subscriber. Safe to call twice; the second call is a
/// no-op. If the log file can't be opened only stderr is used.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path())
        .ok()
        .map(|f| {
            fmt::layer()
                .with_ansi(false)
                .with_thread_names(true)
                .with_writer(Mutex::new(f))
        });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(file_layer)
        .try_init();
}
