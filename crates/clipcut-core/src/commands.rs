// crates/clipcut-core/src/commands.rs
//
// Every user action in ClipCut is expressed as an EditorCommand.
// Panels emit these; app.rs processes them after the UI pass.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    // ── Source ───────────────────────────────────────────────────────────────
    /// Show the open-file dialog. Emitted by the "Choose video" button.
    PickSource,
    /// Open `path` directly (dialog result or a file dropped on the window).
    OpenSource(PathBuf),

    // ── Range marks ──────────────────────────────────────────────────────────
    /// Start slider moved to this many seconds.
    DragStart(f64),
    /// End slider moved to this many seconds.
    DragEnd(f64),

    // ── Playback ─────────────────────────────────────────────────────────────
    TogglePlay,

    // ── Export ───────────────────────────────────────────────────────────────
    /// Show the save dialog, then hand the marked range to the export worker.
    PickExportDestination,
}
