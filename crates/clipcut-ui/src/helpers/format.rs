// crates/clipcut-ui/src/helpers/format.rs
//
// UI-layer string utilities that don't belong in clipcut-core.
//
// Time formatting lives in clipcut_core::helpers::time. This module holds
// the status-line texts and dialog defaults, which only mean something on
// screen.

use std::path::Path;

/// Status line after a source opens.
pub fn selected_file(path: &Path) -> String {
    format!("Selected file: {}", path.display())
}

/// Status line after an export completes.
pub const VIDEO_SAVED: &str = "Video saved";

pub fn export_failed(msg: &str) -> String {
    format!("Export failed: {msg}")
}

pub fn could_not_open(msg: &str) -> String {
    format!("Could not open: {msg}")
}

/// Default file name offered by the save dialog: `<stem>_trimmed.mp4`.
pub fn default_export_name(source: &Path) -> String {
    let stem = source.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "clip".to_string());
    format!("{stem}_trimmed.mp4")
}

/// Truncates `text` to fit within `max_px` using a per-character width
/// heuristic (≈ 6.5 px/char at the default body size). Keeps the tail, since
/// the file name at the end of a long path is the useful part. Prepends "…"
/// when truncated.
pub fn fit_path_label(text: &str, max_px: f32) -> String {
    const AVG_CHAR_PX: f32 = 6.5;
    const ELLIPSIS: &str = "…";
    let max_chars = (max_px / AVG_CHAR_PX).max(0.0) as usize;
    let char_count = text.chars().count();
    if char_count <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    // Reserve one slot for the ellipsis character itself.
    let keep = max_chars.saturating_sub(1);
    let tail: String = text.chars().skip(char_count - keep).collect();
    format!("{ELLIPSIS}{tail}")
}
