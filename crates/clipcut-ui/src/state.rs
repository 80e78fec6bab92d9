// crates/clipcut-ui/src/state.rs
//
// AppState: everything the panels read. Owned by ClipCutApp, mutated only
// by app.rs while processing commands and by AppContext while draining
// export events. Modules get `&AppState`.

use std::path::PathBuf;

use clipcut_core::{ExportStatus, PreviewController};
use clipcut_media::VideoHandle;

pub struct AppState {
    /// Loaded source, selection marks, cursor and current frame.
    pub preview: PreviewController<VideoHandle>,
    /// Progress of the export tracked by the UI, if any.
    pub export:  ExportStatus,
    /// One-line message under the controls.
    pub status:  String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            preview: PreviewController::new(),
            export:  ExportStatus::default(),
            status:  String::new(),
        }
    }
}

impl AppState {
    pub fn source_path(&self) -> Option<&PathBuf> {
        self.preview.source().map(|h| &h.path)
    }

    /// Export is allowed with a source loaded and no job in flight.
    pub fn can_export(&self) -> bool {
        self.preview.is_loaded() && !self.export.is_running()
    }
}
