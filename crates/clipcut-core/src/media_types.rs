// crates/clipcut-core/src/media_types.rs
//
// Types that flow between clipcut-media and clipcut-ui.
// No egui, no ffmpeg. Plain data only.

use std::path::PathBuf;
use uuid::Uuid;

/// A decoded frame, tightly packed RGB24 (`data.len() == width * height * 3`).
#[derive(Clone, Debug, PartialEq)]
pub struct RgbFrame {
    pub width:  u32,
    pub height: u32,
    pub data:   Vec<u8>,
}

impl RgbFrame {
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Events sent from the export thread to the UI thread.
///
/// Every variant carries the `job_id` it belongs to so the UI can drop
/// results from a job it no longer tracks.
#[derive(Clone, Debug, PartialEq)]
pub enum ExportEvent {
    /// Integer percentage in `[0, 100]`. Only sent when the value increases.
    Progress  { job_id: Uuid, percent: u8 },
    Completed { job_id: Uuid, path: PathBuf },
    Failed    { job_id: Uuid, msg: String },
}

impl ExportEvent {
    pub fn job_id(&self) -> Uuid {
        match self {
            ExportEvent::Progress  { job_id, .. }
            | ExportEvent::Completed { job_id, .. }
            | ExportEvent::Failed    { job_id, .. } => *job_id,
        }
    }
}
