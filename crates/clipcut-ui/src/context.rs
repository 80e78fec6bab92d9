// crates/clipcut-ui/src/context.rs
//
// AppContext owns the runtime handles that are NOT part of AppState.
// ClipCutApp holds one of these plus an AppState and the panels, nothing
// else.
//
//   AppContext
//     ├── media_worker: export thread + its ExportEvent channel
//     └── frame_tex   : GPU copy of the controller's current frame

use clipcut_core::media_types::ExportEvent;
use clipcut_media::MediaWorker;
use eframe::egui;
use tracing::{debug, info, warn};

use crate::helpers::format::{export_failed, VIDEO_SAVED};
use crate::state::AppState;

pub struct AppContext {
    pub media_worker: MediaWorker,
    /// Texture for the frame on screen. Re-uploaded only when the
    /// controller's render generation moves.
    pub frame_tex:    Option<egui::TextureHandle>,
    uploaded_gen:     u64,
}

impl AppContext {
    pub fn new(media_worker: MediaWorker) -> Self {
        Self { media_worker, frame_tex: None, uploaded_gen: 0 }
    }

    /// Drain every pending ExportEvent into `state`. Call once per frame
    /// before the panels draw.
    pub fn ingest_export_events(&mut self, state: &mut AppState) {
        while let Ok(event) = self.media_worker.rx.try_recv() {
            let job_id = event.job_id();
            match &event {
                ExportEvent::Progress { percent, .. } => {
                    debug!(%job_id, percent, "export progress");
                }
                ExportEvent::Completed { path, .. } => {
                    info!(%job_id, path = %path.display(), "export saved");
                    if state.export.job == Some(job_id) {
                        state.status = VIDEO_SAVED.to_string();
                    }
                }
                ExportEvent::Failed { msg, .. } => {
                    warn!(%job_id, "export failed: {msg}");
                    if state.export.job == Some(job_id) {
                        state.status = export_failed(msg);
                    }
                }
            }
            state.export.apply(event);
        }
    }

    /// True when the controller holds a frame the GPU hasn't seen yet.
    pub fn needs_upload(&self, state: &AppState) -> bool {
        state.preview.current_frame().is_some()
            && (self.frame_tex.is_none() || self.uploaded_gen != state.preview.generation())
    }

    /// Keep `frame_tex` in step with the controller's current frame.
    pub fn sync_frame_texture(&mut self, ctx: &egui::Context, state: &AppState) {
        let preview = &state.preview;
        let Some(frame) = preview.current_frame() else {
            self.frame_tex = None;
            return;
        };
        if !self.needs_upload(state) {
            return;
        }

        let (w, h) = frame.size();
        let image = egui::ColorImage::from_rgb([w as usize, h as usize], &frame.data);
        match &mut self.frame_tex {
            Some(tex) => tex.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.frame_tex = Some(ctx.load_texture(
                    "preview_frame", image, egui::TextureOptions::LINEAR,
                ));
            }
        }
        self.uploaded_gen = preview.generation();
    }
}
