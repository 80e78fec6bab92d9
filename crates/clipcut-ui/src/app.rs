// crates/clipcut-ui/src/app.rs
//
// ClipCutApp: the eframe::App. Owns AppState, AppContext and the two panels.
//
// Per frame:
//   1. dropped files → OpenSource
//   2. drain ExportEvents into AppState
//   3. advance playback if a tick is due
//   4. panels draw and queue EditorCommands
//   5. commands run (dialogs, decode, export start)
//   6. frame texture re-uploaded if the controller rendered

use std::path::PathBuf;
use std::time::Instant;

use clipcut_core::commands::EditorCommand;
use clipcut_core::settings::{EXPORT_REPAINT_INTERVAL, TICK_INTERVAL, VIDEO_EXTENSIONS};
use clipcut_media::{ExportJob, MediaWorker};
use eframe::egui;
use rfd::FileDialog;
use tracing::{info, warn};

use crate::context::AppContext;
use crate::helpers::format::{could_not_open, default_export_name, export_failed, selected_file};
use crate::modules::{
    EditorModule,
    export_module::ExportModule,
    preview_module::PreviewModule,
};
use crate::state::AppState;
use crate::theme::configure_style;

// ── App ───────────────────────────────────────────────────────────────────────

pub struct ClipCutApp {
    state:        AppState,
    context:      AppContext,
    preview:      PreviewModule,
    export:       ExportModule,
    /// Commands emitted by modules each frame, processed after the UI pass.
    pending_cmds: Vec<EditorCommand>,
    /// When the playback timer last fired. None while stopped.
    last_tick:    Option<Instant>,
}

impl ClipCutApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        configure_style(&cc.egui_ctx);
        Self {
            state:        AppState::default(),
            context:      AppContext::new(MediaWorker::new()),
            preview:      PreviewModule::new(),
            export:       ExportModule,
            pending_cmds: Vec::new(),
            last_tick:    None,
        }
    }

    fn process_command(&mut self, cmd: EditorCommand) {
        match cmd {
            // ── Source ───────────────────────────────────────────────────────
            EditorCommand::PickSource => {
                // A cancelled dialog is a no-op.
                if let Some(path) = video_dialog().pick_file() {
                    self.open_source(path);
                }
            }
            EditorCommand::OpenSource(path) => self.open_source(path),

            // ── Range marks ──────────────────────────────────────────────────
            EditorCommand::DragStart(v) => {
                let r = self.state.preview.drag_start(v);
                self.report_render(r);
            }
            EditorCommand::DragEnd(v) => {
                let r = self.state.preview.drag_end(v);
                self.report_render(r);
            }

            // ── Playback ─────────────────────────────────────────────────────
            EditorCommand::TogglePlay => {
                self.state.preview.toggle_play();
                self.last_tick = self.state.preview.is_playing().then(Instant::now);
            }

            // ── Export ───────────────────────────────────────────────────────
            EditorCommand::PickExportDestination => {
                let Some(src) = self.state.source_path() else { return };
                let default_name = default_export_name(src);
                if let Some(dest) = video_dialog()
                    .set_file_name(&default_name)
                    .save_file()
                {
                    self.start_export(dest);
                }
            }
        }
    }

    fn open_source(&mut self, path: PathBuf) {
        let loaded = clipcut_media::open(&path)
            .map_err(anyhow::Error::from)
            .and_then(|handle| self.state.preview.load(handle));
        match loaded {
            Ok(()) => {
                self.last_tick = None;
                self.state.status = selected_file(&path);
            }
            Err(e) => {
                warn!(path = %path.display(), "open failed: {e:#}");
                self.state.status = could_not_open(&format!("{e:#}"));
            }
        }
    }

    fn start_export(&mut self, destination: PathBuf) {
        if !self.state.can_export() { return; }
        let Some(source) = self.state.preview.source().cloned() else { return };
        let sel = self.state.preview.selection();

        let job = ExportJob::new(source, sel.start_secs, sel.end_secs, destination.clone());
        match self.context.media_worker.start_export(job) {
            Ok(job_id) => {
                info!(%job_id, dest = %destination.display(), "export requested");
                self.state.export.begin(job_id);
                self.state.status = format!("Exporting to {}", destination.display());
            }
            Err(e) => {
                warn!("export not started: {e}");
                self.state.status = export_failed(&e.to_string());
            }
        }
    }

    /// Render errors from a drag or a tick go to the log and the status line.
    fn report_render(&mut self, result: anyhow::Result<()>) {
        if let Err(e) = result {
            warn!("preview render failed: {e:#}");
            self.state.status = format!("Could not decode frame: {e:#}");
        }
    }

    fn handle_drag_and_drop(&mut self, ctx: &egui::Context) {
        let files = ctx.input(|i| i.raw.dropped_files.clone());
        // Only the first file is used; the app holds one source.
        if let Some(path) = files.into_iter().find_map(|f| f.path) {
            self.pending_cmds.push(EditorCommand::OpenSource(path));
        }
    }

    /// Advance playback by one tick when TICK_INTERVAL has elapsed.
    fn drive_playback(&mut self, ctx: &egui::Context) {
        if !self.state.preview.is_playing() {
            self.last_tick = None;
            return;
        }
        let now  = Instant::now();
        let last = *self.last_tick.get_or_insert(now);
        if now.duration_since(last) >= TICK_INTERVAL {
            self.last_tick = Some(now);
            let r = self.state.preview.tick();
            self.report_render(r);
        }
        ctx.request_repaint_after(TICK_INTERVAL);
    }
}

/// Open/save dialog with the "Video files" and "All files" filters.
fn video_dialog() -> FileDialog {
    FileDialog::new()
        .add_filter("Video files", VIDEO_EXTENSIONS)
        .add_filter("All files", &["*"])
}

// ── eframe::App ───────────────────────────────────────────────────────────────

impl eframe::App for ClipCutApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.state.preview.stop();
        self.context.media_worker.shutdown();
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_drag_and_drop(ctx);
        self.context.ingest_export_events(&mut self.state);
        self.drive_playback(ctx);
        self.context.sync_frame_texture(ctx, &self.state);

        egui::TopBottomPanel::top("top_panel")
            .exact_height(32.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new("✂ ClipCut")
                            .strong().size(15.0).color(crate::theme::ACCENT),
                    );
                    ui.separator();
                    ui.label(egui::RichText::new("Drop a video file to open it").size(12.0).weak());
                });
            });

        let export_id = egui::Id::new(self.export.name());
        egui::TopBottomPanel::bottom(export_id)
            .resizable(false)
            .show(ctx, |ui| {
                self.export.ui(ui, &self.state, &mut self.pending_cmds);
            });

        let preview_id = egui::Id::new(self.preview.name());
        egui::CentralPanel::default().show(ctx, |ui| {
            self.preview.current_frame = self.context.frame_tex.clone();
            ui.push_id(preview_id, |ui| {
                self.preview.ui(ui, &self.state, &mut self.pending_cmds);
            });
        });

        // ── Process commands emitted by modules this frame ────────────────────
        let cmds: Vec<EditorCommand> = self.pending_cmds.drain(..).collect();
        for cmd in cmds {
            self.process_command(cmd);
        }

        // A drag or open rendered a new frame; show it without waiting for input.
        if self.context.needs_upload(&self.state) {
            ctx.request_repaint();
        }
        if self.state.export.is_running() {
            ctx.request_repaint_after(EXPORT_REPAINT_INTERVAL);
        }
    }
}
