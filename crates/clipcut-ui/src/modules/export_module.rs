// crates/clipcut-ui/src/modules/export_module.rs
//
// ExportModule: bottom panel with the Export button, the progress bar and the
// status line.
//
// State machine (driven by AppState.export, folded from ExportEvents by
// AppContext):
//
//   Idle     → user clicks "Export…"
//              → app.rs opens the rfd save dialog, calls media_worker.start_export
//              → export.begin(job_id), bar drops to 0
//
//   Running  → Progress events raise export.percent
//              → button disabled, bar shows the percentage
//
//   Done     → export.done = Some(path), status "Video saved"
//   Failed   → export.error = Some(msg), status "Export failed: <msg>"
//
// Done / Failed keep the bar where it stopped until the next export begins.

use super::EditorModule;
use clipcut_core::commands::EditorCommand;
use crate::state::AppState;
use crate::theme::{DARK_BG_2, DARK_TEXT_DIM};
use egui::{Color32, Margin, RichText, Ui};

// ── Colour palette extensions (local to this module) ─────────────────────────

/// Muted green for the "saved" status.
const GREEN_DIM: Color32 = Color32::from_rgb(80,  190, 120);
/// Muted red for failures.
const RED_DIM:   Color32 = Color32::from_rgb(200, 80,  80);
/// Filled portion of the progress bar.
const TRACK_FG:  Color32 = Color32::from_rgb(90,  160, 255);

#[derive(Default)]
pub struct ExportModule;

impl ExportModule {
    fn status_colour(state: &AppState) -> Color32 {
        if state.export.error.is_some() {
            RED_DIM
        } else if state.export.done.is_some() {
            GREEN_DIM
        } else {
            DARK_TEXT_DIM
        }
    }
}

impl EditorModule for ExportModule {
    fn name(&self) -> &str { "Export" }

    fn ui(&mut self, ui: &mut Ui, state: &AppState, cmd: &mut Vec<EditorCommand>) {
        let running = state.export.is_running();

        egui::Frame::new()
            .fill(DARK_BG_2)
            .inner_margin(Margin { left: 8, right: 8, top: 6, bottom: 6 })
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let hover = if running {
                        "An export is already running"
                    } else if !state.preview.is_loaded() {
                        "Choose a video first"
                    } else {
                        "Re-encode the marked range to a new file"
                    };
                    let btn = egui::Button::new(RichText::new("🚀 Export…").strong())
                        .min_size(egui::vec2(96.0, 24.0));
                    if ui.add_enabled(state.can_export(), btn)
                        .on_hover_text(hover)
                        .on_disabled_hover_text(hover)
                        .clicked()
                    {
                        cmd.push(EditorCommand::PickExportDestination);
                    }

                    let bar = egui::ProgressBar::new(state.export.fraction())
                        .fill(TRACK_FG)
                        .text(format!("{}%", state.export.percent))
                        .animate(running);
                    ui.add(bar);
                });

                ui.add_space(4.0);
                if !state.status.is_empty() {
                    ui.label(
                        RichText::new(&state.status)
                            .size(11.0)
                            .color(Self::status_colour(state)),
                    );
                }
            });
    }
}
