// crates/clipcut-ui/src/modules/preview_module.rs
//
// PreviewModule: the central panel. Source picker, frame canvas, transport
// bar (play/stop + cursor timecode) and the Start/End range sliders.
//
// Every slider movement emits exactly one DragStart/DragEnd command; app.rs
// forwards it to PreviewController, which renders synchronously.

use super::EditorModule;
use clipcut_core::commands::EditorCommand;
use clipcut_core::helpers::time::{format_duration, format_time};
use crate::helpers::format::fit_path_label;
use crate::state::AppState;
use crate::theme::{ACCENT, DARK_BG_2, DARK_BG_3, DARK_BORDER, DARK_TEXT_DIM};
use egui::{Color32, Pos2, Rect, RichText, Sense, Stroke, Ui, Vec2};

// ── Layout constants ─────────────────────────────────────────────────────────
const BAR_H:      f32 = 40.0;
const BTN_SIZE:   f32 = 30.0;
const BTN_R:      f32 = 4.0;
const ICON_SZ:    f32 = 9.0;    // half-size of painted icon geometry
const SLIDERS_H:  f32 = 64.0;   // two slider rows
const LABEL_W:    f32 = 44.0;   // "Start" / "End" column
const READOUT_W:  f32 = 84.0;   // MM:SS.mmm column

pub struct PreviewModule {
    /// Texture of the controller's current frame, set by app.rs each frame
    /// before ui() is called.
    pub current_frame: Option<egui::TextureHandle>,
}

impl PreviewModule {
    pub fn new() -> Self { Self { current_frame: None } }

    /// One labelled range slider. Returns the new value when the user moved it.
    fn range_row(ui: &mut Ui, label: &str, value: f64, duration: f64, enabled: bool) -> Option<f64> {
        let mut v = value;
        let mut changed = false;
        ui.horizontal(|ui| {
            ui.add_sized([LABEL_W, 20.0], egui::Label::new(RichText::new(label).size(12.0)));
            let slider_w = (ui.available_width() - READOUT_W - 8.0).max(60.0);
            ui.spacing_mut().slider_width = slider_w;
            let resp = ui.add_enabled(
                enabled,
                egui::Slider::new(&mut v, 0.0..=duration.max(0.0))
                    .show_value(false)
                    .trailing_fill(true),
            );
            changed = resp.changed();
            ui.label(RichText::new(format_time(v)).monospace().size(12.0).color(ACCENT));
        });
        changed.then_some(v)
    }
}

impl EditorModule for PreviewModule {
    fn name(&self) -> &str { "Preview" }

    fn ui(&mut self, ui: &mut Ui, state: &AppState, cmd: &mut Vec<EditorCommand>) {
        let preview = &state.preview;
        let loaded  = preview.is_loaded();

        ui.vertical(|ui| {

            // ── Header ───────────────────────────────────────────────────────
            egui::Frame::new()
                .fill(DARK_BG_2)
                .inner_margin(egui::Margin { left: 8, right: 8, top: 5, bottom: 5 })
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("📺 Preview").size(12.0).strong());
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("📂 Choose video…").clicked() {
                                cmd.push(EditorCommand::PickSource);
                            }
                            if let Some(path) = state.source_path() {
                                let label = path.display().to_string();
                                let max_px = (ui.available_width() - 16.0).max(0.0);
                                ui.label(RichText::new(fit_path_label(&label, max_px))
                                    .size(11.0).color(DARK_TEXT_DIM))
                                    .on_hover_text(label);
                            }
                        });
                    });
                });

            ui.add_space(4.0);

            // ── Frame canvas ─────────────────────────────────────────────────
            // Letterboxed to the source's aspect; 16:9 before anything loads.
            let ratio = preview.source()
                .map(|h| h.frame_size)
                .filter(|&(w, h)| w > 0 && h > 0)
                .map(|(w, h)| w as f32 / h as f32)
                .unwrap_or(16.0 / 9.0);
            let panel_w = ui.available_width();
            let panel_h = (ui.available_height() - BAR_H - SLIDERS_H - 16.0).max(80.0);
            let (canvas_w, canvas_h) = {
                let h = panel_w / ratio;
                if h <= panel_h { (panel_w, h) } else { (panel_h * ratio, panel_h) }
            };

            let (outer_rect, _) = ui.allocate_exact_size(
                Vec2::new(panel_w, canvas_h), Sense::hover());
            let canvas = Rect::from_center_size(
                outer_rect.center(), Vec2::new(canvas_w, canvas_h));
            let painter = ui.painter();

            let stroke = if preview.is_playing() {
                Stroke::new(1.5, ACCENT.gamma_multiply(0.55))
            } else {
                Stroke::new(1.0, DARK_BORDER)
            };
            painter.rect_stroke(canvas.expand(1.0), 4.0, stroke, egui::StrokeKind::Outside);
            painter.rect_filled(canvas, 3.0, Color32::BLACK);

            match &self.current_frame {
                Some(tex) => {
                    painter.image(tex.id(), canvas,
                        Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                        Color32::WHITE);
                }
                None => {
                    let hint = if loaded { "NO FRAME" } else { "Choose or drop a video" };
                    painter.text(canvas.center(), egui::Align2::CENTER_CENTER,
                        hint, egui::FontId::monospace(14.0), Color32::from_gray(70));
                }
            }

            ui.add_space(6.0);

            // ── Transport bar ────────────────────────────────────────────────
            let bar_w = ui.available_width();
            let (bar_rect, _) = ui.allocate_exact_size(Vec2::new(bar_w, BAR_H), Sense::hover());
            let painter = ui.painter();
            painter.rect_filled(bar_rect, BTN_R, DARK_BG_3);
            painter.rect_stroke(bar_rect, BTN_R,
                Stroke::new(1.0, DARK_BORDER), egui::StrokeKind::Outside);

            let cy = bar_rect.center().y;
            let btn = Rect::from_min_size(
                Pos2::new(bar_rect.min.x + 8.0, cy - BTN_SIZE / 2.0),
                Vec2::splat(BTN_SIZE));
            let sense = if loaded { Sense::click() } else { Sense::hover() };
            let resp = ui.interact(btn, ui.id().with("play_stop"), sense);
            let playing = preview.is_playing();
            let icol = if !loaded {
                Color32::from_gray(80)
            } else if resp.hovered() || playing {
                ACCENT
            } else {
                Color32::from_gray(175)
            };
            painter.rect_filled(btn, BTN_R, if resp.hovered() { DARK_BG_2 } else { DARK_BG_3 });
            let c = btn.center();
            if playing {
                painter.rect_filled(
                    Rect::from_center_size(c, Vec2::splat(ICON_SZ * 1.5)),
                    1.5, icol);
            } else {
                painter.add(egui::Shape::convex_polygon(vec![
                    Pos2::new(c.x - ICON_SZ * 0.5, c.y - ICON_SZ),
                    Pos2::new(c.x - ICON_SZ * 0.5, c.y + ICON_SZ),
                    Pos2::new(c.x + ICON_SZ,        c.y),
                ], icol, Stroke::NONE));
            }
            if resp.clicked() {
                cmd.push(EditorCommand::TogglePlay);
            }

            painter.text(
                Pos2::new(btn.max.x + 14.0, cy),
                egui::Align2::LEFT_CENTER,
                format_time(preview.cursor()),
                egui::FontId::monospace(12.0),
                ACCENT);

            if let Some(h) = preview.source() {
                let sel = preview.selection();
                let info = format!(
                    "{}×{}  {:.2} fps  {}  │  sel {}",
                    h.frame_size.0, h.frame_size.1, h.frame_rate,
                    format_duration(h.duration_secs),
                    format_duration(sel.len_secs()),
                );
                let col = if sel.is_inverted() { Color32::from_rgb(200, 80, 80) } else { DARK_TEXT_DIM };
                painter.text(
                    Pos2::new(bar_rect.max.x - 10.0, cy),
                    egui::Align2::RIGHT_CENTER,
                    info,
                    egui::FontId::proportional(11.0),
                    col);
            }

            ui.add_space(6.0);

            // ── Range sliders ────────────────────────────────────────────────
            let duration = preview.duration_secs();
            let sel = preview.selection();
            if let Some(v) = Self::range_row(ui, "Start", sel.start_secs, duration, loaded) {
                cmd.push(EditorCommand::DragStart(v));
            }
            if let Some(v) = Self::range_row(ui, "End", sel.end_secs, duration, loaded) {
                cmd.push(EditorCommand::DragEnd(v));
            }
        }); // ui.vertical
    }
}
