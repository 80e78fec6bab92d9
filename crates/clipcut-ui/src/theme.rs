// crates/clipcut-ui/src/theme.rs
//
// Dark palette and egui style. Installed once from ClipCutApp::new.

use egui::{Context, Color32, Stroke, Visuals, Style};

// ── Palette ──────────────────────────────────────────────────────────────────
pub const ACCENT:        Color32 = Color32::from_rgb( 64, 200, 180);
pub const ACCENT_DIM:    Color32 = Color32::from_rgb( 30, 120, 108);
pub const ACCENT_HOVER:  Color32 = Color32::from_rgb(110, 225, 208);

pub const DARK_BG_0:     Color32 = Color32::from_rgb( 14,  14,  16);
pub const DARK_BG_1:     Color32 = Color32::from_rgb( 20,  20,  24);
pub const DARK_BG_2:     Color32 = Color32::from_rgb( 28,  28,  34);
pub const DARK_BG_3:     Color32 = Color32::from_rgb( 38,  38,  46);
pub const DARK_BG_4:     Color32 = Color32::from_rgb( 50,  50,  60);

pub const DARK_TEXT:     Color32 = Color32::from_rgb(220, 220, 230);
pub const DARK_TEXT_DIM: Color32 = Color32::from_rgb(120, 120, 138);
pub const DARK_BORDER:   Color32 = Color32::from_rgb( 55,  55,  68);

/// Apply the ClipCut palette. Also pins dark mode so an OS theme switch
/// doesn't overwrite it.
pub fn configure_style(ctx: &Context) {
    ctx.options_mut(|o| o.theme_preference = egui::ThemePreference::Dark);

    let mut style = Style::default();

    style.spacing.item_spacing     = egui::vec2(6.0, 5.0);
    style.spacing.window_margin    = egui::Margin::same(10);
    style.spacing.button_padding   = egui::vec2(10.0, 5.0);
    style.spacing.slider_width     = 240.0;

    let cr = egui::CornerRadius::same(4);

    let mut v = Visuals::dark();
    v.panel_fill           = DARK_BG_1;
    v.window_fill          = DARK_BG_2;
    v.faint_bg_color       = DARK_BG_0;
    v.extreme_bg_color     = DARK_BG_0;
    v.window_stroke        = Stroke::new(1.0, DARK_BORDER);
    v.window_corner_radius = cr;
    v.menu_corner_radius   = cr;

    // Slider rail and progress-bar fill both read the selection colour.
    v.selection.bg_fill    = ACCENT_DIM;
    v.selection.stroke     = Stroke::new(1.0, ACCENT);
    v.override_text_color  = Some(DARK_TEXT);

    //           widget state           fill        border                      text / icon
    paint(&mut v.widgets.noninteractive, DARK_BG_2,  (1.0, DARK_BORDER),  (1.0, DARK_TEXT_DIM), cr);
    paint(&mut v.widgets.inactive,       DARK_BG_3,  (1.0, DARK_BORDER),  (1.0, DARK_TEXT),     cr);
    paint(&mut v.widgets.hovered,        DARK_BG_4,  (1.0, ACCENT_DIM),   (1.5, ACCENT_HOVER),  cr);
    paint(&mut v.widgets.active,         ACCENT_DIM, (1.0, ACCENT),       (2.0, Color32::WHITE), cr);
    paint(&mut v.widgets.open,           DARK_BG_4,  (1.0, ACCENT_DIM),   (1.5, ACCENT_HOVER),  cr);

    ctx.set_style(style);
    ctx.set_visuals(v);
}

fn paint(
    w:      &mut egui::style::WidgetVisuals,
    fill:   Color32,
    border: (f32, Color32),
    fg:     (f32, Color32),
    cr:     egui::CornerRadius,
) {
    w.bg_fill       = fill;
    w.weak_bg_fill  = fill;
    w.bg_stroke     = Stroke::new(border.0, border.1);
    w.fg_stroke     = Stroke::new(fg.0, fg.1);
    w.corner_radius = cr;
}
