// crates/clipcut-ui/src/main.rs
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod context;
mod helpers;
mod modules;
mod state;
mod theme;

use clipcut_core::settings::WINDOW_SIZE;

fn main() -> eframe::Result {
    helpers::log::init();
    // Without FFmpeg nothing in the app can work; there is nothing to recover to.
    ffmpeg_the_third::init().expect("FFmpeg init failed");
    tracing::info!(log = %helpers::log::log_path().display(), "ClipCut starting");

    let native_options = eframe::NativeOptions {
        centered: true,
        viewport: egui::ViewportBuilder::default()
            .with_title("ClipCut")
            .with_inner_size(WINDOW_SIZE)
            .with_min_inner_size([560.0, 420.0])
            .with_drag_and_drop(true)
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        "ClipCut",
        native_options,
        Box::new(|cc| Ok(Box::new(app::ClipCutApp::new(cc)))),
    )
}
