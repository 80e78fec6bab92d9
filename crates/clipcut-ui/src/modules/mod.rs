// crates/clipcut-ui/src/modules/mod.rs
//
// Panel registry. To add a new panel:
//   1. Create modules/mypanel.rs implementing EditorModule
//   2. Add `pub mod mypanel;` below
//   3. Give ClipCutApp a field for it and call ui() from update()

pub mod export_module;
pub mod preview_module;

use clipcut_core::commands::EditorCommand;
use egui::Ui;

use crate::state::AppState;

/// Every panel implements this trait.
/// Modules read state and emit commands; they never mutate state directly.
pub trait EditorModule {
    fn name(&self) -> &str;
    fn ui(&mut self, ui: &mut Ui, state: &AppState, cmd: &mut Vec<EditorCommand>);
}
