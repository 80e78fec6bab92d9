// crates/clipcut-ui/src/helpers/mod.rs
//
// UI-only helpers. Anything without egui in it belongs in
// clipcut_core::helpers instead.

pub mod format;
pub mod log;
