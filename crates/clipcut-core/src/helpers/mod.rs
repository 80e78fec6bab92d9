// crates/clipcut-core/src/helpers/mod.rs
//
// Pure helpers shared by the UI and the media crate.

pub mod time;
