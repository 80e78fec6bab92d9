// crates/clipcut-media/src/lib.rs
//
// No egui dependency. Talks to clipcut-ui through plain calls (probe,
// preview decode) and a channel of ExportEvents (export).
//
// To add a new media capability:
//   1. Create a new module file here
//   2. Add `pub mod mymodule;` below
//   3. If it runs in the background, start it from worker.rs

pub mod decode;
pub mod error;
pub mod export;
pub mod probe;
pub mod worker;

mod helpers;

#[cfg(test)]
mod fixture;

// Re-export the main public API so clipcut-ui imports are simple.
pub use decode::frame_at;
pub use error::MediaError;
pub use export::ExportJob;
pub use probe::{open, VideoHandle};
pub use worker::MediaWorker;
