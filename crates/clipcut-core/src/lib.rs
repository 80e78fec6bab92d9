// crates/clipcut-core/src/lib.rs
//
// Pure trimming model. No egui, no ffmpeg. Both clipcut-media and
// clipcut-ui depend on this crate; it depends on neither.

pub mod commands;
pub mod helpers;
pub mod media_types;
pub mod preview;
pub mod progress;
pub mod settings;
pub mod state;

pub use media_types::{ExportEvent, RgbFrame};
pub use preview::{FrameSource, PlaybackState, PreviewController};
pub use progress::ProgressTracker;
pub use state::{ExportStatus, SelectionRange};
