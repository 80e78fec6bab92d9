// crates/clipcut-media/src/error.rs
use std::path::PathBuf;
use thiserror::Error;

use ffmpeg_the_third as ffmpeg;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("could not open '{path}': {source}")]
    Open {
        path:   PathBuf,
        #[source]
        source: ffmpeg::Error,
    },

    #[error("no video stream in '{0}'")]
    NoVideoStream(PathBuf),

    #[error("decode failed: {0}")]
    Decode(String),

    #[error("no frame found at t={0:.3}s")]
    NoFrame(f64),

    #[error("encode failed: {0}")]
    Encode(String),

    #[error("an export is already running")]
    ExportBusy,

    #[error("ffmpeg error: {0}")]
    Ffmpeg(#[from] ffmpeg::Error),
}

pub type Result<T> = std::result::Result<T, MediaError>;
