// crates/clipcut-media/src/probe.rs
//
// Opening a source: duration, display size, frame rate, audio presence.

use std::path::{Path, PathBuf};

use ffmpeg_the_third as ffmpeg;
use ffmpeg::format::input;
use ffmpeg::media::Type;
use ffmpeg::Rational;
use tracing::{debug, info};

use clipcut_core::settings::FALLBACK_FPS;

use crate::error::{MediaError, Result};

/// An opened media file.
///
/// Holds only metadata: every frame request re-opens the file, so a handle
/// is cheap to clone and safe to hand to the export thread.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoHandle {
    pub path:          PathBuf,
    pub duration_secs: f64,
    /// Display size in pixels (excludes codec macroblock padding). Preview
    /// frames come out at exactly this size; an export rounds odd values up
    /// to even.
    pub frame_size:    (u32, u32),
    pub frame_rate:    f64,
    /// The export only builds an AAC track when this is set.
    pub has_audio:     bool,
}

/// Probe `path`. Fails with `MediaError::Open` for unreadable or
/// unsupported files and `MediaError::NoVideoStream` for audio-only ones.
pub fn open(path: &Path) -> Result<VideoHandle> {
    let ictx = input(path).map_err(|source| MediaError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let stream = ictx.streams().best(Type::Video)
        .ok_or_else(|| MediaError::NoVideoStream(path.to_path_buf()))?;

    let params = stream.parameters();
    let frame_size = (params.width() as u32, params.height() as u32);
    if frame_size.0 == 0 || frame_size.1 == 0 {
        return Err(MediaError::Decode(format!(
            "video stream in '{}' reports no dimensions", path.display(),
        )));
    }

    let container_dur = ictx.duration() as f64 / ffmpeg::ffi::AV_TIME_BASE as f64;
    let duration_secs = if container_dur > 0.0 {
        container_dur
    } else {
        // Fall back to the stream's own duration.
        let d = stream.duration() as f64 * f64::from(stream.time_base());
        debug!(path = %path.display(), "container duration missing, stream says {d:.3}s");
        d.max(0.0)
    };

    let frame_rate = rate_to_fps(stream.avg_frame_rate())
        .or_else(|| rate_to_fps(stream.rate()))
        .unwrap_or(FALLBACK_FPS);

    let has_audio = ictx.streams().best(Type::Audio).is_some();

    info!(
        path = %path.display(),
        "opened {}x{} @ {frame_rate:.3} fps, {duration_secs:.2}s, audio={has_audio}",
        frame_size.0, frame_size.1,
    );

    Ok(VideoHandle {
        path: path.to_path_buf(),
        duration_secs,
        frame_size,
        frame_rate,
        has_audio,
    })
}

/// A usable frames-per-second value, or None for 0/0 and friends.
fn rate_to_fps(r: Rational) -> Option<f64> {
    if r.numerator() <= 0 || r.denominator() <= 0 {
        return None;
    }
    Some(r.numerator() as f64 / r.denominator() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rates_are_rejected() {
        assert_eq!(rate_to_fps(Rational::new(0, 1)), None);
        assert_eq!(rate_to_fps(Rational::new(0, 0)), None);
        assert_eq!(rate_to_fps(Rational::new(30, 1)), Some(30.0));
    }

    #[test]
    fn ntsc_rate() {
        let fps = rate_to_fps(Rational::new(30000, 1001)).unwrap();
        assert!((fps - 29.97).abs() < 0.01);
    }

    #[test]
    fn missing_file_is_open_error() {
        ffmpeg::init().unwrap();
        let err = open(Path::new("/definitely/not/here.mp4")).unwrap_err();
        assert!(matches!(err, MediaError::Open { .. }));
    }
}
