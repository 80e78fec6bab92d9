// crates/clipcut-core/src/settings.rs
//
// Compile-time tunables. ClipCut has no config file and persists nothing,
// so everything adjustable lives here.

use std::path::Path;
use std::time::Duration;

/// Playback timer interval. Each tick advances the cursor by the same
/// amount expressed in seconds (see `tick_delta_secs`).
pub const TICK_INTERVAL: Duration = Duration::from_millis(30);

/// How often the UI repaints while an export is running, so progress
/// shows up without mouse movement.
pub const EXPORT_REPAINT_INTERVAL: Duration = Duration::from_millis(100);

/// Extensions offered by the "Video files" dialog filter. Not enforced.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov"];

/// Output audio sample rate for exports that carry an audio track.
pub const AUDIO_RATE: i32 = 44_100;

/// Frame rate assumed when the container reports none.
pub const FALLBACK_FPS: f64 = 30.0;

/// Initial window size, in logical points.
pub const WINDOW_SIZE: [f32; 2] = [800.0, 600.0];

/// Cursor advance per playback tick, in seconds.
pub fn tick_delta_secs() -> f64 {
    TICK_INTERVAL.as_secs_f64()
}

/// Video codec used for an export, chosen from the destination extension.
/// The container itself is picked by ffmpeg from the same extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputVideoCodec {
    /// H.264, YUV420P. Default for mp4 / mov / mkv and anything unknown.
    H264,
    /// MPEG-4 Part 2, YUV420P. Plays back in stock AVI players.
    Mpeg4,
}

impl OutputVideoCodec {
    pub fn for_path(path: &Path) -> Self {
        let ext = path.extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "avi" => OutputVideoCodec::Mpeg4,
            _     => OutputVideoCodec::H264,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_delta_matches_interval() {
        assert!((tick_delta_secs() - 0.03).abs() < 1e-9);
    }

    #[test]
    fn codec_follows_extension() {
        assert_eq!(OutputVideoCodec::for_path(Path::new("out.mp4")), OutputVideoCodec::H264);
        assert_eq!(OutputVideoCodec::for_path(Path::new("out.MOV")), OutputVideoCodec::H264);
        assert_eq!(OutputVideoCodec::for_path(Path::new("out.AVI")), OutputVideoCodec::Mpeg4);
        assert_eq!(OutputVideoCodec::for_path(Path::new("no_extension")), OutputVideoCodec::H264);
    }
}
