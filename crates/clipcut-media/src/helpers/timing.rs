// crates/clipcut-media/src/helpers/timing.rs
//
// Where a decoded video frame sits on the source timeline, in seconds.
// Shared by the preview decode and the export so both agree on what
// "the frame at t" means.

use ffmpeg_the_third as ffmpeg;
use ffmpeg::util::frame::video::Video as VideoFrame;
use ffmpeg::Rational;

/// Stamps decoded frames with a time in seconds.
///
/// Order of preference: the frame's PTS, the decoder's best-effort
/// timestamp, then one frame duration after the previous stamp. The very
/// first frame without any timestamp is placed at `origin` (the seek target).
pub struct FrameClock {
    tb:        f64,
    frame_dur: f64,
    origin:    f64,
    last:      Option<f64>,
}

impl FrameClock {
    pub fn new(tb: Rational, fps: f64, origin: f64) -> Self {
        Self {
            tb:        f64::from(tb),
            frame_dur: 1.0 / fps.max(1.0),
            origin,
            last:      None,
        }
    }

    /// Half a frame duration; the tolerance for "this frame covers t".
    pub fn half_frame(&self) -> f64 {
        self.frame_dur * 0.5
    }

    pub fn stamp(&mut self, frame: &VideoFrame) -> f64 {
        self.secs(frame.pts(), frame.timestamp())
    }

    pub(crate) fn secs(&mut self, pts: Option<i64>, best_effort: Option<i64>) -> f64 {
        let secs = match pts.or(best_effort) {
            Some(ts) => ts as f64 * self.tb,
            None     => self.last.map_or(self.origin, |prev| prev + self.frame_dur),
        };
        self.last = Some(secs);
        secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pts_wins_over_best_effort() {
        let mut c = FrameClock::new(Rational::new(1, 30), 30.0, 0.0);
        assert_eq!(c.secs(Some(60), Some(90)), 2.0);
        assert_eq!(c.secs(None, Some(90)), 3.0);
    }

    #[test]
    fn missing_timestamps_count_forward_from_origin() {
        let mut c = FrameClock::new(Rational::new(1, 30), 25.0, 2.0);
        let stamps: Vec<f64> = (0..4).map(|_| c.secs(None, None)).collect();
        for (i, s) in stamps.iter().enumerate() {
            assert!((s - (2.0 + i as f64 * 0.04)).abs() < 1e-9, "{stamps:?}");
        }
    }

    #[test]
    fn counter_resumes_from_last_real_stamp() {
        let mut c = FrameClock::new(Rational::new(1, 1000), 10.0, 0.0);
        c.secs(Some(5_000), None);
        assert!((c.secs(None, None) - 5.1).abs() < 1e-9);
    }

    #[test]
    fn half_frame_tracks_rate() {
        let c = FrameClock::new(Rational::new(1, 15360), 30.0, 0.0);
        assert!((c.half_frame() - 1.0 / 60.0).abs() < 1e-12);
        // A zero rate is treated as 1 fps rather than dividing by zero.
        assert_eq!(FrameClock::new(Rational::new(1, 1), 0.0, 0.0).half_frame(), 0.5);
    }
}
