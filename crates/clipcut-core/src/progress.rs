// crates/clipcut-core/src/progress.rs
//
// Frame-count based export progress.
//
//   total_frames  = fps × (end − start)
//   current_frame = floor(t × fps)          t = seconds since `start`
//   percent       = floor(current_frame / total_frames × 100), capped at 100
//
// The tracker remembers the last percentage it handed out and only reports
// increases, so the worker sends at most 101 progress events per job.

/// Converts encoded-frame timestamps into a non-decreasing percentage.
#[derive(Clone, Debug)]
pub struct ProgressTracker {
    fps:          f64,
    total_frames: f64,
    last:         Option<u8>,
}

impl ProgressTracker {
    pub fn new(fps: f64, start_secs: f64, end_secs: f64) -> Self {
        let total_frames = fps * (end_secs - start_secs);
        Self { fps, total_frames, last: None }
    }

    pub fn total_frames(&self) -> f64 {
        self.total_frames
    }

    /// Percentage for a frame `rel_secs` after the range start, without
    /// touching the tracker's memory.
    pub fn percent_at(&self, rel_secs: f64) -> u8 {
        if self.total_frames <= 0.0 {
            return 100;
        }
        let current_frame = (rel_secs.max(0.0) * self.fps).floor();
        ((current_frame / self.total_frames * 100.0).floor() as u64).min(100) as u8
    }

    /// Record a frame at `rel_secs`. Returns the new percentage when it is
    /// higher than anything reported so far.
    pub fn observe(&mut self, rel_secs: f64) -> Option<u8> {
        let p = self.percent_at(rel_secs);
        self.bump(p)
    }

    /// The encode finished; report 100 unless it was already reported.
    pub fn finish(&mut self) -> Option<u8> {
        self.bump(100)
    }

    fn bump(&mut self, p: u8) -> Option<u8> {
        match self.last {
            Some(prev) if p <= prev => None,
            _ => {
                self.last = Some(p);
                Some(p)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thirty_fps_ten_seconds_has_300_frames() {
        let t = ProgressTracker::new(30.0, 0.0, 10.0);
        assert_eq!(t.total_frames(), 300.0);
        assert_eq!(t.percent_at(0.0), 0);
        assert_eq!(t.percent_at(5.0), 50);
        assert_eq!(t.percent_at(9.99), 99);
        assert_eq!(t.percent_at(10.0), 100);
    }

    #[test]
    fn sequence_is_non_decreasing_and_ends_at_100() {
        let mut t = ProgressTracker::new(30.0, 0.0, 10.0);
        let mut seen = Vec::new();
        for frame in 0..300 {
            if let Some(p) = t.observe(frame as f64 / 30.0) {
                seen.push(p);
            }
        }
        if let Some(p) = t.finish() {
            seen.push(p);
        }
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(seen.first(), Some(&0));
        assert_eq!(seen.last(), Some(&100));
    }

    #[test]
    fn offset_range_uses_relative_time() {
        let t = ProgressTracker::new(25.0, 2.0, 6.0);
        assert_eq!(t.total_frames(), 100.0);
        assert_eq!(t.percent_at(2.0), 50);
    }

    #[test]
    fn overrun_is_capped() {
        let mut t = ProgressTracker::new(30.0, 0.0, 1.0);
        assert_eq!(t.observe(5.0), Some(100));
        assert_eq!(t.finish(), None);
    }

    #[test]
    fn empty_range_reports_done() {
        let mut t = ProgressTracker::new(30.0, 4.0, 4.0);
        assert_eq!(t.percent_at(0.0), 100);
        assert_eq!(t.finish(), Some(100));
    }
}
