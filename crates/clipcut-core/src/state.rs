// crates/clipcut-core/src/state.rs
// Runtime trim state. No egui, no ffmpeg. Nothing here is serialized;
// a session starts empty every launch.
use std::path::PathBuf;
use uuid::Uuid;

use crate::media_types::ExportEvent;

/// The `[start, end]` window the user has marked, in seconds.
///
/// Each bound is clamped to `[0, duration]` by the controller. `start > end`
/// is allowed: the two sliders are independent and nothing reorders them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectionRange {
    pub start_secs: f64,
    pub end_secs:   f64,
}

impl SelectionRange {
    /// The whole clip: `{0, duration}`.
    pub fn full(duration: f64) -> Self {
        Self { start_secs: 0.0, end_secs: duration.max(0.0) }
    }

    /// Length of the marked window; zero when the bounds are inverted.
    pub fn len_secs(&self) -> f64 {
        (self.end_secs - self.start_secs).max(0.0)
    }

    pub fn is_inverted(&self) -> bool {
        self.start_secs > self.end_secs
    }
}

impl Default for SelectionRange {
    fn default() -> Self {
        Self::full(0.0)
    }
}

/// Export progress as seen by the UI thread.
///
/// Updated only from `ExportEvent`s drained off the worker channel; the
/// export thread never touches it.
#[derive(Clone, Debug, Default)]
pub struct ExportStatus {
    /// Job currently tracked, or None when idle.
    pub job:     Option<Uuid>,
    /// Last reported percentage, `[0, 100]`.
    pub percent: u8,
    /// Output path once the job reports completion.
    pub done:    Option<PathBuf>,
    /// Failure message once the job reports failure.
    pub error:   Option<String>,
}

impl ExportStatus {
    /// Start tracking `job_id`; the progress bar drops back to 0.
    pub fn begin(&mut self, job_id: Uuid) {
        *self = Self { job: Some(job_id), ..Self::default() };
    }

    pub fn is_running(&self) -> bool {
        self.job.is_some() && self.done.is_none() && self.error.is_none()
    }

    /// Fold one worker event into the status. Events for any job other than
    /// the tracked one are ignored. Returns true when something changed.
    pub fn apply(&mut self, event: ExportEvent) -> bool {
        if self.job != Some(event.job_id()) {
            return false;
        }
        match event {
            ExportEvent::Progress { percent, .. } => {
                let p = percent.min(100);
                if p <= self.percent { return false; }
                self.percent = p;
            }
            ExportEvent::Completed { path, .. } => {
                self.percent = 100;
                self.done    = Some(path);
            }
            ExportEvent::Failed { msg, .. } => {
                self.error = Some(msg);
            }
        }
        true
    }

    /// Progress as a `[0, 1]` fraction for a progress bar widget.
    pub fn fraction(&self) -> f32 {
        self.percent as f32 / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_range_covers_clip() {
        let r = SelectionRange::full(12.5);
        assert_eq!(r.start_secs, 0.0);
        assert_eq!(r.end_secs, 12.5);
        assert_eq!(r.len_secs(), 12.5);
    }

    #[test]
    fn inverted_range_has_zero_length() {
        let r = SelectionRange { start_secs: 6.0, end_secs: 2.0 };
        assert!(r.is_inverted());
        assert_eq!(r.len_secs(), 0.0);
    }

    #[test]
    fn status_ignores_foreign_jobs() {
        let mine  = Uuid::new_v4();
        let other = Uuid::new_v4();
        let mut s = ExportStatus::default();
        s.begin(mine);
        assert!(!s.apply(ExportEvent::Progress { job_id: other, percent: 40 }));
        assert_eq!(s.percent, 0);
        assert!(s.apply(ExportEvent::Progress { job_id: mine, percent: 40 }));
        assert_eq!(s.percent, 40);
    }

    #[test]
    fn status_progress_never_goes_backwards() {
        let id = Uuid::new_v4();
        let mut s = ExportStatus::default();
        s.begin(id);
        s.apply(ExportEvent::Progress { job_id: id, percent: 70 });
        assert!(!s.apply(ExportEvent::Progress { job_id: id, percent: 30 }));
        assert_eq!(s.percent, 70);
    }

    #[test]
    fn completion_pins_percent_to_100() {
        let id = Uuid::new_v4();
        let mut s = ExportStatus::default();
        s.begin(id);
        s.apply(ExportEvent::Progress { job_id: id, percent: 97 });
        s.apply(ExportEvent::Completed { job_id: id, path: PathBuf::from("out.mp4") });
        assert_eq!(s.percent, 100);
        assert!(!s.is_running());
        assert_eq!(s.done.as_deref(), Some(std::path::Path::new("out.mp4")));
    }

    #[test]
    fn failure_stops_running() {
        let id = Uuid::new_v4();
        let mut s = ExportStatus::default();
        s.begin(id);
        assert!(s.is_running());
        s.apply(ExportEvent::Failed { job_id: id, msg: "disk full".into() });
        assert!(!s.is_running());
        assert_eq!(s.error.as_deref(), Some("disk full"));
    }

    #[test]
    fn begin_resets_previous_job() {
        let first = Uuid::new_v4();
        let mut s = ExportStatus::default();
        s.begin(first);
        s.apply(ExportEvent::Completed { job_id: first, path: PathBuf::from("a.mp4") });
        s.begin(Uuid::new_v4());
        assert_eq!(s.percent, 0);
        assert!(s.done.is_none());
        assert!(s.is_running());
    }
}
