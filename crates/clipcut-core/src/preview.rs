// crates/clipcut-core/src/preview.rs
//
// PreviewController: the Stopped/Playing state machine behind the preview
// pane. Owns the loaded source, the selection marks, the playback cursor and
// the most recently rendered frame.
//
// Every render is synchronous: one `FrameSource::frame_at` call on the
// caller's thread. The UI drives `tick()` from its own timer; nothing here
// spawns threads or sleeps.
//
// Transitions:
//   Stopped --play--> Playing        cursor snaps to start if outside [start, end)
//   Playing --tick--> Playing        cursor += tick delta (seconds), render
//   Playing --tick--> Stopped        cursor reached end: clamp to end, render
//   Playing --stop--> Stopped

use anyhow::Result;
use tracing::debug;

use crate::media_types::RgbFrame;
use crate::settings::tick_delta_secs;
use crate::state::SelectionRange;

/// Anything that can hand out frames by timestamp.
///
/// Implemented by `clipcut_media::VideoHandle` for real files; tests use
/// in-memory fakes.
pub trait FrameSource {
    fn duration_secs(&self) -> f64;
    /// Decode the frame shown at `t` seconds. No caching is implied.
    fn frame_at(&self, t: f64) -> Result<RgbFrame>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
}

pub struct PreviewController<S: FrameSource> {
    source:     Option<S>,
    selection:  SelectionRange,
    cursor:     f64,
    state:      PlaybackState,
    tick_delta: f64,
    frame:      Option<RgbFrame>,
    /// Bumped on every successful render so the UI knows when to re-upload
    /// its texture.
    generation: u64,
}

impl<S: FrameSource> Default for PreviewController<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: FrameSource> PreviewController<S> {
    pub fn new() -> Self {
        Self::with_tick_delta(tick_delta_secs())
    }

    pub fn with_tick_delta(tick_delta: f64) -> Self {
        Self {
            source:     None,
            selection:  SelectionRange::default(),
            cursor:     0.0,
            state:      PlaybackState::Stopped,
            tick_delta,
            frame:      None,
            generation: 0,
        }
    }

    /// Replace the current source with `source` and show its first frame.
    ///
    /// The selection becomes `{0, duration}`. If frame 0 cannot be decoded
    /// the previous source stays loaded and the error is returned.
    pub fn load(&mut self, source: S) -> Result<()> {
        let frame = source.frame_at(0.0)?;
        self.selection = SelectionRange::full(source.duration_secs());
        self.cursor    = 0.0;
        self.state     = PlaybackState::Stopped;
        self.source    = Some(source);
        self.present(frame);
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.source.is_some()
    }

    pub fn source(&self) -> Option<&S> {
        self.source.as_ref()
    }

    pub fn selection(&self) -> SelectionRange {
        self.selection
    }

    pub fn cursor(&self) -> f64 {
        self.cursor
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn current_frame(&self) -> Option<&RgbFrame> {
        self.frame.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Duration of the loaded source, or 0 with nothing loaded.
    pub fn duration_secs(&self) -> f64 {
        self.source.as_ref().map(|s| s.duration_secs()).unwrap_or(0.0)
    }

    /// Start mark dragged to `v`: update the bound, then render at it.
    pub fn drag_start(&mut self, v: f64) -> Result<()> {
        let Some(v) = self.clamp(v) else { return Ok(()) };
        self.selection.start_secs = v;
        self.seek(v)
    }

    /// End mark dragged to `v`: update the bound, then render at it.
    pub fn drag_end(&mut self, v: f64) -> Result<()> {
        let Some(v) = self.clamp(v) else { return Ok(()) };
        self.selection.end_secs = v;
        self.seek(v)
    }

    pub fn play(&mut self) {
        if self.source.is_none() { return; }
        let sel = self.selection;
        if self.cursor < sel.start_secs || self.cursor >= sel.end_secs {
            self.cursor = sel.start_secs;
        }
        self.state = PlaybackState::Playing;
    }

    pub fn stop(&mut self) {
        self.state = PlaybackState::Stopped;
    }

    pub fn toggle_play(&mut self) {
        match self.state {
            PlaybackState::Stopped => self.play(),
            PlaybackState::Playing => self.stop(),
        }
    }

    /// One timer tick. A no-op while stopped.
    pub fn tick(&mut self) -> Result<()> {
        if self.state != PlaybackState::Playing { return Ok(()); }
        let end = self.selection.end_secs;
        let mut next = self.cursor + self.tick_delta;
        if next >= end {
            next = end;
            self.state = PlaybackState::Stopped;
            debug!(cursor = next, "playback reached end mark");
        }
        self.seek(next)
    }

    fn clamp(&self, v: f64) -> Option<f64> {
        let dur = self.source.as_ref()?.duration_secs();
        Some(v.clamp(0.0, dur.max(0.0)))
    }

    fn seek(&mut self, t: f64) -> Result<()> {
        self.cursor = t;
        let Some(src) = &self.source else { return Ok(()) };
        let frame = src.frame_at(t)?;
        self.present(frame);
        Ok(())
    }

    fn present(&mut self, frame: RgbFrame) {
        self.frame = Some(frame);
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Solid-colour frames; records every timestamp it is asked for.
    struct FakeSource {
        duration: f64,
        size:     (u32, u32),
        renders:  RefCell<Vec<f64>>,
        fail:     bool,
    }

    impl FakeSource {
        fn new(duration: f64) -> Self {
            Self { duration, size: (8, 6), renders: RefCell::new(Vec::new()), fail: false }
        }

        fn renders(&self) -> Vec<f64> {
            self.renders.borrow().clone()
        }
    }

    impl FrameSource for FakeSource {
        fn duration_secs(&self) -> f64 { self.duration }
        fn frame_at(&self, t: f64) -> Result<RgbFrame> {
            if self.fail {
                anyhow::bail!("decoder exploded");
            }
            self.renders.borrow_mut().push(t);
            let (w, h) = self.size;
            Ok(RgbFrame { width: w, height: h, data: vec![0; (w * h * 3) as usize] })
        }
    }

    fn loaded(duration: f64) -> PreviewController<FakeSource> {
        let mut c = PreviewController::with_tick_delta(0.03);
        c.load(FakeSource::new(duration)).unwrap();
        c
    }

    fn renders(c: &PreviewController<FakeSource>) -> Vec<f64> {
        c.source().unwrap().renders()
    }

    #[test]
    fn load_selects_whole_clip_and_shows_frame_zero() {
        let c = loaded(10.0);
        assert_eq!(c.selection(), SelectionRange { start_secs: 0.0, end_secs: 10.0 });
        assert_eq!(renders(&c), vec![0.0]);
        assert_eq!(c.current_frame().map(|f| f.size()), Some((8, 6)));
        assert_eq!(c.state(), PlaybackState::Stopped);
    }

    #[test]
    fn failed_load_keeps_previous_source() {
        let mut c = loaded(10.0);
        let mut bad = FakeSource::new(3.0);
        bad.fail = true;
        assert!(c.load(bad).is_err());
        assert_eq!(c.duration_secs(), 10.0);
        assert_eq!(c.selection().end_secs, 10.0);
    }

    #[test]
    fn dragging_start_renders_once_at_value() {
        let mut c = loaded(10.0);
        c.drag_start(4.0).unwrap();
        assert_eq!(c.selection().start_secs, 4.0);
        assert_eq!(renders(&c), vec![0.0, 4.0]);
    }

    #[test]
    fn dragging_end_renders_once_at_value() {
        let mut c = loaded(10.0);
        c.drag_end(7.5).unwrap();
        assert_eq!(c.selection().end_secs, 7.5);
        assert_eq!(renders(&c), vec![0.0, 7.5]);
    }

    #[test]
    fn drags_are_clamped_to_clip() {
        let mut c = loaded(10.0);
        c.drag_end(42.0).unwrap();
        c.drag_start(-3.0).unwrap();
        assert_eq!(c.selection(), SelectionRange { start_secs: 0.0, end_secs: 10.0 });
    }

    #[test]
    fn start_may_pass_end() {
        let mut c = loaded(10.0);
        c.drag_end(2.0).unwrap();
        c.drag_start(6.0).unwrap();
        assert!(c.selection().is_inverted());
    }

    #[test]
    fn drag_without_source_is_noop() {
        let mut c: PreviewController<FakeSource> = PreviewController::new();
        c.drag_start(3.0).unwrap();
        assert_eq!(c.selection(), SelectionRange::default());
        c.play();
        assert_eq!(c.state(), PlaybackState::Stopped);
    }

    #[test]
    fn tick_while_stopped_does_nothing() {
        let mut c = loaded(10.0);
        c.tick().unwrap();
        assert_eq!(renders(&c), vec![0.0]);
    }

    #[test]
    fn playback_stops_at_end_mark() {
        let mut c = loaded(10.0);
        c.drag_start(1.0).unwrap();
        c.drag_end(1.1).unwrap();
        c.play();
        assert_eq!(c.cursor(), 1.0);

        let mut ticks = 0;
        while c.is_playing() {
            c.tick().unwrap();
            ticks += 1;
            assert!(c.cursor() <= 1.1 + 0.03 + 1e-9);
            assert!(ticks < 100, "playback never stopped");
        }
        assert_eq!(ticks, 4);
        assert_eq!(c.cursor(), 1.1);
        assert_eq!(*renders(&c).last().unwrap(), 1.1);
    }

    #[test]
    fn play_restarts_from_start_when_at_end() {
        let mut c = loaded(5.0);
        c.drag_end(5.0).unwrap();
        assert_eq!(c.cursor(), 5.0);
        c.play();
        assert_eq!(c.cursor(), 0.0);
    }

    #[test]
    fn stop_halts_ticks() {
        let mut c = loaded(10.0);
        c.play();
        c.tick().unwrap();
        c.toggle_play();
        let before = renders(&c).len();
        c.tick().unwrap();
        assert_eq!(renders(&c).len(), before);
    }

    #[test]
    fn generation_tracks_renders() {
        let mut c = loaded(10.0);
        let g = c.generation();
        c.drag_start(2.0).unwrap();
        assert_eq!(c.generation(), g + 1);
    }
}
