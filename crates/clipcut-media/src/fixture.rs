// crates/clipcut-media/src/fixture.rs
//
// Test-only: synthesize a short clip on disk with FFmpeg's own encoders so the
// decode and export paths can be exercised without checked-in media.

use std::path::{Path, PathBuf};

use ffmpeg_the_third as ffmpeg;
use ffmpeg::format::{sample::Type as SampleType, Pixel, Sample};
use ffmpeg::util::channel_layout::ChannelLayoutMask;
use ffmpeg::util::frame::audio::Audio as AudioFrame;
use ffmpeg::util::frame::video::Video as VideoFrame;
use ffmpeg::Rational;

use crate::error::Result;
use crate::export::audio::AudioTrack;
use crate::export::{ExportJob, VideoTrack};
use crate::probe::{open, VideoHandle};

/// Rate of the synthetic tone. Deliberately not 44.1 kHz, so writing it goes
/// through the AAC track's resampler.
const TONE_RATE: i32 = 48_000;

/// Write `secs` seconds of a luma ramp at `fps` to `path` and probe it back.
///
/// Use an `.avi` path: that picks MPEG-4 Part 2, which every FFmpeg build
/// ships, where `.mp4` would need libx264.
pub(crate) fn write_clip(path: &Path, secs: f64, fps: i32, size: (u32, u32)) -> Result<VideoHandle> {
    write(path, secs, fps, size, false)
}

/// Like `write_clip`, plus a 440 Hz mono tone that ends up as an AAC stream.
pub(crate) fn write_clip_with_tone(path: &Path, secs: f64, fps: i32, size: (u32, u32)) -> Result<VideoHandle> {
    write(path, secs, fps, size, true)
}

fn write(path: &Path, secs: f64, fps: i32, size: (u32, u32), tone: bool) -> Result<VideoHandle> {
    ffmpeg::init()?;
    let (w, h) = size;
    let source = VideoHandle {
        path:          PathBuf::from("synthetic"),
        duration_secs: secs,
        frame_size:    size,
        frame_rate:    fps as f64,
        has_audio:     tone,
    };
    let job = ExportJob::new(source, 0.0, secs, path.to_path_buf());

    let mut octx = ffmpeg::format::output(path)?;
    let mut video = VideoTrack::add_to(&mut octx, &job, Rational::new(fps, 1))?;
    let mut audio = if tone { Some(AudioTrack::add_to(&mut octx, 1)?) } else { None };
    octx.write_header()?;
    video.sync_timebase(&octx);
    if let Some(a) = audio.as_mut() {
        a.sync_timebase(&octx);
    }

    let n = (secs * fps as f64).round() as usize;
    let samples_per_frame = (TONE_RATE / fps) as usize;
    for i in 0..n {
        let mut frame = VideoFrame::new(Pixel::YUV420P, w, h);
        let luma = (16 + i * 219 / n.max(1)) as u8;
        frame.data_mut(0).fill(luma);
        frame.data_mut(1).fill(128);
        frame.data_mut(2).fill(128);
        video.encode(&mut frame, &mut octx)?;

        if let Some(a) = audio.as_mut() {
            a.push(&tone_frame(i * samples_per_frame, samples_per_frame))?;
            a.drain(&mut octx, false)?;
        }
    }
    video.finish(&mut octx)?;
    if let Some(a) = audio.as_mut() {
        a.finish(&mut octx)?;
    }
    octx.write_trailer()?;

    open(path)
}

/// `n` samples of a 440 Hz sine, mono S16 at TONE_RATE, starting at sample
/// `first`.
fn tone_frame(first: usize, n: usize) -> AudioFrame {
    let mut frame = AudioFrame::new(Sample::I16(SampleType::Packed), n, ChannelLayoutMask::MONO);
    frame.set_rate(TONE_RATE as u32);
    frame.set_pts(Some(first as i64));
    // SAFETY: freshly allocated packed mono S16 frame of `n` samples.
    let dst = unsafe {
        std::slice::from_raw_parts_mut(frame.data_mut(0).as_mut_ptr() as *mut i16, n)
    };
    for (k, s) in dst.iter_mut().enumerate() {
        let t = (first + k) as f64 / TONE_RATE as f64;
        *s = ((t * 440.0 * std::f64::consts::TAU).sin() * 8_000.0) as i16;
    }
    frame
}
