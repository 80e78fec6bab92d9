// crates/clipcut-media/src/export/mod.rs
//
// Re-encode `[start, end]` of one source file to a new file.
//
//   • `ExportJob`: everything the export thread needs, owned by value.
//   • `export()`: blocking; run it on its own thread. Reports through an
//     `ExportEvent` channel: Progress (only on increase), then exactly one of
//     Completed or Failed.
//
// Output layout:
//   Stream 0: video, H.264 (or MPEG-4 Part 2 for .avi), YUV420P, source frame
//             rate. Size is the source size rounded up to even, so an odd
//             source (e.g. 321x241) comes out one pixel larger (322x242).
//   Stream 1: AAC stereo 44.1 kHz, only when the source has audio
//
// The container comes from the destination extension (ffmpeg's muxer guess).
// Video PTS is a frame counter from 0, audio PTS a sample counter from 0, so
// the trimmed file always starts at t=0.
//
// The export opens its own demuxer/decoders on `source.path`; nothing is
// shared with the preview decode path. A failed or interrupted export removes
// whatever it had written to the destination.

pub(crate) mod audio;

use std::path::{Path, PathBuf};
use std::sync::{Arc, atomic::{AtomicBool, Ordering}};

use crossbeam_channel::Sender;
use tracing::{error, info, warn};
use uuid::Uuid;

use ffmpeg_the_third as ffmpeg;
use ffmpeg::codec::{self, Id as CodecId};
use ffmpeg::encoder;
use ffmpeg::format::{input as open_input, output as open_output, Pixel};
use ffmpeg::media::Type as MediaType;
use ffmpeg::software::scaling::{Context as ScaleCtx, Flags as ScaleFlags};
use ffmpeg::util::frame::audio::Audio as AudioFrame;
use ffmpeg::util::frame::video::Video as VideoFrame;
use ffmpeg::util::rational::Rational;
use ffmpeg::Packet;

use clipcut_core::media_types::ExportEvent;
use clipcut_core::progress::ProgressTracker;
use clipcut_core::settings::OutputVideoCodec;

use crate::error::{MediaError, Result};
use crate::helpers::seek::seek_to_secs;
use crate::helpers::timing::FrameClock;
use crate::probe::VideoHandle;

use audio::AudioTrack;

/// One trim-and-export request.
#[derive(Clone, Debug)]
pub struct ExportJob {
    pub job_id:      Uuid,
    pub source:      VideoHandle,
    pub start_secs:  f64,
    pub end_secs:    f64,
    /// Destination file; its extension picks the container and video codec.
    pub destination: PathBuf,
}

impl ExportJob {
    pub fn new(source: VideoHandle, start_secs: f64, end_secs: f64, destination: PathBuf) -> Self {
        Self { job_id: Uuid::new_v4(), source, start_secs, end_secs, destination }
    }
}

/// Bit rate for codecs without a constant-quality mode (MPEG-4 Part 2).
const MPEG4_BIT_RATE: usize = 8_000_000;

/// YUV420P needs even dimensions; odd ones are rounded up.
pub(crate) fn even_size((w, h): (u32, u32)) -> (u32, u32) {
    ((w + 1) & !1, (h + 1) & !1)
}

/// Deletes the destination on drop unless the export got as far as its
/// trailer. Armed only once the output file has been created, so a job that
/// fails early never touches a file that was already there.
struct PartialOutput<'a> {
    path:  &'a Path,
    armed: bool,
}

impl<'a> PartialOutput<'a> {
    fn new(path: &'a Path) -> Self {
        Self { path, armed: false }
    }
}

impl Drop for PartialOutput<'_> {
    fn drop(&mut self) {
        if !self.armed { return; }
        match std::fs::remove_file(self.path) {
            Ok(()) => info!(path = %self.path.display(), "removed partial export"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), "could not remove partial export: {e}"),
        }
    }
}

/// Export `job`. Blocking. `shutdown` is polled once per video frame.
pub fn export(job: ExportJob, shutdown: Arc<AtomicBool>, tx: Sender<ExportEvent>) {
    let job_id = job.job_id;
    let mut tracker = ProgressTracker::new(job.source.frame_rate, job.start_secs, job.end_secs);
    info!(
        %job_id,
        "export {:.3}s..{:.3}s of '{}' → '{}'",
        job.start_secs, job.end_secs, job.source.path.display(), job.destination.display(),
    );

    match run_export(&job, &shutdown, &mut tracker, &tx) {
        Ok(()) => {
            if let Some(percent) = tracker.finish() {
                let _ = tx.send(ExportEvent::Progress { job_id, percent });
            }
            info!(%job_id, "export finished");
            let _ = tx.send(ExportEvent::Completed { job_id, path: job.destination });
        }
        Err(e) => {
            error!(%job_id, "export failed: {e}");
            let _ = tx.send(ExportEvent::Failed { job_id, msg: e.to_string() });
        }
    }
}

/// Video encoder plus the timebases needed to write its packets.
pub(crate) struct VideoTrack {
    encoder:  encoder::video::Video,
    frame_tb: Rational,
    mux_tb:   Rational,
    width:    u32,
    height:   u32,
    next_pts: i64,
}

impl VideoTrack {
    pub(crate) fn add_to(
        octx:     &mut ffmpeg::format::context::Output,
        job:      &ExportJob,
        fps:      Rational,
    ) -> Result<Self> {
        let frame_tb = fps.invert();
        let (width, height) = even_size(job.source.frame_size);

        let choice = OutputVideoCodec::for_path(&job.destination);
        let codec_id = match choice {
            OutputVideoCodec::H264  => CodecId::H264,
            OutputVideoCodec::Mpeg4 => CodecId::MPEG4,
        };
        let codec = encoder::find(codec_id)
            .ok_or_else(|| MediaError::Encode(format!("{codec_id:?} encoder not found")))?;

        let global_header = octx.format().flags().contains(ffmpeg::format::Flags::GLOBAL_HEADER);

        let mut ost = octx.add_stream(codec)
            .map_err(|e| MediaError::Encode(format!("add video stream: {e}")))?;
        ost.set_time_base(frame_tb);

        let mut enc = codec::context::Context::new_with_codec(codec)
            .encoder()
            .video()
            .map_err(|e| MediaError::Encode(format!("video encoder context: {e}")))?;
        enc.set_width(width);
        enc.set_height(height);
        enc.set_format(Pixel::YUV420P);
        enc.set_time_base(frame_tb);
        enc.set_frame_rate(Some(fps));
        if global_header {
            enc.set_flags(codec::flag::Flags::GLOBAL_HEADER);
        }

        let mut opts = ffmpeg::Dictionary::new();
        match choice {
            OutputVideoCodec::H264 => {
                // CRF drives quality; bit_rate 0 signals VBR.
                enc.set_bit_rate(0);
                opts.set("crf",    "18");
                opts.set("preset", "fast");
            }
            OutputVideoCodec::Mpeg4 => enc.set_bit_rate(MPEG4_BIT_RATE),
        }

        let mut encoder = enc.open_as_with(codec, opts)
            .map_err(|e| MediaError::Encode(format!("open {codec_id:?} encoder: {e}")))?;
        // libavcodec resets SAR during open, so square pixels go on afterwards.
        encoder.set_aspect_ratio(Rational::new(1, 1));

        unsafe {
            let ret = ffmpeg::ffi::avcodec_parameters_from_context(
                (**(*octx.as_mut_ptr()).streams.add(0)).codecpar,
                encoder.as_ptr() as *mut ffmpeg::ffi::AVCodecContext,
            );
            if ret < 0 {
                return Err(MediaError::Encode(format!("video codecpar copy failed: {ret}")));
            }
        }

        Ok(Self { encoder, frame_tb, mux_tb: frame_tb, width, height, next_pts: 0 })
    }

    pub(crate) fn sync_timebase(&mut self, octx: &ffmpeg::format::context::Output) {
        if let Some(s) = octx.stream(0) {
            self.mux_tb = s.time_base();
        }
    }

    pub(crate) fn encode(&mut self, yuv: &mut VideoFrame, octx: &mut ffmpeg::format::context::Output) -> Result<()> {
        yuv.set_pts(Some(self.next_pts));
        // swscale copies the source SAR onto its output; force 1:1.
        unsafe {
            (*yuv.as_mut_ptr()).sample_aspect_ratio = ffmpeg::ffi::AVRational { num: 1, den: 1 };
        }
        self.encoder.send_frame(yuv)
            .map_err(|e| MediaError::Encode(format!("send video frame: {e}")))?;
        self.next_pts += 1;
        self.write_packets(octx)
    }

    pub(crate) fn finish(&mut self, octx: &mut ffmpeg::format::context::Output) -> Result<()> {
        self.encoder.send_eof()
            .map_err(|e| MediaError::Encode(format!("video encoder EOF: {e}")))?;
        self.write_packets(octx)
    }

    fn write_packets(&mut self, octx: &mut ffmpeg::format::context::Output) -> Result<()> {
        let mut pkt = Packet::empty();
        while self.encoder.receive_packet(&mut pkt).is_ok() {
            pkt.set_stream(0);
            pkt.rescale_ts(self.frame_tb, self.mux_tb);
            pkt.write_interleaved(octx)
                .map_err(|e| MediaError::Encode(format!("write video packet: {e}")))?;
        }
        Ok(())
    }
}

/// Per-source decode state: decoders, scaler, and the trim window.
struct SourceReader {
    video_idx:     usize,
    audio_idx:     Option<usize>,
    video_dec:     ffmpeg::decoder::video::Video,
    audio_dec:     Option<ffmpeg::decoder::audio::Audio>,
    audio_tb:      Rational,
    scaler:        Option<ScaleCtx>,
    display:       (u32, u32),
    clock:         FrameClock,
    start:         f64,
    end:           f64,
}

/// What to do with a decoded video frame.
enum FrameVerdict {
    PreRoll,
    Keep(f64),
    PastEnd,
}

/// Place a frame stamped at `secs` relative to the `[start, end)` window.
fn verdict(secs: f64, start: f64, end: f64, half_frame: f64) -> FrameVerdict {
    if secs < start - half_frame {
        FrameVerdict::PreRoll
    } else if secs >= end {
        FrameVerdict::PastEnd
    } else {
        FrameVerdict::Keep(secs)
    }
}

impl SourceReader {
    fn verdict(&mut self, frame: &VideoFrame) -> FrameVerdict {
        let secs = self.clock.stamp(frame);
        verdict(secs, self.start, self.end, self.clock.half_frame())
    }

    fn to_yuv(&mut self, decoded: &VideoFrame, out_w: u32, out_h: u32) -> Result<VideoFrame> {
        if self.scaler.is_none() {
            // Display dimensions, not decoded.width/height: H.264 pads the coded
            // height to a macroblock multiple and the padding would show up.
            let (w, h) = self.display;
            self.scaler = Some(ScaleCtx::get(
                decoded.format(), w,     h,
                Pixel::YUV420P,   out_w, out_h,
                ScaleFlags::BILINEAR,
            ).map_err(|e| MediaError::Encode(format!("video scaler: {e}")))?);
        }
        let mut yuv = VideoFrame::empty();
        if let Some(sc) = self.scaler.as_mut() {
            sc.run(decoded, &mut yuv)
                .map_err(|e| MediaError::Encode(format!("scale video frame: {e}")))?;
        }
        yuv.set_kind(decoded.kind());
        Ok(yuv)
    }
}

/// Whether a decoded audio frame falls inside `[start, end)`. Slightly
/// generous at the head so the frame spanning `start` survives.
fn audio_in_window(frame: &AudioFrame, tb: Rational, start: f64, end: f64) -> bool {
    let secs = frame.pts()
        .or(frame.timestamp())
        .map(|pts| pts as f64 * f64::from(tb))
        .unwrap_or(start);
    secs >= start - 0.05 && secs < end
}

fn run_export(
    job:      &ExportJob,
    shutdown: &AtomicBool,
    tracker:  &mut ProgressTracker,
    tx:       &Sender<ExportEvent>,
) -> Result<()> {
    if job.end_secs <= job.start_secs {
        return Err(MediaError::Encode(format!(
            "nothing to export: end {:.3}s is not after start {:.3}s",
            job.end_secs, job.start_secs,
        )));
    }

    // ── Input ─────────────────────────────────────────────────────────────────
    let src = &job.source.path;
    let mut ictx = open_input(src).map_err(|source| MediaError::Open {
        path: src.clone(),
        source,
    })?;

    let mut reader = {
        let vstream = ictx.streams().best(MediaType::Video)
            .ok_or_else(|| MediaError::NoVideoStream(src.clone()))?;
        let video_dec = codec::context::Context::from_parameters(vstream.parameters())?
            .decoder()
            .video()?;
        let video_idx = vstream.index();
        let video_tb  = vstream.time_base();

        let mut audio_idx = None;
        let mut audio_dec = None;
        let mut audio_tb  = Rational::new(1, clipcut_core::settings::AUDIO_RATE);
        let astream = ictx.streams().best(MediaType::Audio).filter(|_| job.source.has_audio);
        if let Some(astream) = astream {
            // A broken audio stream only costs the audio track, not the export.
            match codec::context::Context::from_parameters(astream.parameters())
                .and_then(|c| c.decoder().audio())
            {
                Ok(dec) => {
                    audio_idx = Some(astream.index());
                    audio_tb  = astream.time_base();
                    audio_dec = Some(dec);
                }
                Err(e) => warn!("audio decoder unavailable for '{}': {e}", src.display()),
            }
        }

        SourceReader {
            video_idx,
            audio_idx,
            video_dec,
            audio_dec,
            audio_tb,
            scaler:     None,
            display:    job.source.frame_size,
            clock:      FrameClock::new(video_tb, job.source.frame_rate, job.start_secs),
            start:      job.start_secs,
            end:        job.end_secs,
        }
    };

    // ── Output ────────────────────────────────────────────────────────────────
    // Declared before `octx` so the file is closed before it is removed.
    let mut partial = PartialOutput::new(&job.destination);
    let mut octx = open_output(&job.destination)
        .map_err(|e| MediaError::Encode(format!("open output '{}': {e}", job.destination.display())))?;
    partial.armed = true;

    let fps = Rational::from(job.source.frame_rate);
    let mut video = VideoTrack::add_to(&mut octx, job, fps)?;
    let mut audio = match reader.audio_dec {
        Some(_) => Some(AudioTrack::add_to(&mut octx, 1)?),
        None    => None,
    };

    octx.write_header()
        .map_err(|e| MediaError::Encode(format!("write header: {e}")))?;
    video.sync_timebase(&octx);
    if let Some(a) = audio.as_mut() {
        a.sync_timebase(&octx);
    }

    seek_to_secs(&mut ictx, job.start_secs, "export");

    // ── Packet loop ───────────────────────────────────────────────────────────
    let (out_w, out_h) = (video.width, video.height);
    let audio_tb = reader.audio_tb;
    let mut decoded = VideoFrame::empty();
    let mut raw_audio = AudioFrame::empty();

    'packets: for result in ictx.packets() {
        let (stream, packet) = result
            .map_err(|e| MediaError::Decode(format!("read packet: {e}")))?;
        let sidx = stream.index();

        if sidx == reader.video_idx {
            reader.video_dec.send_packet(&packet)
                .map_err(|e| MediaError::Decode(format!("send video packet: {e}")))?;
            while reader.video_dec.receive_frame(&mut decoded).is_ok() {
                if shutdown.load(Ordering::Relaxed) {
                    return Err(MediaError::Encode("shutting down".into()));
                }
                let secs = match reader.verdict(&decoded) {
                    FrameVerdict::PreRoll   => continue,
                    FrameVerdict::PastEnd   => break 'packets,
                    FrameVerdict::Keep(s)   => s,
                };
                let mut yuv = reader.to_yuv(&decoded, out_w, out_h)?;
                video.encode(&mut yuv, &mut octx)?;
                report(tracker, secs - job.start_secs, job.job_id, tx);
            }
        } else if Some(sidx) == reader.audio_idx {
            let (Some(dec), Some(track)) = (reader.audio_dec.as_mut(), audio.as_mut()) else { continue };
            // A bad audio packet is skipped, not fatal.
            if dec.send_packet(&packet).is_err() { continue; }
            while dec.receive_frame(&mut raw_audio).is_ok() {
                if !audio_in_window(&raw_audio, audio_tb, job.start_secs, job.end_secs) { continue; }
                track.push(&raw_audio)?;
            }
            track.drain(&mut octx, false)?;
        }
    }

    // ── Decoder tails ─────────────────────────────────────────────────────────
    // B-frame codecs hold frames back until EOF.
    let _ = reader.video_dec.send_eof();
    while reader.video_dec.receive_frame(&mut decoded).is_ok() {
        let secs = match reader.verdict(&decoded) {
            FrameVerdict::PreRoll => continue,
            FrameVerdict::PastEnd => break,
            FrameVerdict::Keep(s) => s,
        };
        let mut yuv = reader.to_yuv(&decoded, out_w, out_h)?;
        video.encode(&mut yuv, &mut octx)?;
        report(tracker, secs - job.start_secs, job.job_id, tx);
    }

    if let (Some(dec), Some(track)) = (reader.audio_dec.as_mut(), audio.as_mut()) {
        let _ = dec.send_eof();
        while dec.receive_frame(&mut raw_audio).is_ok() {
            if !audio_in_window(&raw_audio, audio_tb, job.start_secs, job.end_secs) { continue; }
            track.push(&raw_audio)?;
        }
    }

    // ── Flush encoders ────────────────────────────────────────────────────────
    video.finish(&mut octx)?;
    if let Some(track) = audio.as_mut() {
        track.finish(&mut octx)?;
    }

    octx.write_trailer()
        .map_err(|e| MediaError::Encode(format!("write trailer: {e}")))?;
    partial.armed = false;

    if video.next_pts == 0 {
        warn!(job_id = %job.job_id, "export wrote no video frames");
    }
    Ok(())
}

fn report(tracker: &mut ProgressTracker, rel_secs: f64, job_id: Uuid, tx: &Sender<ExportEvent>) {
    if let Some(percent) = tracker.observe(rel_secs) {
        let _ = tx.send(ExportEvent::Progress { job_id, percent });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    fn handle(path: &str) -> VideoHandle {
        VideoHandle {
            path:          PathBuf::from(path),
            duration_secs: 10.0,
            frame_size:    (320, 240),
            frame_rate:    30.0,
            has_audio:     false,
        }
    }

    #[test]
    fn inverted_range_fails_without_touching_disk() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.mp4");
        let job = ExportJob::new(handle("/nope/in.mp4"), 5.0, 2.0, dest.clone());
        let id = job.job_id;
        let (tx, rx) = unbounded();
        export(job, Arc::new(AtomicBool::new(false)), tx);

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(events.len(), 1);
        match &events[0] {
            ExportEvent::Failed { job_id, msg } => {
                assert_eq!(*job_id, id);
                assert!(msg.contains("nothing to export"), "{msg}");
            }
            other => panic!("expected Failed, got {other:?}"),
        }
        assert!(!dest.exists());
    }

    #[test]
    fn missing_source_reports_failure() {
        ffmpeg::init().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let job = ExportJob::new(handle("/nope/in.mp4"), 0.0, 2.0, dir.path().join("out.mp4"));
        let (tx, rx) = unbounded();
        export(job, Arc::new(AtomicBool::new(false)), tx);
        assert!(matches!(rx.try_recv(), Ok(ExportEvent::Failed { .. })));
    }

    #[test]
    fn odd_sizes_round_up_to_even() {
        assert_eq!(even_size((320, 240)), (320, 240));
        assert_eq!(even_size((321, 241)), (322, 242));
        assert_eq!(even_size((1, 1)), (2, 2));
    }

    #[test]
    fn untimed_frames_still_reach_the_end_mark() {
        // A source whose frames carry neither PTS nor best-effort timestamps.
        let mut clock = FrameClock::new(Rational::new(1, 30), 30.0, 2.0);
        let mut kept = 0;
        for _ in 0..1_000 {
            let secs = clock.secs(None, None);
            match verdict(secs, 2.0, 5.0, clock.half_frame()) {
                FrameVerdict::PreRoll => panic!("pre-roll at {secs}"),
                FrameVerdict::Keep(_) => kept += 1,
                FrameVerdict::PastEnd => break,
            }
        }
        // Three seconds at 30 fps, give or take float accumulation.
        assert!((90..=91).contains(&kept), "kept {kept}");
    }

    #[test]
    fn verdict_window_edges() {
        let half = 1.0 / 60.0;
        assert!(matches!(verdict(1.9, 2.0, 5.0, half), FrameVerdict::PreRoll));
        assert!(matches!(verdict(1.99, 2.0, 5.0, half), FrameVerdict::Keep(_)));
        assert!(matches!(verdict(4.99, 2.0, 5.0, half), FrameVerdict::Keep(_)));
        assert!(matches!(verdict(5.0, 2.0, 5.0, half), FrameVerdict::PastEnd));
    }

    #[test]
    fn armed_partial_output_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("half.mp4");
        std::fs::write(&dest, b"truncated").unwrap();
        {
            let mut partial = PartialOutput::new(&dest);
            partial.armed = true;
        }
        assert!(!dest.exists());
    }

    #[test]
    fn disarmed_partial_output_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("done.mp4");
        std::fs::write(&dest, b"complete").unwrap();
        {
            let mut partial = PartialOutput::new(&dest);
            partial.armed = true;
            partial.armed = false;
        }
        assert!(dest.exists());
        // Never armed, never touched; missing file is not an error either.
        drop(PartialOutput::new(&dir.path().join("absent.mp4")));
    }

    #[test]
    #[ignore = "encodes a clip with FFmpeg; run with --ignored"]
    fn interrupted_export_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let src = crate::fixture::write_clip(&dir.path().join("clip.avi"), 2.0, 30, (160, 120)).unwrap();
        let dest = dir.path().join("trimmed.avi");

        let job = ExportJob::new(src, 0.5, 1.5, dest.clone());
        let (tx, rx) = unbounded();
        export(job, Arc::new(AtomicBool::new(true)), tx);

        let events: Vec<_> = rx.try_iter().collect();
        assert!(
            matches!(events.last(), Some(ExportEvent::Failed { msg, .. }) if msg.contains("shutting down")),
            "{events:?}",
        );
        assert!(!dest.exists());
    }

    #[test]
    #[ignore = "encodes a clip with FFmpeg; run with --ignored"]
    fn trimmed_export_carries_audio_for_selected_range() {
        let dir = tempfile::tempdir().unwrap();
        let src = crate::fixture::write_clip_with_tone(&dir.path().join("tone.avi"), 8.0, 30, (160, 120)).unwrap();
        assert!(src.has_audio);
        let dest = dir.path().join("trimmed.avi");

        let job = ExportJob::new(src, 2.0, 5.0, dest.clone());
        let (tx, rx) = unbounded();
        export(job, Arc::new(AtomicBool::new(false)), tx);
        let events: Vec<_> = rx.try_iter().collect();
        assert!(matches!(events.last(), Some(ExportEvent::Completed { .. })), "{events:?}");

        let out = crate::probe::open(&dest).unwrap();
        assert!(out.has_audio);
        let (rate, secs) = decoded_audio(&dest);
        assert_eq!(rate, clipcut_core::settings::AUDIO_RATE as u32);
        // AAC priming and frame padding add a few tens of milliseconds.
        assert!((secs - 3.0).abs() < 0.15, "audio lasts {secs:.3}s");
    }

    /// Decode every audio frame in `path`: (sample rate, total seconds).
    fn decoded_audio(path: &Path) -> (u32, f64) {
        let mut ictx = open_input(path).unwrap();
        let (idx, mut dec) = {
            let stream = ictx.streams().best(MediaType::Audio).expect("no audio stream");
            let dec = codec::context::Context::from_parameters(stream.parameters()).unwrap()
                .decoder()
                .audio()
                .unwrap();
            (stream.index(), dec)
        };

        let mut frame = AudioFrame::empty();
        let (mut rate, mut samples) = (0u32, 0usize);
        for (stream, packet) in ictx.packets().flatten() {
            if stream.index() != idx { continue; }
            dec.send_packet(&packet).unwrap();
            while dec.receive_frame(&mut frame).is_ok() {
                rate = frame.rate();
                samples += frame.samples();
            }
        }
        dec.send_eof().unwrap();
        while dec.receive_frame(&mut frame).is_ok() {
            samples += frame.samples();
        }
        (rate, samples as f64 / rate.max(1) as f64)
    }

    #[test]
    #[ignore = "encodes a clip with FFmpeg; run with --ignored"]
    fn trimmed_export_keeps_size_and_selected_length() {
        let dir = tempfile::tempdir().unwrap();
        let src = crate::fixture::write_clip(&dir.path().join("clip.avi"), 10.0, 30, (320, 240)).unwrap();
        let dest = dir.path().join("trimmed.avi");

        let job = ExportJob::new(src.clone(), 2.0, 5.0, dest.clone());
        let id = job.job_id;
        let (tx, rx) = unbounded();
        export(job, Arc::new(AtomicBool::new(false)), tx);
        let events: Vec<_> = rx.try_iter().collect();

        assert!(
            matches!(events.last(), Some(ExportEvent::Completed { job_id, .. }) if *job_id == id),
            "{events:?}",
        );
        let percents: Vec<u8> = events.iter()
            .filter_map(|e| match e {
                ExportEvent::Progress { percent, .. } => Some(*percent),
                _ => None,
            })
            .collect();
        assert!(percents.windows(2).all(|w| w[0] < w[1]), "{percents:?}");
        assert_eq!(percents.last(), Some(&100));

        let out = crate::probe::open(&dest).unwrap();
        // Even source, so no rounding: see `odd_sizes_round_up_to_even`.
        assert_eq!(out.frame_size, src.frame_size);
        let one_frame = 1.0 / 30.0;
        assert!(
            (out.duration_secs - 3.0).abs() <= one_frame + 1e-3,
            "duration {}", out.duration_secs,
        );
    }
}
