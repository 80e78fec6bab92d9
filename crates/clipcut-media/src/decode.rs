// crates/clipcut-media/src/decode.rs
//
// frame_at: one-shot frame decode for the preview pane. Re-opens the file on
// every call; nothing is cached between requests.

use ffmpeg_the_third as ffmpeg;
use ffmpeg::codec;
use ffmpeg::format::{input, Pixel};
use ffmpeg::media::Type;
use ffmpeg::software::scaling::{context::Context as SwsContext, flag::Flags};
use ffmpeg::util::frame::video::Video as VideoFrame;

use clipcut_core::media_types::RgbFrame;
use clipcut_core::preview::FrameSource;

use crate::error::{MediaError, Result};
use crate::helpers::rgb::pack_rgb24;
use crate::helpers::seek::seek_to_secs;
use crate::helpers::timing::FrameClock;
use crate::probe::VideoHandle;

/// Decode the frame on screen at `timestamp` seconds, scaled to RGB24 at the
/// source's native display size.
///
/// `timestamp` is clamped to `[0, duration]`. If the demuxer hits EOF before
/// reaching it (the final frame of a clip), the last decoded frame is
/// returned instead.
pub fn frame_at(handle: &VideoHandle, timestamp: f64) -> Result<RgbFrame> {
    let timestamp = timestamp.clamp(0.0, handle.duration_secs.max(0.0));
    let mut ictx = input(&handle.path).map_err(|source| MediaError::Open {
        path: handle.path.clone(),
        source,
    })?;

    let (video_idx, tb, mut decoder) = {
        let stream = ictx.streams().best(Type::Video)
            .ok_or_else(|| MediaError::NoVideoStream(handle.path.clone()))?;
        let dec = codec::context::Context::from_parameters(stream.parameters())?
            .decoder()
            .video()?;
        (stream.index(), stream.time_base(), dec)
    };

    seek_to_secs(&mut ictx, timestamp, "frame_at");
    let mut clock = FrameClock::new(tb, handle.frame_rate, timestamp);
    // Frames more than half a frame before target are pre-roll from the
    // keyframe-aligned seek.
    let earliest = timestamp - clock.half_frame();

    let (out_w, out_h) = handle.frame_size;
    let mut scaler: Option<SwsContext> = None;
    // Most recent scaled frame, in case EOF arrives before the target.
    let mut last_good: Option<VideoFrame> = None;

    let mut decoded = VideoFrame::empty();
    for (stream, packet) in ictx.packets().flatten() {
        if stream.index() != video_idx { continue; }
        decoder.send_packet(&packet)?;
        while decoder.receive_frame(&mut decoded).is_ok() {
            let out = scale(&mut scaler, &decoded, out_w, out_h)?;
            if clock.stamp(&decoded) >= earliest {
                return Ok(to_rgb(&out, out_w, out_h));
            }
            last_good = Some(out);
        }
    }

    // Drain frames the codec is still holding (B-frame reorder).
    let _ = decoder.send_eof();
    while decoder.receive_frame(&mut decoded).is_ok() {
        let out = scale(&mut scaler, &decoded, out_w, out_h)?;
        if clock.stamp(&decoded) >= earliest {
            return Ok(to_rgb(&out, out_w, out_h));
        }
        last_good = Some(out);
    }

    last_good
        .map(|f| to_rgb(&f, out_w, out_h))
        .ok_or(MediaError::NoFrame(timestamp))
}

/// Build the scaler on first use (the decoder only knows its pixel format
/// once a frame is out) and run it.
fn scale(
    scaler:  &mut Option<SwsContext>,
    decoded: &VideoFrame,
    out_w:   u32,
    out_h:   u32,
) -> Result<VideoFrame> {
    if scaler.is_none() {
        *scaler = Some(SwsContext::get(
            decoded.format(), out_w, out_h,
            Pixel::RGB24,     out_w, out_h,
            Flags::BILINEAR,
        )?);
    }
    let mut out = VideoFrame::empty();
    if let Some(sc) = scaler.as_mut() {
        sc.run(decoded, &mut out)?;
    }
    Ok(out)
}

fn to_rgb(frame: &VideoFrame, w: u32, h: u32) -> RgbFrame {
    RgbFrame { width: w, height: h, data: pack_rgb24(frame, w, h) }
}

impl FrameSource for VideoHandle {
    fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    fn frame_at(&self, t: f64) -> anyhow::Result<RgbFrame> {
        Ok(frame_at(self, t)?)
    }
}
