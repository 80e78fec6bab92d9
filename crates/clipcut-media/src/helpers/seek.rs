// crates/clipcut-media/src/helpers/seek.rs
//
// Every seek in ClipCut goes through here so the start-of-file skip and the
// soft-fail logging live in one place.

use ffmpeg_the_third as ffmpeg;
use tracing::warn;

/// Seek `ictx` to the keyframe at or before `target_secs`.
///
/// Returns `true` if the seek succeeded or was skipped because the target is
/// the start of the file. Returns `false` on failure; the demuxer then reads
/// from its current position and the caller's PTS filter drops pre-roll.
///
/// A backward seek (`..=seek_ts`) is used so the first decoded frame is never
/// later than the target. `avformat_seek_file(max_ts=0)` fails with EPERM on
/// Windows for a freshly-opened context, hence the skip at 0.
pub fn seek_to_secs(
    ictx:        &mut ffmpeg::format::context::Input,
    target_secs: f64,
    label:       &str,
) -> bool {
    if target_secs <= 0.0 {
        return true;
    }

    let seek_ts = secs_to_av_time(target_secs);
    match ictx.seek(seek_ts, ..=seek_ts) {
        Ok(()) => true,
        Err(e) => {
            warn!(target: "seek", "soft-fail in {label} at {target_secs:.3}s: {e}, decoding from current position");
            false
        }
    }
}

/// Seconds → `AV_TIME_BASE` units, the timebase `avformat_seek_file` uses
/// when no stream index is given.
pub fn secs_to_av_time(secs: f64) -> i64 {
    (secs * ffmpeg::ffi::AV_TIME_BASE as f64) as i64
}
