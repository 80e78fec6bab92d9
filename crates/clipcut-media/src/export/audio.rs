// crates/clipcut-media/src/export/audio.rs
//
// AAC side of an export. Source audio of any layout/rate/format is resampled
// to stereo FLTP at AUDIO_RATE and queued in a FIFO, because the AAC encoder
// only takes fixed-size frames (`frame_size()`, normally 1024 samples).
//
// Output PTS is a running sample counter starting at 0 in 1/AUDIO_RATE.

use ffmpeg_the_third as ffmpeg;
use ffmpeg::codec::{self, Id as CodecId};
use ffmpeg::encoder;
use ffmpeg::format::Sample;
use ffmpeg::format::sample::Type as SampleType;
use ffmpeg::software::resampling;
use ffmpeg::util::channel_layout::{ChannelLayout, ChannelLayoutMask};
use ffmpeg::util::frame::audio::Audio as AudioFrame;
use ffmpeg::util::rational::Rational;
use ffmpeg::Packet;

use clipcut_core::settings::AUDIO_RATE;

use crate::error::{MediaError, Result};

const AAC_BIT_RATE: usize = 128_000;

/// Planar stereo f32 sample queue. Mono input fills both planes.
#[derive(Default)]
pub(crate) struct SampleFifo {
    left:  Vec<f32>,
    right: Vec<f32>,
}

impl SampleFifo {
    /// Samples buffered per channel.
    pub(crate) fn len(&self) -> usize {
        self.left.len()
    }

    pub(crate) fn extend(&mut self, left: &[f32], right: &[f32]) {
        self.left.extend_from_slice(left);
        self.right.extend_from_slice(right);
    }

    /// Append one FLTP frame (stereo, or mono duplicated to both planes).
    fn push_frame(&mut self, frame: &AudioFrame) {
        let n = frame.samples();
        if n == 0 { return; }
        let right_plane = if frame.ch_layout().channels() >= 2 { 1 } else { 0 };
        // SAFETY: the frame is FLTP, so each plane holds `n` f32 samples.
        let (l, r) = unsafe {
            (
                std::slice::from_raw_parts(frame.data(0).as_ptr() as *const f32, n),
                std::slice::from_raw_parts(frame.data(right_plane).as_ptr() as *const f32, n),
            )
        };
        self.extend(l, r);
    }

    /// Remove up to `n` samples per channel from the front, zero-padding to
    /// exactly `n` when fewer are queued.
    pub(crate) fn pop_padded(&mut self, n: usize) -> (Vec<f32>, Vec<f32>) {
        let take = self.left.len().min(n);
        let mut l: Vec<f32> = self.left.drain(..take).collect();
        let mut r: Vec<f32> = self.right.drain(..take).collect();
        l.resize(n, 0.0);
        r.resize(n, 0.0);
        (l, r)
    }
}

/// Encoder, resampler and FIFO for the output's audio stream.
pub(crate) struct AudioTrack {
    encoder:     encoder::Audio,
    resampler:   Option<resampling::Context>,
    fifo:        SampleFifo,
    frame_size:  usize,
    next_sample: i64,
    stream_idx:  usize,
    enc_tb:      Rational,
    /// Timebase the muxer picked for the stream, read after the header is
    /// written.
    mux_tb:      Rational,
}

impl AudioTrack {
    /// Add an AAC stream at index `stream_idx` to `octx`. Call before
    /// `write_header`.
    pub(crate) fn add_to(
        octx:       &mut ffmpeg::format::context::Output,
        stream_idx: usize,
    ) -> Result<Self> {
        let enc_tb = Rational::new(1, AUDIO_RATE);
        let aac = encoder::find(CodecId::AAC)
            .ok_or_else(|| MediaError::Encode("AAC encoder not found".into()))?;

        let mut ost = octx.add_stream(aac)
            .map_err(|e| MediaError::Encode(format!("add audio stream: {e}")))?;
        ost.set_time_base(enc_tb);

        let mut enc = codec::context::Context::new_with_codec(aac)
            .encoder()
            .audio()
            .map_err(|e| MediaError::Encode(format!("audio encoder context: {e}")))?;
        enc.set_rate(AUDIO_RATE);
        enc.set_ch_layout(ChannelLayout::STEREO);
        enc.set_format(Sample::F32(SampleType::Planar));
        enc.set_bit_rate(AAC_BIT_RATE);

        let encoder = enc.open_as_with(aac, ffmpeg::Dictionary::new())
            .map_err(|e| MediaError::Encode(format!("open AAC encoder: {e}")))?;
        let frame_size = (encoder.frame_size() as usize).max(1024);

        // encoder::Audio doesn't implement AsPtr<AVCodecParameters>, so copy
        // the opened context into the stream's codecpar through FFI.
        unsafe {
            let ret = ffmpeg::ffi::avcodec_parameters_from_context(
                (**(*octx.as_mut_ptr()).streams.add(stream_idx)).codecpar,
                encoder.as_ptr() as *mut ffmpeg::ffi::AVCodecContext,
            );
            if ret < 0 {
                return Err(MediaError::Encode(format!("audio codecpar copy failed: {ret}")));
            }
        }

        Ok(Self {
            encoder,
            resampler: None,
            fifo: SampleFifo::default(),
            frame_size,
            next_sample: 0,
            stream_idx,
            enc_tb,
            mux_tb: enc_tb,
        })
    }

    /// Pick up the muxer's timebase. Call once, after `write_header`.
    pub(crate) fn sync_timebase(&mut self, octx: &ffmpeg::format::context::Output) {
        if let Some(s) = octx.stream(self.stream_idx) {
            self.mux_tb = s.time_base();
        }
    }

    /// Queue one decoded source frame, resampling when it isn't already
    /// stereo FLTP at AUDIO_RATE.
    pub(crate) fn push(&mut self, raw: &AudioFrame) -> Result<()> {
        let target = Sample::F32(SampleType::Planar);
        let channels = raw.ch_layout().channels();
        let ready = raw.format() == target && raw.rate() == AUDIO_RATE as u32 && channels == 2;
        if ready {
            self.fifo.push_frame(raw);
            return Ok(());
        }

        if self.resampler.is_none() {
            // Mono must be declared explicitly or swr misreads the layout.
            let src_layout = if channels >= 2 { raw.ch_layout() } else { ChannelLayout::MONO };
            let rs = resampling::Context::get2(
                raw.format(), src_layout,            raw.rate(),
                target,       ChannelLayout::STEREO, AUDIO_RATE as u32,
            ).map_err(|e| MediaError::Encode(format!("audio resampler: {e}")))?;
            self.resampler = Some(rs);
        }

        if let Some(rs) = self.resampler.as_mut() {
            let mut resampled = AudioFrame::empty();
            if rs.run(raw, &mut resampled).is_ok() && resampled.samples() > 0 {
                self.fifo.push_frame(&resampled);
            }
        }
        Ok(())
    }

    /// Encode every full frame in the FIFO. With `flush`, the remainder is
    /// zero-padded and encoded too.
    pub(crate) fn drain(
        &mut self,
        octx:  &mut ffmpeg::format::context::Output,
        flush: bool,
    ) -> Result<()> {
        while self.fifo.len() >= self.frame_size || (flush && self.fifo.len() > 0) {
            let (l, r) = self.fifo.pop_padded(self.frame_size);
            let frame = self.build_frame(&l, &r);
            self.next_sample += self.frame_size as i64;
            self.encoder.send_frame(&frame)
                .map_err(|e| MediaError::Encode(format!("send audio frame: {e}")))?;
            self.write_packets(octx)?;
        }
        Ok(())
    }

    /// Flush the FIFO tail, then the encoder itself.
    pub(crate) fn finish(&mut self, octx: &mut ffmpeg::format::context::Output) -> Result<()> {
        self.drain(octx, true)?;
        self.encoder.send_eof()
            .map_err(|e| MediaError::Encode(format!("audio encoder EOF: {e}")))?;
        self.write_packets(octx)
    }

    fn build_frame(&self, l: &[f32], r: &[f32]) -> AudioFrame {
        let n = self.frame_size;
        let mut frame = AudioFrame::new(Sample::F32(SampleType::Planar), n, ChannelLayoutMask::STEREO);
        frame.set_rate(AUDIO_RATE as u32);
        frame.set_pts(Some(self.next_sample));
        // SAFETY: freshly allocated FLTP stereo frame of `n` samples per plane.
        unsafe {
            let ldst = std::slice::from_raw_parts_mut(frame.data_mut(0).as_mut_ptr() as *mut f32, n);
            ldst.copy_from_slice(l);
            let rdst = std::slice::from_raw_parts_mut(frame.data_mut(1).as_mut_ptr() as *mut f32, n);
            rdst.copy_from_slice(r);
        }
        frame
    }

    fn write_packets(&mut self, octx: &mut ffmpeg::format::context::Output) -> Result<()> {
        let mut pkt = Packet::empty();
        while self.encoder.receive_packet(&mut pkt).is_ok() {
            pkt.set_stream(self.stream_idx);
            pkt.rescale_ts(self.enc_tb, self.mux_tb);
            pkt.write_interleaved(octx)
                .map_err(|e| MediaError::Encode(format!("write audio packet: {e}")))?;
        }
        Ok(())
    }
}
