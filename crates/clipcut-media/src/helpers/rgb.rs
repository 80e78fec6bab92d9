// crates/clipcut-media/src/helpers/rgb.rs
//
// swscale output rows carry stride padding. The preview and the tests want
// tightly packed RGB24, so strip it here.

use ffmpeg_the_third::util::frame::video::Video as VideoFrame;

/// Copy the visible `w × h` pixels of an RGB24 frame into a packed buffer.
pub fn pack_rgb24(frame: &VideoFrame, w: u32, h: u32) -> Vec<u8> {
    destride(frame.data(0), frame.stride(0), w as usize * 3, h as usize)
}

/// Keep the first `row_bytes` of each of `rows` rows spaced `stride` apart.
pub fn destride(raw: &[u8], stride: usize, row_bytes: usize, rows: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(row_bytes * rows);
    for row in 0..rows {
        let s = row * stride;
        out.extend_from_slice(&raw[s..s + row_bytes]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_is_dropped() {
        // 2×2 RGB with 8-byte stride: 6 visible bytes + 2 padding per row.
        let raw = [
            1, 2, 3, 4, 5, 6, 0xEE, 0xEE,
            7, 8, 9, 10, 11, 12, 0xEE, 0xEE,
        ];
        assert_eq!(destride(&raw, 8, 6, 2), vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
    }

    #[test]
    fn packed_input_is_unchanged() {
        let raw: Vec<u8> = (0..12).collect();
        assert_eq!(destride(&raw, 6, 6, 2), raw);
    }
}
