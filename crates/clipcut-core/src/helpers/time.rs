// crates/clipcut-core/src/helpers/time.rs
//
// Time formatting for the slider read-outs and the clip info line.

/// Format seconds as `MM:SS.mmm`, the precision the range sliders work at.
///
/// ```
/// use clipcut_core::helpers::time::format_time;
/// assert_eq!(format_time(0.0),    "00:00.000");
/// assert_eq!(format_time(61.5),   "01:01.500");
/// assert_eq!(format_time(3599.25), "59:59.250");
/// ```
pub fn format_time(s: f64) -> String {
    let s     = s.max(0.0);
    let total = (s * 1000.0).round() as u64;
    let m     = total / 60_000;
    let sc    = (total / 1000) % 60;
    let ms    = total % 1000;
    format!("{m:02}:{sc:02}.{ms:03}")
}

/// Format a duration in seconds as a compact human-readable string.
///
/// | Range         | Format       | Example   |
/// |---------------|--------------|-----------|
/// | ≥ 3600 s      | `H:MM:SS`    | `1:04:35` |
/// | ≥ 60 s        | `M:SS`       | `3:07`    |
/// | < 60 s        | `S.Xs`       | `4.2s`    |
///
/// ```
/// use clipcut_core::helpers::time::format_duration;
/// assert_eq!(format_duration(4.2),    "4.2s");
/// assert_eq!(format_duration(187.0),  "3:07");
/// assert_eq!(format_duration(3875.0), "1:04:35");
/// ```
pub fn format_duration(secs: f64) -> String {
    if secs >= 3600.0 {
        format!(
            "{}:{:02}:{:02}",
            secs as u64 / 3600,
            (secs as u64 % 3600) / 60,
            secs as u64 % 60,
        )
    } else if secs >= 60.0 {
        format!("{}:{:02}", secs as u64 / 60, secs as u64 % 60)
    } else {
        format!("{secs:.1}s")
    }
}
