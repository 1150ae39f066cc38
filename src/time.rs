//! Subtitle timestamp arithmetic: `HH:MM:SS,mmm` to seconds and back.

use std::cmp::Ordering;

use crate::error::AlignError;

/// Parse an `HH:MM:SS,mmm` timestamp into seconds.
///
/// The components are extracted by splitting on any run of characters
/// that is neither a digit nor a minus sign, so `HH:MM:SS.mmm` and other
/// separator variants parse the same way.
pub fn time_to_sec(text: &str) -> Result<f64, AlignError> {
    let parts: Vec<&str> = text
        .split(|c: char| !c.is_ascii_digit() && c != '-')
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() != 4 {
        return Err(AlignError::parse(
            "timestamp",
            format!("expected HH:MM:SS,mmm, got {text:?}"),
        ));
    }
    let mut fields = [0i64; 4];
    for (slot, part) in fields.iter_mut().zip(&parts) {
        *slot = part.parse().map_err(|_| {
            AlignError::parse("timestamp", format!("non-numeric component in {text:?}"))
        })?;
    }
    let [h, m, s, ms] = fields;
    Ok(h as f64 * 3600.0 + m as f64 * 60.0 + s as f64 + ms as f64 / 1000.0)
}

/// Format seconds as an `HH:MM:SS,mmm` timestamp.
///
/// Negative inputs clamp to zero; resynchronization can push a frame
/// slightly before the start of the track.
pub fn sec_to_time(seconds: f64) -> String {
    let total_ms = (seconds * 1000.0).round().max(0.0) as i64;
    let ms = total_ms % 1000;
    let s = (total_ms / 1000) % 60;
    let m = (total_ms / 60_000) % 60;
    let h = total_ms / 3_600_000;
    format!("{h:02}:{m:02}:{s:02},{ms:03}")
}

/// Total order on frame start times, for sorting sentence frames.
pub fn cmp_start(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}
