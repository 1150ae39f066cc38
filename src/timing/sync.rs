//! Linear time resynchronization between two subtitle tracks.

use crate::types::SubtitleDoc;

/// Fit `y = slope·x + offset` through two timestamp pairs.
///
/// Returns the identity transform `(1, 0)` when the x coordinates
/// coincide and no slope can be derived.
pub fn fit_line(p1: (f64, f64), p2: (f64, f64)) -> (f64, f64) {
    let (x1, y1) = p1;
    let (x2, y2) = p2;
    if x1 == x2 {
        return (1.0, 0.0);
    }
    let slope = (y1 - y2) / (x1 - x2);
    let offset = y1 - slope * x1;
    (slope, offset)
}

/// Fit a transform through more than two matches by averaging the
/// per-pair slope and offset across all combinations.
pub fn fit_line_many(points: &[(f64, f64)]) -> (f64, f64) {
    if points.len() < 2 {
        return (1.0, 0.0);
    }
    let mut slope_sum = 0.0;
    let mut offset_sum = 0.0;
    let mut pairs = 0usize;
    for (i, &a) in points.iter().enumerate() {
        for &b in &points[i + 1..] {
            let (slope, offset) = fit_line(a, b);
            slope_sum += slope;
            offset_sum += offset;
            pairs += 1;
        }
    }
    (slope_sum / pairs as f64, offset_sum / pairs as f64)
}

/// Rescale every frame of `doc` by `start/end ← slope·t + offset`.
///
/// Callers must reject non-positive slopes before applying; the frame
/// order and the `start < end` contract survive any positive slope.
pub fn apply_transform(doc: &mut SubtitleDoc, slope: f64, offset: f64) {
    for s in &mut doc.sentences {
        s.start = slope * s.start + offset;
        s.end = slope * s.end + offset;
    }
}
