//! Derive per-sentence `start`/`end` seconds from sparse inline time
//! markers and character positions.

use crate::types::{SubtitleDoc, TimePoint};

/// Smallest representable shift applied to keep `start < end`.
const FRAME_TICK: f64 = 1e-8;

/// Annotate every sentence of `doc` with derived `start`/`end` times.
///
/// Missing markers are completed from the neighbours: an absent `first`
/// takes the previous sentence's end (0 for the first sentence), an
/// absent `last` takes the next defined marker downstream. Markers that
/// do not sit exactly on the sentence boundary are linearly
/// interpolated over character positions. The `(scale, offset)`
/// transform is applied last; `(1, 0)` leaves raw times untouched.
pub fn interpolate(doc: &mut SubtitleDoc, scale: f64, offset: f64) {
    let n = doc.sentences.len();
    let mut prev_last = 0.0f64;

    for i in 0..n {
        demote_single_marker(doc, i);

        if doc.sentences[i].first.is_none() {
            let pos = doc.sentences[i].start_pos;
            doc.sentences[i].first = Some(TimePoint {
                seconds: prev_last,
                pos,
            });
        }

        if doc.sentences[i].last.is_none() {
            let downstream = next_defined_marker(doc, i + 1);
            let s = &mut doc.sentences[i];
            s.last = Some(downstream.unwrap_or(TimePoint {
                seconds: s.first.map(|m| m.seconds).unwrap_or(0.0),
                pos: s.end_pos,
            }));
        }

        let s = &mut doc.sentences[i];
        let (Some(first), Some(last)) = (s.first, s.last) else {
            continue;
        };
        let mut first_sec = first.seconds;
        let mut last_sec = last.seconds;
        let span = last_sec - first_sec;
        let denom = last.pos as f64 - first.pos as f64;

        if denom > 0.0 {
            if first.pos != s.start_pos {
                first_sec -= span * (first.pos as f64 - s.start_pos as f64) / denom;
            }
            if last.pos != s.end_pos {
                last_sec += span * (s.end_pos as f64 - last.pos as f64) / denom;
            }
        }

        s.start = scale * first_sec + offset;
        s.end = scale * last_sec + offset;
        if s.start >= s.end {
            if s.start > s.end {
                tracing::warn!(
                    id = s.id.as_str(),
                    start = s.start,
                    end = s.end,
                    "inverted time slot, nudging start"
                );
            }
            s.start = s.end - FRAME_TICK;
        }
        prev_last = last_sec;
    }
}

/// A lone marker sitting on the sentence-end position is the end time.
fn demote_single_marker(doc: &mut SubtitleDoc, i: usize) {
    let s = &mut doc.sentences[i];
    if s.last.is_none() {
        if let Some(first) = s.first {
            if first.pos == s.end_pos {
                s.first = None;
                s.last = Some(first);
            }
        }
    }
}

fn next_defined_marker(doc: &SubtitleDoc, from: usize) -> Option<TimePoint> {
    doc.sentences[from..]
        .iter()
        .find_map(|s| s.first.or(s.last))
}
