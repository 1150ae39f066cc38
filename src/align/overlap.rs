//! Sentence alignment by maximal temporal overlap.
//!
//! A left-to-right walk over the two frame sequences. At every step the
//! candidate block shapes are 1:1 plus the bounded merges 1:2, 2:1,
//! 1:3 and 3:1; the shape wasting the least non-shared time wins.

use std::collections::BTreeMap;

use crate::types::{Alignment, Link, SubtitleDoc};

/// Extra sentences merged beyond 1:1 on either side: `(ds, dt)` makes a
/// `(1+ds):(1+dt)` block. 1:1 is tried first; ties keep the earlier
/// candidate.
const MOVES: [(usize, usize); 5] = [(0, 0), (0, 1), (1, 0), (0, 2), (2, 0)];

/// Nudge applied to a degenerate source frame before overlap tests.
const ZERO_SLOT_NUDGE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Overlap {
    before_src: f64,
    before_trg: f64,
    after_src: f64,
    after_trg: f64,
    common: f64,
    not_common: f64,
}

fn frame_overlap(src: (f64, f64), trg: (f64, f64)) -> Overlap {
    let (s1, s2) = src;
    let (t1, t2) = trg;
    let before_src = (t1 - s1).max(0.0);
    let before_trg = (s1 - t1).max(0.0);
    let after_src = (s2 - t2).max(0.0);
    let after_trg = (t2 - s2).max(0.0);
    let common = s2.min(t2) - s1.max(t1);
    Overlap {
        before_src,
        before_trg,
        after_src,
        after_trg,
        common,
        not_common: before_src + before_trg + after_src + after_trg,
    }
}

/// Align two interpolated subtitle documents by temporal overlap.
pub fn align_overlap(src: &SubtitleDoc, trg: &SubtitleDoc) -> Alignment {
    let mut src_frames: Vec<(f64, f64)> = src.sentences.iter().map(|s| (s.start, s.end)).collect();
    let trg_frames: Vec<(f64, f64)> = trg.sentences.iter().map(|s| (s.start, s.end)).collect();
    let n = src_frames.len();
    let m = trg_frames.len();

    let mut links = Vec::new();
    let mut buckets: BTreeMap<String, usize> = BTreeMap::new();
    let mut empty = 0usize;
    let mut nonempty = 0usize;
    let mut s = 0usize;
    let mut t = 0usize;

    while s < n && t < m {
        if src_frames[s].0 >= src_frames[s].1 {
            tracing::warn!(
                id = src.sentences[s].id.as_str(),
                "zero-length source time slot, nudging start"
            );
            src_frames[s].0 -= ZERO_SLOT_NUDGE;
        }

        let here = frame_overlap(src_frames[s], trg_frames[t]);
        if here.common <= 0.0 {
            // One frame lies entirely before the other; the side whose
            // time sits ahead of its counterpart advances alone.
            let src_first =
                here.before_src + here.after_trg >= here.before_trg + here.after_src;
            if src_first {
                links.push(Link::one_to_zero(src.sentences[s].id.clone()));
                *buckets.entry("1:0".to_string()).or_insert(0) += 1;
                empty += 1;
                s += 1;
            } else {
                links.push(Link::zero_to_one(trg.sentences[t].id.clone()));
                *buckets.entry("0:1".to_string()).or_insert(0) += 1;
                empty += 1;
                t += 1;
            }
            continue;
        }

        let mut best: Option<(usize, usize, Overlap)> = None;
        for (ds, dt) in MOVES {
            if s + ds >= n || t + dt >= m {
                continue;
            }
            let block_src = (src_frames[s].0, src_frames[s + ds].1);
            let block_trg = (trg_frames[t].0, trg_frames[t + dt].1);
            let merged = frame_overlap(block_src, block_trg);
            if merged.common <= 0.0 {
                continue;
            }
            if best.is_none_or(|(_, _, b)| merged.not_common < b.not_common) {
                best = Some((ds, dt, merged));
            }
        }

        // The 1:1 candidate overlaps whenever we reach this point, so a
        // winner always exists.
        let Some((ds, dt, merged)) = best else {
            break;
        };
        let src_ids: Vec<String> = src.sentences[s..=s + ds]
            .iter()
            .map(|x| x.id.clone())
            .collect();
        let trg_ids: Vec<String> = trg.sentences[t..=t + dt]
            .iter()
            .map(|x| x.id.clone())
            .collect();
        links.push(Link {
            src_ids,
            trg_ids,
            common: Some(merged.common),
            not_common: Some(merged.not_common),
            overlap_ratio: Some(merged.common / (merged.common + merged.not_common)),
        });
        *buckets
            .entry(format!("{}:{}", ds + 1, dt + 1))
            .or_insert(0) += 1;
        nonempty += 1;
        s += ds + 1;
        t += dt + 1;
    }

    while s < n {
        links.push(Link::one_to_zero(src.sentences[s].id.clone()));
        *buckets.entry("1:0".to_string()).or_insert(0) += 1;
        empty += 1;
        s += 1;
    }
    while t < m {
        links.push(Link::zero_to_one(trg.sentences[t].id.clone()));
        *buckets.entry("0:1".to_string()).or_insert(0) += 1;
        empty += 1;
        t += 1;
    }

    tracing::debug!(links = links.len(), nonempty, empty, ?buckets, "overlap walk done");
    Alignment {
        links,
        buckets,
        empty,
        nonempty,
    }
}
