//! Length-based projection of template time frames onto translation
//! fragments, Gale–Church style with sentence-end and line-length priors.

use crate::config::ProjectorOptions;

use super::fragment::Fragment;

/// One template frame: a time slot and the character length of its text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemplateFrame {
    pub start: f64,
    pub end: f64,
    pub chars: usize,
}

/// One projected link: template frame index and the half-open range of
/// translation fragments assigned to it.
#[derive(Debug, Clone, PartialEq)]
pub struct LengthLink {
    pub frame: usize,
    pub fragments: std::ops::Range<usize>,
}

/// Block moves: a template frame always consumes one source slot, the
/// target side absorbs zero to four fragments.
const MOVES: [(usize, usize); 5] = [(1, 0), (1, 1), (1, 2), (1, 3), (1, 4)];
const PRIORS: [f64; 5] = [0.04, 0.24, 0.24, 0.24, 0.24];

/// Cost returned when the Gaussian tail underflows to zero.
const UNDERFLOW_COST: f64 = 25.0;

/// Align template frames to translation fragments over cumulative
/// character lengths. Every frame receives a (possibly empty) fragment
/// range; every fragment is consumed exactly once.
pub fn align_lengths(
    frames: &[TemplateFrame],
    fragments: &[Fragment],
    opts: &ProjectorOptions,
) -> Vec<LengthLink> {
    let n = frames.len();
    let m = fragments.len();
    if n == 0 {
        return Vec::new();
    }

    let mut len1 = vec![0usize; n + 1];
    for (i, frame) in frames.iter().enumerate() {
        len1[i + 1] = len1[i] + frame.chars;
    }
    let mut len2 = vec![0usize; m + 1];
    for (j, fragment) in fragments.iter().enumerate() {
        len2[j + 1] = len2[j] + fragment.chars;
    }

    let width = m + 1;
    let mut cost = vec![f64::INFINITY; (n + 1) * width];
    let mut back = vec![0u8; (n + 1) * width];
    cost[0] = 0.0;

    for i1 in 1..=n {
        for i2 in 0..=m {
            let mut best = f64::INFINITY;
            let mut best_move = 0u8;
            for (k, &(d1, d2)) in MOVES.iter().enumerate() {
                if i2 < d2 {
                    continue;
                }
                let prev = cost[(i1 - d1) * width + (i2 - d2)];
                if !prev.is_finite() {
                    continue;
                }
                let l1 = len1[i1] - len1[i1 - d1];
                let l2 = len2[i2] - len2[i2 - d2];
                let eos = if i2 > 0 && fragments[i2 - 1].sent_end {
                    1.0
                } else {
                    opts.not_eos_penalty
                };
                let length = if l2 > opts.hard_max_line_length {
                    1.0
                } else {
                    opts.length_limit_penalty
                };
                let candidate =
                    prev - (length * eos * PRIORS[k]).ln() + match_cost(l1, l2);
                if candidate < best {
                    best = candidate;
                    best_move = k as u8;
                }
            }
            cost[i1 * width + i2] = best;
            back[i1 * width + i2] = best_move;
        }
    }

    // The exact corner may be unreachable when the translation carries
    // more than four fragments per frame; back off to the furthest
    // reachable column and attach the leftovers to the final frame.
    let mut end_col = m;
    while end_col > 0 && !cost[n * width + end_col].is_finite() {
        end_col -= 1;
    }
    if end_col != m {
        tracing::warn!(
            unassigned = m - end_col,
            "translation too fragmented for the template, attaching leftovers"
        );
    }

    let mut links = vec![
        LengthLink {
            frame: 0,
            fragments: 0..0,
        };
        n
    ];
    let mut i1 = n;
    let mut i2 = end_col;
    while i1 > 0 {
        let (d1, d2) = MOVES[back[i1 * width + i2] as usize];
        links[i1 - 1] = LengthLink {
            frame: i1 - 1,
            fragments: (i2 - d2)..i2,
        };
        i1 -= d1;
        i2 -= d2;
    }
    if end_col != m {
        links[n - 1].fragments.end = m;
    }
    links
}

/// Gale–Church length match: the probability that two spans of `l1` and
/// `l2` characters are mutual translations, as a negative log.
pub fn match_cost(l1: usize, l2: usize) -> f64 {
    if l1 == 0 && l2 == 0 {
        return 0.0;
    }
    const C: f64 = 1.0;
    const S2: f64 = 6.8;
    let l1 = l1 as f64;
    let l2 = l2 as f64;
    let mean = (l1 + l2 / C) / 2.0;
    let z = (C * l1 - l2).abs() / (S2 * mean).sqrt();
    let p = 2.0 * (1.0 - normal_cdf(z));
    if p > 0.0 {
        -p.ln()
    } else {
        UNDERFLOW_COST
    }
}

/// Standard normal CDF, Zelen–Severo rational approximation.
fn normal_cdf(z: f64) -> f64 {
    const B: [f64; 5] = [
        0.319381530,
        -0.356563782,
        1.781477937,
        -1.821255978,
        1.330274429,
    ];
    const P: f64 = 0.2316419;
    let t = 1.0 / (1.0 + P * z);
    let poly = t * (B[0] + t * (B[1] + t * (B[2] + t * (B[3] + t * B[4]))));
    let pdf = (-z * z / 2.0).exp() / (2.0 * std::f64::consts::PI).sqrt();
    1.0 - pdf * poly
}
