//! Lexical anchor matching.
//!
//! Decides whether two token lists share an anchor: a dictionary hit,
//! an identical-token run, or an LCS-ratio cognate. The strategies are
//! tried in that order and the first positive score wins.

pub mod dictionary;
pub mod lcs;

pub use dictionary::{Dictionary, WordFrequencies};

use crate::config::MatcherOptions;

/// Frequency tables of the two documents being matched.
#[derive(Debug, Clone, Copy)]
pub struct FrequencyPair<'a> {
    pub src: &'a WordFrequencies,
    pub trg: &'a WordFrequencies,
}

/// Composite match score for two token lists; 0 means no anchor.
pub fn match_score(
    src: &[String],
    trg: &[String],
    dic: &Dictionary,
    freqs: Option<FrequencyPair<'_>>,
    opts: &MatcherOptions,
) -> f64 {
    match_score_at(src, trg, dic, freqs, opts, opts.cognate_threshold)
}

/// Like [`match_score`] but with an explicit cognate threshold, used by
/// the cognate-range sweep.
pub fn match_score_at(
    src: &[String],
    trg: &[String],
    dic: &Dictionary,
    freqs: Option<FrequencyPair<'_>>,
    opts: &MatcherOptions,
    cognate_threshold: f64,
) -> f64 {
    if opts.use_dictionary && !dic.is_empty() {
        for s in src {
            for t in trg {
                if dic.contains(s, t) {
                    return 1.0;
                }
            }
        }
    }

    if opts.use_identical {
        let score = identical_run_score(src, trg, freqs, opts);
        if score > 0.0 {
            return score;
        }
    }

    if opts.use_cognates {
        let score = cognate_score(src, trg, opts, cognate_threshold);
        if score > 0.0 {
            return score;
        }
    }

    0.0
}

/// Longest run of tokens equal on both sides, measured in characters.
///
/// A run starts at any filtered token present in both lists and extends
/// greedily while the successor tokens stay equal. The run length must
/// exceed `min_match_length` to count; with frequency weighting the
/// score is divided by the summed maxima of the run tokens' document
/// frequencies.
fn identical_run_score(
    src: &[String],
    trg: &[String],
    freqs: Option<FrequencyPair<'_>>,
    opts: &MatcherOptions,
) -> f64 {
    let mut best_chars = 0usize;
    let mut best_run: &[String] = &[];

    for (i, s) in src.iter().enumerate() {
        if !passes_filters(s, opts) {
            continue;
        }
        for (j, t) in trg.iter().enumerate() {
            if s != t {
                continue;
            }
            let mut len = 1usize;
            while i + len < src.len() && j + len < trg.len() && src[i + len] == trg[j + len] {
                len += 1;
            }
            let chars: usize = src[i..i + len].iter().map(|w| w.chars().count()).sum();
            if chars > best_chars {
                best_chars = chars;
                best_run = &src[i..i + len];
            }
        }
    }

    if best_chars <= opts.min_match_length {
        return 0.0;
    }
    if opts.use_word_freq {
        if let Some(freqs) = freqs {
            let max_src = best_run.iter().map(|w| freqs.src.count(w)).max().unwrap_or(0);
            let max_trg = best_run.iter().map(|w| freqs.trg.count(w)).max().unwrap_or(0);
            let weight = (max_src + max_trg).max(1) as f64;
            return best_chars as f64 / weight;
        }
    }
    best_chars as f64
}

/// Best LCS ratio at or above the threshold among filtered token pairs.
fn cognate_score(src: &[String], trg: &[String], opts: &MatcherOptions, threshold: f64) -> f64 {
    let mut best = 0.0f64;
    for s in src {
        if !passes_filters(s, opts) {
            continue;
        }
        for t in trg {
            if !passes_filters(t, opts) {
                continue;
            }
            let ratio = lcs::lcs_ratio(s, t);
            if ratio >= threshold && ratio > best {
                best = ratio;
            }
        }
    }
    best
}

fn passes_filters(token: &str, opts: &MatcherOptions) -> bool {
    if token.chars().count() < opts.min_token_length {
        return false;
    }
    if opts.upper_case_only && !token.chars().next().is_some_and(char::is_uppercase) {
        return false;
    }
    if let Some(char_set) = &opts.char_set {
        if !char_set.is_match(token) {
            return false;
        }
    }
    true
}
