//! Best-anchor search: try candidate synchronizations derived from
//! prefix/suffix anchor pairs and keep the one scoring best.

use std::path::Path;
use std::process::Command;

use std::collections::BTreeSet;

use crate::config::SearchOptions;
use crate::error::AlignError;
use crate::pipeline::traits::PairAligner;
use crate::timing::{apply_transform, fit_line, fit_line_many};
use crate::types::{Alignment, SubtitleDoc};

use super::anchors::AnchorPools;

/// Result of one alignment run, with the score and the time transform
/// that produced it.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub alignment: Alignment,
    pub score: f64,
    pub slope: f64,
    pub offset: f64,
}

/// Run the aligner once unmodified, then once per prefix×suffix anchor
/// pair with the fitted time transform applied to the source side.
/// The configuration with the best non-empty/empty ratio wins.
pub fn best_anchor_align(
    aligner: &dyn PairAligner,
    src: &SubtitleDoc,
    trg: &SubtitleDoc,
    pools: &AnchorPools,
    opts: &SearchOptions,
) -> SearchOutcome {
    let incumbent = aligner.align(src, trg);
    let mut best = SearchOutcome {
        score: incumbent.ratio_score(opts.proportion_score),
        alignment: incumbent,
        slope: 1.0,
        offset: 0.0,
    };
    tracing::debug!(score = best.score, "unmodified alignment scored");

    for p in &pools.prefix {
        for q in &pools.suffix {
            let x1 = src.sentences[p.src].start;
            let y1 = trg.sentences[p.trg].start;
            let x2 = src.sentences[q.src].start;
            let y2 = trg.sentences[q.trg].start;
            let (slope, offset) = fit_line((x1, y1), (x2, y2));
            if slope <= 0.0 {
                tracing::warn!(slope, "non-positive slope, skipping anchor pair");
                continue;
            }
            try_transform(aligner, src, trg, slope, offset, opts, &mut best);
        }
    }

    // With more than two distinct anchors on the table, also score one
    // transform averaged over all of them.
    let mut seen = BTreeSet::new();
    let mut points = Vec::new();
    for anchor in pools.prefix.iter().chain(&pools.suffix) {
        if seen.insert((anchor.src, anchor.trg)) {
            points.push((
                src.sentences[anchor.src].start,
                trg.sentences[anchor.trg].start,
            ));
        }
    }
    if points.len() > 2 {
        let (slope, offset) = fit_line_many(&points);
        if slope > 0.0 {
            try_transform(aligner, src, trg, slope, offset, opts, &mut best);
        } else {
            tracing::warn!(slope, "non-positive slope, skipping pooled anchor fit");
        }
    }

    tracing::debug!(
        score = best.score,
        slope = best.slope,
        offset = best.offset,
        "best-anchor search done"
    );
    best
}

/// Apply a candidate transform to the source side, rerun the aligner
/// and keep the result when it beats the incumbent.
fn try_transform(
    aligner: &dyn PairAligner,
    src: &SubtitleDoc,
    trg: &SubtitleDoc,
    slope: f64,
    offset: f64,
    opts: &SearchOptions,
    best: &mut SearchOutcome,
) {
    let mut shifted = src.clone();
    apply_transform(&mut shifted, slope, offset);
    let alignment = aligner.align(&shifted, trg);
    let score = alignment.ratio_score(opts.proportion_score);
    tracing::debug!(slope, offset, score, "candidate synchronization scored");
    if score > best.score {
        *best = SearchOutcome {
            alignment,
            score,
            slope,
            offset,
        };
    }
}

/// Hand the input pair to an external fallback aligner, forwarding its
/// stdout. Returns `Ok(None)` when the executable cannot be resolved on
/// `PATH`; candidates that exist but fail to run are an I/O error.
pub fn run_fallback(
    name: &str,
    src_path: &Path,
    trg_path: &Path,
) -> Result<Option<String>, AlignError> {
    let Some(resolved) = resolve_on_path(name) else {
        tracing::warn!(name, "fallback aligner not found on PATH");
        return Ok(None);
    };
    tracing::debug!(resolved = %resolved.display(), "delegating to fallback aligner");
    let output = Command::new(&resolved)
        .arg(src_path)
        .arg(trg_path)
        .output()
        .map_err(|err| AlignError::io(format!("running fallback {}", resolved.display()), err))?;
    let stdout = String::from_utf8(output.stdout)
        .map_err(|_| AlignError::encoding(format!("fallback {name} output")))?;
    Ok(Some(stdout))
}

fn resolve_on_path(name: &str) -> Option<std::path::PathBuf> {
    if name.contains(std::path::MAIN_SEPARATOR) {
        let path = std::path::PathBuf::from(name);
        return path.is_file().then_some(path);
    }
    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}
