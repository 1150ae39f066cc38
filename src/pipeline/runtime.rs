use std::path::Path;

use crate::align::search::{best_anchor_align, run_fallback, SearchOutcome};
use crate::config::{MatcherOptions, SearchOptions};
use crate::error::AlignError;
use crate::pipeline::traits::{AnchorFinder, PairAligner};
use crate::reader;
use crate::timing::interpolate;
use crate::types::SubtitleDoc;

/// Step of the cognate-threshold sweep.
const SWEEP_STEP: f64 = 0.05;

/// The assembled overlap-alignment engine.
pub struct SubtitleAligner {
    anchor_finder: Box<dyn AnchorFinder>,
    pair_aligner: Box<dyn PairAligner>,
    matcher: MatcherOptions,
    search: SearchOptions,
}

pub(crate) struct SubtitleAlignerParts {
    pub anchor_finder: Box<dyn AnchorFinder>,
    pub pair_aligner: Box<dyn PairAligner>,
    pub matcher: MatcherOptions,
    pub search: SearchOptions,
}

/// Final result of aligning one file pair.
pub enum EngineOutput {
    /// The engine produced the alignment itself.
    Aligned(SearchOutcome),
    /// A fallback aligner produced the output; forward it verbatim.
    Delegated(String),
}

impl SubtitleAligner {
    pub(crate) fn from_parts(parts: SubtitleAlignerParts) -> Self {
        Self {
            anchor_finder: parts.anchor_finder,
            pair_aligner: parts.pair_aligner,
            matcher: parts.matcher,
            search: parts.search,
        }
    }

    /// Align two parsed and interpolated documents.
    pub fn align_documents(&self, src: &SubtitleDoc, trg: &SubtitleDoc) -> SearchOutcome {
        if !self.search.best_align {
            let alignment = self.pair_aligner.align(src, trg);
            let score = alignment.ratio_score(self.search.proportion_score);
            return SearchOutcome {
                alignment,
                score,
                slope: 1.0,
                offset: 0.0,
            };
        }

        match (self.matcher.use_cognates, self.matcher.cognate_range) {
            (true, Some(range)) => self.sweep_cognates(src, trg, range),
            _ => {
                let pools = self.anchor_finder.find(src, trg, None);
                best_anchor_align(self.pair_aligner.as_ref(), src, trg, &pools, &self.search)
            }
        }
    }

    /// Re-run anchor discovery and the best-anchor search for cognate
    /// thresholds from 1.0 down to `range` in 0.05 steps, keeping the
    /// best-scoring configuration.
    fn sweep_cognates(&self, src: &SubtitleDoc, trg: &SubtitleDoc, range: f64) -> SearchOutcome {
        let mut best: Option<SearchOutcome> = None;
        let mut threshold = 1.0f64;
        while threshold >= range - 1e-9 {
            let pools = self.anchor_finder.find(src, trg, Some(threshold));
            let outcome =
                best_anchor_align(self.pair_aligner.as_ref(), src, trg, &pools, &self.search);
            tracing::debug!(threshold, score = outcome.score, "cognate sweep step");
            if best.as_ref().is_none_or(|b| outcome.score > b.score) {
                best = Some(outcome);
            }
            threshold -= SWEEP_STEP;
        }
        best.unwrap_or_else(|| {
            let alignment = self.pair_aligner.align(src, trg);
            let score = alignment.ratio_score(self.search.proportion_score);
            SearchOutcome {
                alignment,
                score,
                slope: 1.0,
                offset: 0.0,
            }
        })
    }

    /// Read, interpolate and align a file pair, delegating to the
    /// configured fallback aligner when the best score stays low.
    pub fn align_files(&self, src_path: &Path, trg_path: &Path) -> Result<EngineOutput, AlignError> {
        let src = read_interpolated(src_path)?;
        let trg = read_interpolated(trg_path)?;
        let outcome = self.align_documents(&src, &trg);

        if outcome.score < SearchOptions::FALLBACK_SCORE {
            if let Some(name) = &self.search.fallback {
                if let Some(stdout) = run_fallback(name, src_path, trg_path)? {
                    return Ok(EngineOutput::Delegated(stdout));
                }
            }
        }
        Ok(EngineOutput::Aligned(outcome))
    }
}

fn read_interpolated(path: &Path) -> Result<SubtitleDoc, AlignError> {
    let mut doc = reader::xml::read_file(path)?;
    interpolate(&mut doc, 1.0, 0.0);
    doc.sort_frames();
    tracing::debug!(path = %path.display(), sentences = doc.len(), "document parsed");
    Ok(doc)
}
