use crate::align::anchors::AnchorPools;
use crate::types::{Alignment, SubtitleDoc};

/// Discovers candidate anchor pairs near the document edges.
pub trait AnchorFinder: Send + Sync {
    /// Build the prefix/suffix anchor pools for a document pair. The
    /// cognate threshold override drives the cognate-range sweep;
    /// `None` uses the configured threshold.
    fn find(
        &self,
        src: &SubtitleDoc,
        trg: &SubtitleDoc,
        cognate_threshold: Option<f64>,
    ) -> AnchorPools;
}

/// Aligns two interpolated documents into sentence links.
pub trait PairAligner: Send + Sync {
    fn align(&self, src: &SubtitleDoc, trg: &SubtitleDoc) -> Alignment;
}
