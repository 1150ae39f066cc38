use crate::align::anchors::{find_anchors, AnchorPools};
use crate::align::overlap::align_overlap;
use crate::config::MatcherOptions;
use crate::lexical::{Dictionary, FrequencyPair, WordFrequencies};
use crate::pipeline::traits::{AnchorFinder, PairAligner};
use crate::types::{Alignment, SubtitleDoc};

/// Default anchor finder: the composite lexical matcher over the
/// configured dictionary and filters.
pub struct LexicalAnchorFinder {
    pub dictionary: Dictionary,
    pub matcher: MatcherOptions,
    pub window: usize,
    pub max_matches: usize,
}

impl AnchorFinder for LexicalAnchorFinder {
    fn find(
        &self,
        src: &SubtitleDoc,
        trg: &SubtitleDoc,
        cognate_threshold: Option<f64>,
    ) -> AnchorPools {
        let threshold = cognate_threshold.unwrap_or(self.matcher.cognate_threshold);
        if self.matcher.use_word_freq {
            let src_freq = WordFrequencies::from_doc(src);
            let trg_freq = WordFrequencies::from_doc(trg);
            find_anchors(
                src,
                trg,
                &self.dictionary,
                Some(FrequencyPair {
                    src: &src_freq,
                    trg: &trg_freq,
                }),
                &self.matcher,
                self.window,
                self.max_matches,
                threshold,
            )
        } else {
            find_anchors(
                src,
                trg,
                &self.dictionary,
                None,
                &self.matcher,
                self.window,
                self.max_matches,
                threshold,
            )
        }
    }
}

/// Default pair aligner: the temporal-overlap block walk.
pub struct OverlapPairAligner;

impl PairAligner for OverlapPairAligner {
    fn align(&self, src: &SubtitleDoc, trg: &SubtitleDoc) -> Alignment {
        align_overlap(src, trg)
    }
}

#[cfg(test)]
mod tests {
    use crate::types::Sentence;

    use super::*;

    fn doc(words_and_frames: &[(&[&str], f64, f64)]) -> SubtitleDoc {
        let mut doc = SubtitleDoc::default();
        for (i, (words, start, end)) in words_and_frames.iter().enumerate() {
            let mut s = Sentence::new(format!("{}", i + 1), 0);
            s.words = words.iter().map(|w| w.to_string()).collect();
            s.start = *start;
            s.end = *end;
            doc.sentences.push(s);
        }
        doc
    }

    #[test]
    fn lexical_finder_uses_the_configured_window() {
        let src = doc(&[(&["Theoden"], 0.0, 2.0), (&["Eomer"], 2.0, 4.0)]);
        let trg = doc(&[(&["Theoden"], 0.0, 2.0), (&["Eomer"], 2.0, 4.0)]);
        let finder = LexicalAnchorFinder {
            dictionary: Dictionary::default(),
            matcher: MatcherOptions::default(),
            window: 25,
            max_matches: 10,
        };
        let pools = finder.find(&src, &trg, None);
        assert!(!pools.prefix.is_empty());
        assert!(!pools.suffix.is_empty());
    }

    #[test]
    fn overlap_pair_aligner_matches_the_engine() {
        let src = doc(&[(&["a"], 0.0, 2.0)]);
        let trg = doc(&[(&["b"], 0.0, 2.0)]);
        let aligner = OverlapPairAligner;
        let alignment = aligner.align(&src, &trg);
        let expected = align_overlap(&src, &trg);
        assert_eq!(alignment.links, expected.links);
    }
}
