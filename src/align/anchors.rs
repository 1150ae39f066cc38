//! Anchor discovery in the prefix and suffix windows of a document pair.

use crate::config::MatcherOptions;
use crate::lexical::{self, Dictionary, FrequencyPair};
use crate::types::{AnchorPoint, SubtitleDoc};

/// Candidate anchors near the two document edges, sorted best-first.
#[derive(Debug, Clone, Default)]
pub struct AnchorPools {
    pub prefix: Vec<AnchorPoint>,
    pub suffix: Vec<AnchorPoint>,
}

/// Scan the top and bottom `window` sentences of both documents for
/// sentence pairs sharing a lexical match.
///
/// The anchor score is the match score divided by `1 + d`, where `d` is
/// the pair's largest distance from the nearest document edge, so pairs
/// hugging the edge rank first. Each pool keeps at most `max_matches`
/// anchors (0 keeps them all); ties order by ascending sentence index
/// on both sides.
pub fn find_anchors(
    src: &SubtitleDoc,
    trg: &SubtitleDoc,
    dic: &Dictionary,
    freqs: Option<FrequencyPair<'_>>,
    opts: &MatcherOptions,
    window: usize,
    max_matches: usize,
    cognate_threshold: f64,
) -> AnchorPools {
    let n = src.len();
    let m = trg.len();
    let mut pools = AnchorPools::default();

    for i in 0..n.min(window) {
        for j in 0..m.min(window) {
            let score = lexical::match_score_at(
                &src.sentences[i].words,
                &trg.sentences[j].words,
                dic,
                freqs,
                opts,
                cognate_threshold,
            );
            if score > 0.0 {
                let edge = i.max(j);
                pools.prefix.push(AnchorPoint {
                    src: i,
                    trg: j,
                    score: score / (1 + edge) as f64,
                });
            }
        }
    }

    for i in n.saturating_sub(window)..n {
        for j in m.saturating_sub(window)..m {
            let score = lexical::match_score_at(
                &src.sentences[i].words,
                &trg.sentences[j].words,
                dic,
                freqs,
                opts,
                cognate_threshold,
            );
            if score > 0.0 {
                let edge = (n - 1 - i).max(m - 1 - j);
                pools.suffix.push(AnchorPoint {
                    src: i,
                    trg: j,
                    score: score / (1 + edge) as f64,
                });
            }
        }
    }

    sort_pool(&mut pools.prefix, max_matches);
    sort_pool(&mut pools.suffix, max_matches);
    tracing::debug!(
        prefix = pools.prefix.len(),
        suffix = pools.suffix.len(),
        "anchor pools built"
    );
    pools
}

fn sort_pool(pool: &mut Vec<AnchorPoint>, max_matches: usize) {
    pool.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.src.cmp(&b.src))
            .then_with(|| a.trg.cmp(&b.trg))
    });
    if max_matches > 0 {
        pool.truncate(max_matches);
    }
}

#[cfg(test)]
mod tests {
    use crate::types::Sentence;

    use super::*;

    fn doc(sentences: &[&[&str]]) -> SubtitleDoc {
        let mut doc = SubtitleDoc::default();
        for (i, words) in sentences.iter().enumerate() {
            let mut s = Sentence::new(format!("{}", i + 1), 0);
            s.words = words.iter().map(|w| w.to_string()).collect();
            doc.sentences.push(s);
        }
        doc
    }

    #[test]
    fn edge_distance_down_weights_anchors() {
        let src = doc(&[&["Aragorn"], &["nothing"], &["Boromir"]]);
        let trg = doc(&[&["Aragorn"], &["niets"], &["Boromir"]]);
        let dic = Dictionary::default();
        let pools = find_anchors(
            &src,
            &trg,
            &dic,
            None,
            &MatcherOptions::default(),
            25,
            10,
            1.0,
        );
        // Prefix: "Aragorn" at (0,0) scores 7/1; "Boromir" at (2,2) scores 7/3.
        assert_eq!(pools.prefix[0].src, 0);
        assert_eq!(pools.prefix[0].score, 7.0);
        // Suffix mirrors: "Boromir" ranks first there.
        assert_eq!(pools.suffix[0].src, 2);
        assert_eq!(pools.suffix[0].score, 7.0);
    }

    #[test]
    fn window_limits_the_scan() {
        let src = doc(&[&["filler"], &["Mithrandir"]]);
        let trg = doc(&[&["vulsel"], &["Mithrandir"]]);
        let dic = Dictionary::default();
        let pools = find_anchors(
            &src,
            &trg,
            &dic,
            None,
            &MatcherOptions::default(),
            1,
            10,
            1.0,
        );
        assert!(pools.prefix.is_empty());
        assert_eq!(pools.suffix.len(), 1);
    }

    #[test]
    fn max_matches_caps_each_pool() {
        let sentences: Vec<Vec<&str>> = (0..6).map(|_| vec!["Galadriel"]).collect();
        let refs: Vec<&[&str]> = sentences.iter().map(|v| v.as_slice()).collect();
        let src = doc(&refs);
        let trg = doc(&refs);
        let dic = Dictionary::default();
        let pools = find_anchors(
            &src,
            &trg,
            &dic,
            None,
            &MatcherOptions::default(),
            25,
            3,
            1.0,
        );
        assert_eq!(pools.prefix.len(), 3);
        assert_eq!(pools.suffix.len(), 3);
    }

    #[test]
    fn ties_order_by_ascending_index() {
        let src = doc(&[&["Elendil"], &["Elendil"]]);
        let trg = doc(&[&["Elendil"], &["Elendil"]]);
        let dic = Dictionary::default();
        let pools = find_anchors(
            &src,
            &trg,
            &dic,
            None,
            &MatcherOptions::default(),
            25,
            0,
            1.0,
        );
        // (0,0) leads; the two distance-1 pairs tie and order by (src, trg).
        assert_eq!((pools.prefix[0].src, pools.prefix[0].trg), (0, 0));
        assert_eq!((pools.prefix[1].src, pools.prefix[1].trg), (0, 1));
        assert_eq!((pools.prefix[2].src, pools.prefix[2].trg), (1, 0));
    }
}
