use std::collections::BTreeMap;

/// An inline time marker: a timestamp in seconds together with the
/// running character position at which it occurred.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimePoint {
    pub seconds: f64,
    pub pos: usize,
}

/// One sentence of a subtitle document.
///
/// Created by the readers with raw inline markers; the interpolator
/// derives `start`/`end` and the synchronizer may rescale them later.
#[derive(Debug, Clone)]
pub struct Sentence {
    pub id: String,
    pub words: Vec<String>,
    /// First inline time marker seen inside the sentence, if any.
    pub first: Option<TimePoint>,
    /// Last inline time marker seen inside the sentence, if any.
    pub last: Option<TimePoint>,
    /// Character position of the first character of the sentence.
    pub start_pos: usize,
    /// Character position just past the last character of the sentence.
    pub end_pos: usize,
    /// Derived frame start in seconds. Interval contract after
    /// interpolation is `start < end` exactly.
    pub start: f64,
    /// Derived frame end in seconds.
    pub end: f64,
}

impl Sentence {
    pub fn new(id: impl Into<String>, start_pos: usize) -> Self {
        Self {
            id: id.into(),
            words: Vec::new(),
            first: None,
            last: None,
            start_pos,
            end_pos: start_pos,
            start: 0.0,
            end: 0.0,
        }
    }

    /// Character length of the sentence as counted by the reader.
    pub fn char_len(&self) -> usize {
        self.end_pos.saturating_sub(self.start_pos)
    }

    /// Record an inline time marker in document order.
    pub fn push_marker(&mut self, marker: TimePoint) {
        if self.first.is_none() {
            self.first = Some(marker);
        } else {
            self.last = Some(marker);
        }
    }
}

/// An ordered sequence of sentences from one subtitle file.
#[derive(Debug, Clone, Default)]
pub struct SubtitleDoc {
    pub sentences: Vec<Sentence>,
}

impl SubtitleDoc {
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Sort sentence frames by ascending start time. Inputs may carry
    /// out-of-order frames; a warning is logged when re-ordering occurs.
    pub fn sort_frames(&mut self) {
        let sorted = self
            .sentences
            .windows(2)
            .all(|w| w[0].start <= w[1].start);
        if !sorted {
            tracing::warn!("subtitle frames out of chronological order, re-sorting");
            self.sentences
                .sort_by(|a, b| crate::time::cmp_start(a.start, b.start));
        }
    }
}

/// A sentence pair sharing a lexical match, used as a timing reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorPoint {
    pub src: usize,
    pub trg: usize,
    pub score: f64,
}

/// One alignment record: zero-or-more source sentences mapped to
/// zero-or-more target sentences. An empty side encodes a 1:0 / 0:1 link.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub src_ids: Vec<String>,
    pub trg_ids: Vec<String>,
    pub common: Option<f64>,
    pub not_common: Option<f64>,
    pub overlap_ratio: Option<f64>,
}

impl Link {
    pub fn one_to_zero(src_id: String) -> Self {
        Self {
            src_ids: vec![src_id],
            trg_ids: Vec::new(),
            common: None,
            not_common: None,
            overlap_ratio: None,
        }
    }

    pub fn zero_to_one(trg_id: String) -> Self {
        Self {
            src_ids: Vec::new(),
            trg_ids: vec![trg_id],
            common: None,
            not_common: None,
            overlap_ratio: None,
        }
    }

    pub fn is_empty_link(&self) -> bool {
        self.src_ids.is_empty() || self.trg_ids.is_empty()
    }
}

/// Full output of one overlap-aligner run: links plus the shape
/// statistics consumed by the best-anchor search.
#[derive(Debug, Clone, Default)]
pub struct Alignment {
    pub links: Vec<Link>,
    /// Link counts keyed by block shape, e.g. `"1:1"`, `"2:1"`.
    pub buckets: BTreeMap<String, usize>,
    pub empty: usize,
    pub nonempty: usize,
}

impl Alignment {
    /// Quality score used to choose among synchronizations.
    ///
    /// The default flavor is `(nonempty+1)/(empty+1)`; the proportion
    /// flavor is `(nonempty+1)/(nonempty+empty+1)`.
    pub fn ratio_score(&self, proportion: bool) -> f64 {
        let n = self.nonempty as f64;
        let e = self.empty as f64;
        if proportion {
            (n + 1.0) / (n + e + 1.0)
        } else {
            (n + 1.0) / (e + 1.0)
        }
    }
}
