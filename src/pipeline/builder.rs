use std::path::Path;

use crate::config::{MatcherOptions, SearchOptions};
use crate::error::AlignError;
use crate::lexical::Dictionary;
use crate::pipeline::defaults::{LexicalAnchorFinder, OverlapPairAligner};
use crate::pipeline::runtime::{SubtitleAligner, SubtitleAlignerParts};
use crate::pipeline::traits::{AnchorFinder, PairAligner};

/// Assembles a [`SubtitleAligner`] from options, an optional dictionary
/// and optional stage overrides.
pub struct SubtitleAlignerBuilder {
    matcher: MatcherOptions,
    search: SearchOptions,
    dictionary: Dictionary,
    anchor_finder: Option<Box<dyn AnchorFinder>>,
    pair_aligner: Option<Box<dyn PairAligner>>,
}

impl Default for SubtitleAlignerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SubtitleAlignerBuilder {
    pub fn new() -> Self {
        Self {
            matcher: MatcherOptions::default(),
            search: SearchOptions::default(),
            dictionary: Dictionary::default(),
            anchor_finder: None,
            pair_aligner: None,
        }
    }

    pub fn with_matcher_options(mut self, matcher: MatcherOptions) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn with_search_options(mut self, search: SearchOptions) -> Self {
        self.search = search;
        self
    }

    pub fn with_dictionary(mut self, dictionary: Dictionary) -> Self {
        self.dictionary = dictionary;
        self
    }

    /// Load dictionary entries from a file and enable dictionary
    /// matching.
    pub fn load_dictionary(mut self, path: &Path) -> Result<Self, AlignError> {
        self.dictionary.load(path)?;
        self.matcher.use_dictionary = true;
        Ok(self)
    }

    pub fn with_anchor_finder(mut self, anchor_finder: Box<dyn AnchorFinder>) -> Self {
        self.anchor_finder = Some(anchor_finder);
        self
    }

    pub fn with_pair_aligner(mut self, pair_aligner: Box<dyn PairAligner>) -> Self {
        self.pair_aligner = Some(pair_aligner);
        self
    }

    pub fn build(self) -> Result<SubtitleAligner, AlignError> {
        self.matcher.validate()?;

        let anchor_finder: Box<dyn AnchorFinder> = match self.anchor_finder {
            Some(finder) => finder,
            None => Box::new(LexicalAnchorFinder {
                dictionary: self.dictionary,
                matcher: self.matcher.clone(),
                window: self.search.window,
                max_matches: self.search.max_matches,
            }),
        };

        Ok(SubtitleAligner::from_parts(SubtitleAlignerParts {
            anchor_finder,
            pair_aligner: self
                .pair_aligner
                .unwrap_or_else(|| Box::new(OverlapPairAligner)),
            matcher: self.matcher,
            search: self.search,
        }))
    }
}
