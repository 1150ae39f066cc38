use regex::Regex;

use crate::error::AlignError;

/// Filters and thresholds for the lexical anchor matcher.
///
/// This is a closed configuration value: build it once, validate it,
/// and pass it by reference through the matcher calls.
#[derive(Debug, Clone)]
pub struct MatcherOptions {
    pub use_dictionary: bool,
    pub use_identical: bool,
    pub use_cognates: bool,
    /// Minimum character length for a token to participate in identical
    /// or cognate matching.
    pub min_token_length: usize,
    /// Only consider tokens starting with an uppercase letter.
    pub upper_case_only: bool,
    /// Optional character-class pattern a token must match.
    pub char_set: Option<Regex>,
    /// Down-weight identical-run scores by token frequency.
    pub use_word_freq: bool,
    /// An identical run must exceed this many characters to count.
    pub min_match_length: usize,
    /// LCS ratio a token pair must reach to count as a cognate.
    pub cognate_threshold: f64,
    /// Lower bound of the cognate threshold sweep, when enabled.
    pub cognate_range: Option<f64>,
}

impl MatcherOptions {
    pub const DEFAULT_MIN_TOKEN_LENGTH: usize = 2;
    pub const DEFAULT_MIN_MATCH_LENGTH: usize = 5;
    pub const DEFAULT_COGNATE_THRESHOLD: f64 = 0.8;

    /// Reject option combinations the engines cannot honor.
    pub fn validate(&self) -> Result<(), AlignError> {
        if self.cognate_range.is_some() && !self.use_cognates {
            return Err(AlignError::config(
                "cognate range sweep requires cognate matching to be enabled",
            ));
        }
        if let Some(range) = self.cognate_range {
            if !(0.0..=1.0).contains(&range) {
                return Err(AlignError::config(format!(
                    "cognate range must lie in [0, 1], got {range}"
                )));
            }
        }
        if self.use_cognates && !(0.0..=1.0).contains(&self.cognate_threshold) {
            return Err(AlignError::config(format!(
                "cognate threshold must lie in [0, 1], got {}",
                self.cognate_threshold
            )));
        }
        Ok(())
    }
}

impl Default for MatcherOptions {
    fn default() -> Self {
        Self {
            use_dictionary: false,
            use_identical: true,
            use_cognates: false,
            min_token_length: Self::DEFAULT_MIN_TOKEN_LENGTH,
            upper_case_only: false,
            char_set: None,
            use_word_freq: false,
            min_match_length: Self::DEFAULT_MIN_MATCH_LENGTH,
            cognate_threshold: Self::DEFAULT_COGNATE_THRESHOLD,
            cognate_range: None,
        }
    }
}

/// Anchor discovery and best-anchor search configuration.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Sentences considered at each document edge for anchor discovery.
    pub window: usize,
    /// Cap on each anchor pool; 0 means unbounded.
    pub max_matches: usize,
    /// Run the best-anchor search instead of a single alignment pass.
    pub best_align: bool,
    /// Score synchronizations with the proportion flavor.
    pub proportion_score: bool,
    /// Name of a PATH-resolvable fallback aligner, tried when the best
    /// score stays below [`SearchOptions::FALLBACK_SCORE`].
    pub fallback: Option<String>,
}

impl SearchOptions {
    pub const DEFAULT_WINDOW: usize = 25;
    pub const DEFAULT_MAX_MATCHES: usize = 10;
    /// Score below which a configured fallback aligner takes over.
    pub const FALLBACK_SCORE: f64 = 2.0;
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            window: Self::DEFAULT_WINDOW,
            max_matches: Self::DEFAULT_MAX_MATCHES,
            best_align: false,
            proportion_score: false,
            fallback: None,
        }
    }
}

/// Length-DP projector configuration.
#[derive(Debug, Clone)]
pub struct ProjectorOptions {
    /// A subtitle line longer than this triggers wrapping.
    pub hard_max_line_length: usize,
    /// Preferred wrap length; also the minimum prefix kept when
    /// pre-splitting oversized fragments.
    pub soft_max_line_length: usize,
    /// Penalty applied when a merged target span stays within the hard
    /// line limit.
    pub length_limit_penalty: f64,
    /// Penalty applied at fragment boundaries that do not terminate a
    /// translation sentence.
    pub not_eos_penalty: f64,
}

impl ProjectorOptions {
    pub const DEFAULT_HARD_MAX: usize = 37;
    pub const DEFAULT_SOFT_MAX: usize = 30;
    pub const DEFAULT_LENGTH_LIMIT_PENALTY: f64 = 0.5;
    pub const DEFAULT_NOT_EOS_PENALTY: f64 = 0.5;
}

impl Default for ProjectorOptions {
    fn default() -> Self {
        Self {
            hard_max_line_length: Self::DEFAULT_HARD_MAX,
            soft_max_line_length: Self::DEFAULT_SOFT_MAX,
            length_limit_penalty: Self::DEFAULT_LENGTH_LIMIT_PENALTY,
            not_eos_penalty: Self::DEFAULT_NOT_EOS_PENALTY,
        }
    }
}
