use std::path::PathBuf;

use clap::Parser;
use regex::Regex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use subalign::{
    AlignError, EngineOutput, MatcherOptions, SearchOptions, SubtitleAlignerBuilder, write_xces,
};

#[derive(Debug, Parser)]
#[command(name = "srtalign")]
#[command(about = "Align two subtitle documents by maximizing temporal overlap")]
struct Args {
    /// Source language hint, recorded in the output metadata.
    #[arg(short = 'S', long = "source-lang")]
    source_lang: Option<String>,
    /// Target language hint, recorded in the output metadata.
    #[arg(short = 'T', long = "target-lang")]
    target_lang: Option<String>,
    /// Enable cognate matching at this LCS-ratio threshold.
    #[arg(short = 'c', long = "cognates")]
    cognate_threshold: Option<f64>,
    /// Sweep the cognate threshold from 1.0 down to this bound.
    #[arg(short = 'r', long = "cognate-range")]
    cognate_range: Option<f64>,
    /// Minimum token length for lexical matching.
    #[arg(
        short = 'l',
        long = "min-token-length",
        default_value_t = MatcherOptions::DEFAULT_MIN_TOKEN_LENGTH
    )]
    min_token_length: usize,
    /// An identical-token run must exceed this many characters.
    #[arg(
        short = 'i',
        long = "min-match-length",
        default_value_t = MatcherOptions::DEFAULT_MIN_MATCH_LENGTH
    )]
    min_match_length: usize,
    /// Sentences considered at each document edge for anchors.
    #[arg(short = 'w', long = "window", default_value_t = SearchOptions::DEFAULT_WINDOW)]
    window: usize,
    /// Bilingual dictionary file (plain or gzip-compressed).
    #[arg(short = 'd', long = "dictionary")]
    dictionary: Option<PathBuf>,
    /// Only match tokens starting with an uppercase letter.
    #[arg(short = 'u', long = "upper-case-only")]
    upper_case_only: bool,
    /// Character-class pattern tokens must match, e.g. "^\p{L}+$".
    #[arg(short = 's', long = "char-set")]
    char_set: Option<String>,
    /// Down-weight anchor matches by token frequency.
    #[arg(short = 'q', long = "word-frequency")]
    word_frequency: bool,
    /// Search prefix/suffix anchor pairs for the best synchronization.
    #[arg(short = 'b', long = "best-align")]
    best_align: bool,
    /// Cap on anchor candidates per pool (alias of --max-matches).
    #[arg(short = 'p', long = "candidates")]
    candidates: Option<usize>,
    /// Cap on anchor matches kept per pool; 0 keeps all.
    #[arg(short = 'm', long = "max-matches")]
    max_matches: Option<usize>,
    /// PATH-resolvable fallback aligner, tried when the score stays low.
    #[arg(
        short = 'f',
        long = "fallback",
        num_args = 0..=1,
        default_missing_value = "uplug"
    )]
    fallback: Option<String>,
    /// Score synchronizations by the proportion of non-empty links.
    #[arg(short = 'P', long = "proportion")]
    proportion: bool,
    /// Log candidate scores and engine internals to stderr.
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
    /// Source subtitle document (time-tagged XML).
    source: PathBuf,
    /// Target subtitle document (time-tagged XML).
    target: PathBuf,
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);
    if let Err(err) = run(&args) {
        tracing::error!(error = %err, "alignment failed");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "subalign=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(args: &Args) -> Result<(), AlignError> {
    let char_set = match &args.char_set {
        Some(pattern) => Some(Regex::new(pattern).map_err(|err| AlignError::Config {
            message: format!("invalid character-class pattern: {err}"),
        })?),
        None => None,
    };

    let matcher = MatcherOptions {
        use_dictionary: args.dictionary.is_some(),
        use_identical: true,
        use_cognates: args.cognate_threshold.is_some() || args.cognate_range.is_some(),
        min_token_length: args.min_token_length,
        upper_case_only: args.upper_case_only,
        char_set,
        use_word_freq: args.word_frequency,
        min_match_length: args.min_match_length,
        cognate_threshold: args
            .cognate_threshold
            .unwrap_or(MatcherOptions::DEFAULT_COGNATE_THRESHOLD),
        cognate_range: args.cognate_range,
    };
    let search = SearchOptions {
        window: args.window,
        max_matches: args
            .candidates
            .or(args.max_matches)
            .unwrap_or(SearchOptions::DEFAULT_MAX_MATCHES),
        best_align: args.best_align,
        proportion_score: args.proportion,
        fallback: args.fallback.clone(),
    };

    let mut builder = SubtitleAlignerBuilder::new()
        .with_matcher_options(matcher)
        .with_search_options(search);
    if let Some(path) = &args.dictionary {
        builder = builder.load_dictionary(path)?;
    }
    let aligner = builder.build()?;

    match aligner.align_files(&args.source, &args.target)? {
        EngineOutput::Delegated(stdout) => {
            print!("{stdout}");
        }
        EngineOutput::Aligned(outcome) => {
            tracing::debug!(
                score = outcome.score,
                slope = outcome.slope,
                offset = outcome.offset,
                "emitting alignment"
            );
            let mut meta = Vec::new();
            if let Some(lang) = &args.source_lang {
                meta.push(("fromLang".to_string(), lang.clone()));
            }
            if let Some(lang) = &args.target_lang {
                meta.push(("toLang".to_string(), lang.clone()));
            }
            let xml = write_xces(
                &outcome.alignment,
                &args.source.display().to_string(),
                &args.target.display().to_string(),
                &meta,
            )?;
            println!("{xml}");
        }
    }
    Ok(())
}
