pub mod align;
pub mod config;
pub mod error;
pub mod lexical;
pub mod output;
pub mod pipeline;
pub mod project;
pub mod reader;
pub mod time;
pub mod timing;
pub mod types;

pub use align::{align_overlap, best_anchor_align, find_anchors, AnchorPools, SearchOutcome};
pub use config::{MatcherOptions, ProjectorOptions, SearchOptions};
pub use error::AlignError;
pub use lexical::{Dictionary, WordFrequencies};
pub use output::{write_srt, write_xces, SrtBlock};
pub use pipeline::builder::SubtitleAlignerBuilder;
pub use pipeline::runtime::{EngineOutput, SubtitleAligner};
pub use pipeline::traits::{AnchorFinder, PairAligner};
pub use project::{fragment_text, project, wrap_line, Fragment, TemplateFrame};
pub use types::{Alignment, AnchorPoint, Link, Sentence, SubtitleDoc, TimePoint};
