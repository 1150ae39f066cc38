//! Alignment output: XCES alignment XML and SRT.

pub mod srt;
pub mod xces;

pub use srt::{write_srt, SrtBlock};
pub use xces::write_xces;
