//! SRT emission for the projector.

use std::io::Write;

use crate::error::AlignError;
use crate::time::sec_to_time;

/// One output subtitle block.
#[derive(Debug, Clone, PartialEq)]
pub struct SrtBlock {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// Write blank-line separated SRT blocks with 1-based counters.
pub fn write_srt<W: Write>(out: &mut W, blocks: &[SrtBlock]) -> Result<(), AlignError> {
    for (i, block) in blocks.iter().enumerate() {
        write!(
            out,
            "{}\n{} --> {}\n{}\n\n",
            i + 1,
            sec_to_time(block.start),
            sec_to_time(block.end),
            block.text
        )
        .map_err(|err| AlignError::io("writing SRT output", err))?;
    }
    Ok(())
}
