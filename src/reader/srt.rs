//! SRT parsing into sentence records with boundary time markers.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::AlignError;
use crate::time::time_to_sec;
use crate::types::{Sentence, SubtitleDoc, TimePoint};

static TIMESTAMP_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\S+)\s*-->\s*(\S+)").expect("valid timestamp pattern"));

/// Parse SRT text into a subtitle document.
///
/// Blocks are delimited by blank lines. The numeric counter line is
/// consumed when present but never required; blocks missing a timestamp
/// line are skipped with a warning.
pub fn read_document(text: &str) -> Result<SubtitleDoc, AlignError> {
    let mut doc = SubtitleDoc::default();
    let mut pos = 0usize;
    let normalized = text.replace("\r\n", "\n");

    for block in normalized.split("\n\n") {
        let mut lines = block.lines().filter(|l| !l.trim().is_empty()).peekable();

        let mut counter: Option<&str> = None;
        if let Some(line) = lines.peek() {
            let trimmed = line.trim();
            if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
                counter = Some(trimmed);
                lines.next();
            }
        }

        let Some(times_line) = lines.next() else {
            continue;
        };
        let Some(caps) = TIMESTAMP_LINE.captures(times_line) else {
            tracing::warn!(line = times_line, "skipping SRT block without timestamp line");
            continue;
        };
        let start_sec = time_to_sec(&caps[1])?;
        let end_sec = time_to_sec(&caps[2])?;

        let id = match counter {
            Some(c) => c.to_string(),
            None => (doc.sentences.len() + 1).to_string(),
        };
        let mut sentence = Sentence::new(id, pos);
        sentence.push_marker(TimePoint {
            seconds: start_sec,
            pos,
        });
        for line in lines {
            for word in line.split_whitespace() {
                if !sentence.words.is_empty() {
                    pos += 1;
                }
                pos += word.chars().count();
                sentence.words.push(word.to_string());
            }
        }
        sentence.end_pos = pos;
        sentence.push_marker(TimePoint {
            seconds: end_sec,
            pos,
        });
        doc.sentences.push(sentence);
    }

    if doc.is_empty() && !text.trim().is_empty() {
        return Err(AlignError::parse(
            "SRT document",
            "no subtitle blocks could be parsed",
        ));
    }
    Ok(doc)
}

/// Read and parse an SRT file (plain or gzip-compressed).
pub fn read_file(path: &Path) -> Result<SubtitleDoc, AlignError> {
    let text = super::read_to_string(path)?;
    read_document(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "1\n00:00:01,000 --> 00:00:03,000\nHello there\n\n2\n00:00:04,000 --> 00:00:06,500\nGeneral Kenobi\n";

    #[test]
    fn parses_numbered_blocks() {
        let doc = read_document(SAMPLE).unwrap();
        assert_eq!(doc.len(), 2);
        let first = &doc.sentences[0];
        assert_eq!(first.id, "1");
        assert_eq!(first.words, ["Hello", "there"]);
        assert_eq!(first.first.unwrap().seconds, 1.0);
        assert_eq!(first.last.unwrap().seconds, 3.0);
    }

    #[test]
    fn counter_line_is_optional() {
        let text = "00:00:01,000 --> 00:00:02,000\nNo counter here\n";
        let doc = read_document(text).unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.sentences[0].id, "1");
        assert_eq!(doc.sentences[0].words.len(), 3);
    }

    #[test]
    fn char_positions_are_monotone() {
        let doc = read_document(SAMPLE).unwrap();
        let a = &doc.sentences[0];
        let b = &doc.sentences[1];
        assert!(a.start_pos < a.end_pos);
        assert!(a.end_pos <= b.start_pos);
        // "Hello there" = 5 + 1 + 5 characters
        assert_eq!(a.char_len(), 11);
    }

    #[test]
    fn garbage_input_is_a_parse_error() {
        assert!(read_document("just some prose\nwithout timestamps\n").is_err());
    }

    #[test]
    fn empty_input_is_an_empty_document() {
        assert!(read_document("").unwrap().is_empty());
    }
}
