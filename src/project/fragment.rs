//! Clause fragmentation of the translation text.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ProjectorOptions;

/// Shortest prefix ending in a punctuation character followed by
/// whitespace. Locale-heuristic by design; see the wrapper for the
/// matching output-side rules.
static CLAUSE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^\p{P}]*\p{P})\s+").expect("valid clause pattern"));

/// One clause-sized piece of the translation.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub text: String,
    /// Character count of `text`.
    pub chars: usize,
    /// True when this fragment ends a translation input line.
    pub sent_end: bool,
}

/// Split translation text into clause fragments, line by line.
///
/// Each line is consumed clause-by-clause at punctuation followed by
/// whitespace; the line remainder becomes its final fragment and is
/// flagged as a sentence end. Fragments longer than the hard line limit
/// are pre-split on whitespace after the soft limit.
pub fn fragment_text(text: &str, opts: &ProjectorOptions) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    for line in text.lines() {
        let mut rest = line.trim();
        if rest.is_empty() {
            continue;
        }
        let mark = fragments.len();
        while let Some(caps) = CLAUSE_BREAK.captures(rest) {
            let clause = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            push_fragment(&mut fragments, clause, opts);
            rest = &rest[caps.get(0).map(|m| m.end()).unwrap_or(rest.len())..];
        }
        if !rest.is_empty() {
            push_fragment(&mut fragments, rest, opts);
        }
        if fragments.len() > mark {
            if let Some(last) = fragments.last_mut() {
                last.sent_end = true;
            }
        }
    }
    fragments
}

/// Append `text` as one fragment, pre-splitting on whitespace when it
/// exceeds the hard line limit.
fn push_fragment(fragments: &mut Vec<Fragment>, text: &str, opts: &ProjectorOptions) {
    let mut rest = text;
    loop {
        let chars = rest.chars().count();
        if chars <= opts.hard_max_line_length {
            break;
        }
        let Some(cut) = whitespace_after(rest, opts.soft_max_line_length) else {
            break;
        };
        let head = rest[..cut].trim_end();
        fragments.push(Fragment {
            text: head.to_string(),
            chars: head.chars().count(),
            sent_end: false,
        });
        rest = rest[cut..].trim_start();
    }
    fragments.push(Fragment {
        text: rest.to_string(),
        chars: rest.chars().count(),
        sent_end: false,
    });
}

/// Byte index of the first whitespace at or after `min_chars` characters.
fn whitespace_after(text: &str, min_chars: usize) -> Option<usize> {
    text.char_indices()
        .skip(min_chars)
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, _)| i)
}
