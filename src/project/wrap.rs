//! Line wrapping for projected subtitle text.

use regex::Regex;

use crate::config::ProjectorOptions;

/// Wrap `text` with a single embedded newline when it exceeds the hard
/// line limit.
///
/// Cut points are tried in order: sentence-ending punctuation followed
/// by whitespace, clause punctuation followed by whitespace, then any
/// whitespace near the middle. The first rule that fires wins, and the
/// greedy left side picks the latest cut whose right-hand part fits the
/// length window.
pub fn wrap_line(text: &str, opts: &ProjectorOptions) -> String {
    let chars = text.chars().count();
    if chars <= opts.hard_max_line_length {
        return text.to_string();
    }
    let half = chars / 2;
    let (min, max) = if half <= opts.soft_max_line_length {
        (half, opts.soft_max_line_length)
    } else {
        (opts.soft_max_line_length, half)
    };

    let patterns = [
        format!(r#"^(.*[.!?")\]])\s+(\S*.{{{min},{max}}})$"#),
        format!(r"^(.*[,;:'-])\s+(\S*.{{{min},{max}}})$"),
        format!(r"^(.*)\s+(\S*.{{{half}}})$"),
    ];
    for pattern in &patterns {
        let Ok(re) = Regex::new(pattern) else {
            continue;
        };
        if let Some(caps) = re.captures(text) {
            let left = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            let right = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
            return format!("{left}\n{right}");
        }
    }
    text.to_string()
}
