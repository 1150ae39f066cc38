//! The length-based translation projector.
//!
//! Projects a time-stamped template onto a flat translation text: the
//! translation is fragmented on clause punctuation, aligned to the
//! template frames over cumulative character lengths, and emitted as
//! one wrapped SRT block per frame.

pub mod fragment;
pub mod length_dp;
pub mod wrap;

pub use fragment::{fragment_text, Fragment};
pub use length_dp::{align_lengths, LengthLink, TemplateFrame};
pub use wrap::wrap_line;

use crate::config::ProjectorOptions;
use crate::output::srt::SrtBlock;
use crate::types::SubtitleDoc;

/// Reduce an interpolated template document to its projection frames.
pub fn template_frames(doc: &SubtitleDoc) -> Vec<TemplateFrame> {
    doc.sentences
        .iter()
        .map(|s| TemplateFrame {
            start: s.start,
            end: s.end,
            chars: s.char_len(),
        })
        .collect()
}

/// Project the template's time frames onto the translation text.
pub fn project(
    template: &SubtitleDoc,
    translation: &str,
    opts: &ProjectorOptions,
) -> Vec<SrtBlock> {
    let frames = template_frames(template);
    let fragments = fragment_text(translation, opts);
    let links = align_lengths(&frames, &fragments, opts);
    tracing::debug!(
        frames = frames.len(),
        fragments = fragments.len(),
        "projected template onto translation"
    );

    links
        .iter()
        .map(|link| {
            let text = fragments[link.fragments.clone()]
                .iter()
                .map(|f| f.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            SrtBlock {
                start: frames[link.frame].start,
                end: frames[link.frame].end,
                text: wrap_line(&text, opts),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::types::Sentence;

    use super::*;

    fn template(frames: &[(f64, f64, usize)]) -> SubtitleDoc {
        let mut doc = SubtitleDoc::default();
        let mut pos = 0usize;
        for (i, &(start, end, chars)) in frames.iter().enumerate() {
            let mut s = Sentence::new(format!("{}", i + 1), pos);
            pos += chars;
            s.end_pos = pos;
            s.start = start;
            s.end = end;
            doc.sentences.push(s);
        }
        doc
    }

    #[test]
    fn identity_projection_keeps_frames() {
        let doc = template(&[(0.0, 2.0, 30), (2.0, 4.0, 30), (4.0, 6.0, 30)]);
        let translation = "aaaa bbbb cccc dddd eeee ffffff\naaaa bbbb cccc dddd eeee ffffff\naaaa bbbb cccc dddd eeee ffffff\n";
        let blocks = project(&doc, translation, &ProjectorOptions::default());
        assert_eq!(blocks.len(), 3);
        for block in &blocks {
            assert!(!block.text.contains('\n'));
            assert!(!block.text.is_empty());
        }
        assert_eq!(blocks[0].start, 0.0);
        assert_eq!(blocks[2].end, 6.0);
    }

    #[test]
    fn empty_translation_gives_empty_blocks() {
        let doc = template(&[(0.0, 2.0, 20), (2.0, 4.0, 20)]);
        let blocks = project(&doc, "", &ProjectorOptions::default());
        assert_eq!(blocks.len(), 2);
        assert!(blocks.iter().all(|b| b.text.is_empty()));
    }

    #[test]
    fn merged_fragments_join_with_spaces() {
        let doc = template(&[(0.0, 3.0, 40), (3.0, 6.0, 40)]);
        let translation =
            "aaaa bbbb cccc dddd, aaaa bbbb cccc dddd\naaaa bbbb cccc dddd, aaaa bbbb cccc dddd\n";
        let blocks = project(&doc, translation, &ProjectorOptions::default());
        assert_eq!(blocks.len(), 2);
        for block in &blocks {
            let flat = block.text.replace('\n', " ");
            assert_eq!(flat, "aaaa bbbb cccc dddd, aaaa bbbb cccc dddd");
        }
    }
}
