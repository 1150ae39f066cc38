//! Time-tagged XML parsing.
//!
//! The document carries `<s id="...">` sentence containers holding
//! `<w>` tokens interleaved with empty `<time value="HH:MM:SS,mmm"/>`
//! markers. Unknown elements are traversed transparently and unknown
//! attributes are ignored.

use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::AlignError;
use crate::time::time_to_sec;
use crate::types::{Sentence, SubtitleDoc, TimePoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Outside,
    InSentence,
    InWord,
}

/// Parse time-tagged XML text into a subtitle document.
pub fn read_document(text: &str) -> Result<SubtitleDoc, AlignError> {
    let mut reader = Reader::from_str(text);
    reader.trim_text(true);

    let mut doc = SubtitleDoc::default();
    let mut state = State::Outside;
    let mut current: Option<Sentence> = None;
    let mut pos = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"s" => {
                    if let Some(done) = current.take() {
                        tracing::warn!(id = done.id.as_str(), "unterminated <s> element");
                        doc.sentences.push(done);
                    }
                    let id = attribute_value(&e, b"id")?
                        .unwrap_or_else(|| (doc.sentences.len() + 1).to_string());
                    current = Some(Sentence::new(id, pos));
                    state = State::InSentence;
                }
                b"w" if state != State::Outside => {
                    state = State::InWord;
                }
                b"time" => {
                    // Tolerate a non-empty spelling of the marker element.
                    push_time_marker(&e, current.as_mut(), pos)?;
                }
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                if e.name().as_ref() == b"time" {
                    push_time_marker(&e, current.as_mut(), pos)?;
                }
            }
            Ok(Event::Text(e)) => {
                if state == State::InWord {
                    if let Some(sentence) = current.as_mut() {
                        let token = e
                            .unescape()
                            .map_err(|err| {
                                AlignError::parse("XML document", err.to_string())
                            })?
                            .trim()
                            .to_string();
                        if !token.is_empty() {
                            if !sentence.words.is_empty() {
                                pos += 1;
                            }
                            pos += token.chars().count();
                            sentence.words.push(token);
                        }
                    }
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"s" => {
                    if let Some(mut sentence) = current.take() {
                        sentence.end_pos = pos;
                        doc.sentences.push(sentence);
                    }
                    state = State::Outside;
                }
                b"w" if state == State::InWord => {
                    state = State::InSentence;
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => {
                return Err(AlignError::parse("XML document", err.to_string()));
            }
        }
    }

    if let Some(mut sentence) = current.take() {
        tracing::warn!(id = sentence.id.as_str(), "document ended inside <s>");
        sentence.end_pos = pos;
        doc.sentences.push(sentence);
    }
    Ok(doc)
}

/// Read and parse a time-tagged XML file (plain or gzip-compressed).
pub fn read_file(path: &Path) -> Result<SubtitleDoc, AlignError> {
    let text = super::read_to_string(path)?;
    read_document(&text)
}

fn push_time_marker(
    element: &BytesStart,
    sentence: Option<&mut Sentence>,
    pos: usize,
) -> Result<(), AlignError> {
    let Some(sentence) = sentence else {
        return Ok(());
    };
    if let Some(raw) = attribute_value(element, b"value")? {
        let seconds = time_to_sec(&raw)?;
        sentence.push_marker(TimePoint { seconds, pos });
    }
    Ok(())
}

fn attribute_value(element: &BytesStart, name: &[u8]) -> Result<Option<String>, AlignError> {
    for attr in element.attributes().with_checks(false).flatten() {
        if attr.key.as_ref() == name {
            let value = attr
                .unescape_value()
                .map_err(|err| AlignError::parse("XML document", err.to_string()))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}
