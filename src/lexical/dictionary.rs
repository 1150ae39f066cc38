//! Bilingual dictionary and per-document word frequencies.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::error::AlignError;
use crate::reader;
use crate::types::SubtitleDoc;

/// Mapping from source token to the set of its known translations.
///
/// Loaded once and borrowed read-only by the matcher; loading the same
/// file twice is a no-op.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: HashMap<String, HashSet<String>>,
    loaded: HashSet<PathBuf>,
}

impl Dictionary {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, src: &str, trg: &str) -> bool {
        self.entries
            .get(src)
            .is_some_and(|targets| targets.contains(trg))
    }

    pub fn insert(&mut self, src: impl Into<String>, trg: impl Into<String>) {
        self.entries
            .entry(src.into())
            .or_default()
            .insert(trg.into());
    }

    /// Load dictionary entries from a file (plain or gzip-compressed).
    ///
    /// Lines carry either two whitespace-separated tokens `src trg`, or
    /// six fields with source and target at fields 3 and 4. Returns the
    /// number of lines merged; a repeated load of the same path returns
    /// 0 without touching the file.
    pub fn load(&mut self, path: &Path) -> Result<usize, AlignError> {
        if !self.loaded.insert(path.to_path_buf()) {
            return Ok(0);
        }
        let text = reader::read_to_string(path)?;
        let mut merged = 0usize;
        for line in text.lines() {
            if self.merge_line(line) {
                merged += 1;
            }
        }
        tracing::debug!(
            path = %path.display(),
            merged,
            entries = self.entries.len(),
            "dictionary loaded"
        );
        Ok(merged)
    }

    fn merge_line(&mut self, line: &str) -> bool {
        let fields: Vec<&str> = line.split_whitespace().collect();
        match fields.len() {
            2 => {
                self.insert(fields[0], fields[1]);
                true
            }
            6 => {
                self.insert(fields[2], fields[3]);
                true
            }
            0 => false,
            _ => {
                tracing::debug!(line, "skipping malformed dictionary line");
                false
            }
        }
    }
}

/// Token frequencies of one document, used to down-weight matches
/// dominated by high-frequency tokens.
#[derive(Debug, Clone, Default)]
pub struct WordFrequencies {
    counts: HashMap<String, u32>,
}

impl WordFrequencies {
    pub fn from_doc(doc: &SubtitleDoc) -> Self {
        let mut counts: HashMap<String, u32> = HashMap::new();
        for sentence in &doc.sentences {
            for word in &sentence.words {
                *counts.entry(word.clone()).or_insert(0) += 1;
            }
        }
        Self { counts }
    }

    pub fn count(&self, token: &str) -> u32 {
        self.counts.get(token).copied().unwrap_or(0)
    }
}
