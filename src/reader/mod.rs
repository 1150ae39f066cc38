//! Subtitle input: file opening, SRT and time-tagged XML parsing.

pub mod srt;
pub mod xml;

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;

use crate::error::AlignError;

/// Read a file into a sanitized UTF-8 string.
///
/// The bare path is tried first; when it cannot be opened, a `.gz`
/// sibling is tried before giving up. A `.gz` extension on either path
/// routes the bytes through a gzip decoder.
pub fn read_to_string(path: &Path) -> Result<String, AlignError> {
    let bytes = read_bytes(path)?;
    let text = String::from_utf8(bytes)
        .map_err(|_| AlignError::encoding(path.display().to_string()))?;
    Ok(sanitize(&text))
}

fn read_bytes(path: &Path) -> Result<Vec<u8>, AlignError> {
    match File::open(path) {
        Ok(file) => read_maybe_gz(file, is_gz(path), path),
        Err(err) => {
            let sibling = gz_sibling(path);
            match File::open(&sibling) {
                Ok(file) => read_maybe_gz(file, true, &sibling),
                Err(_) => Err(AlignError::io(
                    format!("opening {}", path.display()),
                    err,
                )),
            }
        }
    }
}

fn read_maybe_gz(file: File, gz: bool, path: &Path) -> Result<Vec<u8>, AlignError> {
    let mut bytes = Vec::new();
    let result = if gz {
        GzDecoder::new(file).read_to_end(&mut bytes)
    } else {
        let mut file = file;
        file.read_to_end(&mut bytes)
    };
    result.map_err(|err| AlignError::io(format!("reading {}", path.display()), err))?;
    Ok(bytes)
}

fn is_gz(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

fn gz_sibling(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".gz");
    PathBuf::from(name)
}

/// Strip a leading BOM, C0 controls other than TAB/LF/CR, and the
/// stray non-characters U+FFFE/U+FFFF.
fn sanitize(text: &str) -> String {
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
    text.chars()
        .filter(|&c| {
            if c == '\t' || c == '\n' || c == '\r' {
                return true;
            }
            !c.is_control() && c != '\u{FFFE}' && c != '\u{FFFF}'
        })
        .collect()
}
