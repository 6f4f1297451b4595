//! Source file loading with deterministic encoding fallback.

use crate::error::{Error, Result};
use std::fs;
use std::io;
use std::path::Path;

/// UTF-8 byte order mark.
const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Read a source file as text.
///
/// UTF-8 is tried first; bytes that are not valid UTF-8 are decoded as
/// ISO-8859-1 instead, so any readable file yields a string.
///
/// # Example
///
/// ```no_run
/// use pagepack::reader::read_text;
///
/// let text = read_text("notes.txt")?;
/// println!("{} chars", text.chars().count());
/// # Ok::<(), pagepack::Error>(())
/// ```
pub fn read_text(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => Error::InputNotFound(path.to_path_buf()),
        _ => Error::Io(err),
    })?;
    Ok(decode_text(&bytes))
}

/// Decode raw bytes, falling back to ISO-8859-1 when they are not UTF-8.
pub fn decode_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(&UTF8_BOM[..]).unwrap_or(bytes);

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(err) => {
            log::debug!(
                "invalid UTF-8 at byte {}, decoding as ISO-8859-1",
                err.valid_up_to()
            );
            decode_latin1(bytes)
        }
    }
}

/// Map every byte to the code point of the same value.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
