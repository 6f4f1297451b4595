//! Content fingerprints for verifying output stability.

use crate::error::{Error, Result};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io;
use std::path::Path;

/// Number of hex characters kept from the SHA-256 digest.
pub const FINGERPRINT_LEN: usize = 16;

/// Fingerprint a byte slice: the first 16 hex characters of its SHA-256.
pub fn fingerprint_bytes(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    let mut hex = hex::encode(digest);
    hex.truncate(FINGERPRINT_LEN);
    hex
}

/// Fingerprint a file's contents.
///
/// # Example
///
/// ```no_run
/// let fp = pagepack::hash::fingerprint_file("out/notes.pages")?;
/// assert_eq!(fp.len(), 16);
/// # Ok::<(), pagepack::Error>(())
/// ```
pub fn fingerprint_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => Error::InputNotFound(path.to_path_buf()),
        _ => Error::Io(err),
    })?;

    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    let mut hex = hex::encode(hasher.finalize());
    hex.truncate(FINGERPRINT_LEN);
    Ok(hex)
}
