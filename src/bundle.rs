//! Deterministic ZIP bundle writer.
//!
//! A bundle holds `index.xml` next to the fixed members of a
//! [`BundleManifest`]. Members are written in lexicographic path order with a
//! fixed timestamp, permissions and compression method, so the archive bytes
//! depend only on the document text and the manifest.

use crate::error::{Error, Result};
use crate::model::{BundleManifest, INDEX_XML_PATH};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{Cursor, Read, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

/// Permissions recorded for every member.
const MEMBER_PERMISSIONS: u32 = 0o644;

/// Collect all bundle members keyed by archive path.
pub fn members(xml: &str, manifest: &BundleManifest) -> BTreeMap<String, Vec<u8>> {
    let mut members: BTreeMap<String, Vec<u8>> = manifest
        .members()
        .into_iter()
        .map(|(path, data)| (path.to_string(), data))
        .collect();
    members.insert(INDEX_XML_PATH.to_string(), xml.as_bytes().to_vec());
    members
}

fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(MEMBER_PERMISSIONS)
}

/// Build the complete bundle archive in memory.
pub fn bundle_bytes(xml: &str, manifest: &BundleManifest) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = entry_options();

    for (path, data) in members(xml, manifest) {
        zip.start_file(path.as_str(), options)?;
        zip.write_all(&data)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

/// Write a bundle to `output`, replacing any existing file.
///
/// Parent directories are created as needed. The archive is first written to
/// a temporary file next to `output` and renamed into place once complete;
/// the temporary file is removed if any step fails.
///
/// # Example
///
/// ```no_run
/// use pagepack::bundle::write_bundle;
/// use pagepack::model::BundleManifest;
///
/// write_bundle("<?xml version=\"1.0\"?><doc/>", &BundleManifest::default(), "out/doc.pages")?;
/// # Ok::<(), pagepack::Error>(())
/// ```
pub fn write_bundle(
    xml: &str,
    manifest: &BundleManifest,
    output: impl AsRef<Path>,
) -> Result<()> {
    let output = output.as_ref();
    let bytes = bundle_bytes(xml, manifest)?;

    let parent = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut scratch = tempfile::Builder::new()
        .prefix(".pagepack-")
        .suffix(".tmp")
        .tempfile_in(parent)?;
    scratch.write_all(&bytes)?;
    scratch.as_file().sync_all()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        scratch
            .as_file()
            .set_permissions(fs::Permissions::from_mode(MEMBER_PERMISSIONS))?;
    }

    scratch.persist(output)?;

    if !output.is_file() {
        return Err(Error::ArchiveFinalize(output.to_path_buf()));
    }

    log::debug!("wrote bundle {} ({} bytes)", output.display(), bytes.len());
    Ok(())
}

/// List member paths of a bundle in archive order.
pub fn list_members(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let file = File::open(path.as_ref())?;
    let mut archive = ZipArchive::new(file)?;

    let mut names = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        names.push(archive.by_index(i)?.name().to_string());
    }
    Ok(names)
}

/// Read a single member of a bundle.
pub fn read_member(path: impl AsRef<Path>, name: &str) -> Result<Vec<u8>> {
    let file = File::open(path.as_ref())?;
    let mut archive = ZipArchive::new(file)?;
    let mut member = archive.by_name(name)?;

    let mut data = Vec::new();
    member.read_to_end(&mut data)?;
    Ok(data)
}
