//! Conversion pipeline: read, parse, serialize, archive.

use crate::bundle;
use crate::detect::SourceFormat;
use crate::error::{Error, Result};
use crate::hash;
use crate::model::{Block, BundleManifest, StyleCatalogue};
use crate::parse;
use crate::reader;
use crate::render::{self, DocumentHeader};
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Default extension of produced bundles.
pub const DEFAULT_EXTENSION: &str = "pages";

/// Default batch pattern: every file at any depth.
pub const DEFAULT_PATTERN: &str = "**/*";

/// Immutable configuration shared by every conversion.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Paragraph styles written into `index.xml`
    pub catalogue: StyleCatalogue,

    /// Fixed auxiliary bundle members
    pub manifest: BundleManifest,

    /// Fixed document header values
    pub header: DocumentHeader,

    /// Extension given to output files in batch mode (without the dot)
    pub extension: String,

    /// Glob selecting batch inputs, relative to the input directory
    pub pattern: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            catalogue: StyleCatalogue::default(),
            manifest: BundleManifest::default(),
            header: DocumentHeader::default(),
            extension: DEFAULT_EXTENSION.to_string(),
            pattern: DEFAULT_PATTERN.to_string(),
        }
    }
}

impl ConvertOptions {
    /// Create options with the standard Pages '09 values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the style catalogue.
    pub fn with_catalogue(mut self, catalogue: StyleCatalogue) -> Self {
        self.catalogue = catalogue;
        self
    }

    /// Set the bundle manifest.
    pub fn with_manifest(mut self, manifest: BundleManifest) -> Self {
        self.manifest = manifest;
        self
    }

    /// Set the document header.
    pub fn with_header(mut self, header: DocumentHeader) -> Self {
        self.header = header;
        self
    }

    /// Set the output extension used in batch mode.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    /// Set the batch glob pattern.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }
}

/// Outcome of converting one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionResult {
    /// Source file
    pub input: PathBuf,

    /// Bundle path
    pub output: PathBuf,

    /// Whether the bundle was written
    pub success: bool,

    /// Fingerprint of the written bundle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,

    /// Error message on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConversionResult {
    fn succeeded(input: &Path, output: &Path, fingerprint: String) -> Self {
        Self {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            success: true,
            fingerprint: Some(fingerprint),
            error: None,
        }
    }

    fn failed(input: &Path, output: &Path, error: String) -> Self {
        Self {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            success: false,
            fingerprint: None,
            error: Some(error),
        }
    }
}

/// Outcome of a batch conversion.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Number of files converted successfully
    pub converted: usize,

    /// Per-file results in processing order
    pub results: Vec<ConversionResult>,
}

impl BatchReport {
    /// Results of files that failed to convert.
    pub fn failures(&self) -> impl Iterator<Item = &ConversionResult> {
        self.results.iter().filter(|r| !r.success)
    }

    /// Number of files attempted.
    pub fn total(&self) -> usize {
        self.results.len()
    }
}

/// Converts text and Markdown sources into Pages bundles.
///
/// # Example
///
/// ```no_run
/// use pagepack::{ConvertOptions, Converter};
///
/// let converter = Converter::new(ConvertOptions::default());
/// let fingerprint = converter.convert_file("notes.md", "out/notes.pages")?;
/// println!("Output hash: {}", fingerprint);
/// # Ok::<(), pagepack::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    /// Create a converter with the given options.
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// The options this converter was built with.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Build the block model for source text.
    pub fn blocks(&self, content: &str, format: SourceFormat) -> Vec<Block> {
        parse::parse(content, format)
    }

    /// Serialize source text to `index.xml`.
    pub fn render(&self, content: &str, format: SourceFormat) -> String {
        let blocks = self.blocks(content, format);
        render::to_xml(&blocks, &self.options.catalogue, &self.options.header)
    }

    /// Convert source text to bundle bytes without touching the filesystem.
    pub fn convert_str(&self, content: &str, format: SourceFormat) -> Result<Vec<u8>> {
        let xml = self.render(content, format);
        bundle::bundle_bytes(&xml, &self.options.manifest)
    }

    /// Convert one file and return the fingerprint of the written bundle.
    ///
    /// The source format is chosen from the input extension.
    pub fn convert_file(&self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<String> {
        let input = input.as_ref();
        let output = output.as_ref();

        if !input.exists() {
            return Err(Error::InputNotFound(input.to_path_buf()));
        }

        let content = reader::read_text(input)?;
        let xml = self.render(&content, SourceFormat::from_path(input));
        bundle::write_bundle(&xml, &self.options.manifest, output)?;

        let fingerprint = hash::fingerprint_file(output)?;
        log::info!(
            "converted {} -> {} ({})",
            input.display(),
            output.display(),
            fingerprint
        );
        Ok(fingerprint)
    }

    /// Convert one file, capturing any error in the result.
    pub fn convert(&self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> ConversionResult {
        let input = input.as_ref();
        let output = output.as_ref();

        match self.convert_file(input, output) {
            Ok(fingerprint) => ConversionResult::succeeded(input, output, fingerprint),
            Err(err) => {
                log::warn!("failed to convert {}: {}", input.display(), err);
                ConversionResult::failed(input, output, err.to_string())
            }
        }
    }

    /// Convert every file under `input_dir` matching the batch pattern.
    ///
    /// Outputs mirror the input tree under `output_dir` with the extension
    /// replaced. A failing file is recorded in the report and does not stop
    /// the batch. When two inputs map to the same output (`a.txt` and
    /// `a.md`), the first in walk order is converted and the others are
    /// recorded as failures.
    pub fn batch_convert(
        &self,
        input_dir: impl AsRef<Path>,
        output_dir: impl AsRef<Path>,
    ) -> BatchReport {
        let input_dir = input_dir.as_ref();
        let output_dir = output_dir.as_ref();
        let mut report = BatchReport::default();

        if !input_dir.is_dir() {
            log::error!("input directory {} does not exist", input_dir.display());
            return report;
        }

        let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();

        for file in self.batch_inputs(input_dir, output_dir) {
            let Some(output) =
                output_path_for(input_dir, output_dir, &file, &self.options.extension)
            else {
                continue;
            };

            if let Some(first) = claimed.get(&output) {
                log::warn!(
                    "skipping {}: output {} already written from {}",
                    file.display(),
                    output.display(),
                    first.display()
                );
                let error = format!(
                    "Output {} collides with {}",
                    output.display(),
                    first.display()
                );
                report
                    .results
                    .push(ConversionResult::failed(&file, &output, error));
                continue;
            }
            claimed.insert(output.clone(), file.clone());

            let result = self.convert(&file, &output);
            if result.success {
                report.converted += 1;
            }
            report.results.push(result);
        }

        log::info!(
            "batch converted {} of {} files from {}",
            report.converted,
            report.total(),
            input_dir.display()
        );
        report
    }

    /// Files selected for batch conversion, in sorted walk order.
    ///
    /// Collected up front so bundles written during the batch are never
    /// picked up as inputs. Files inside `output_dir` are skipped however
    /// either directory is spelled.
    pub fn batch_inputs(&self, input_dir: &Path, output_dir: &Path) -> Vec<PathBuf> {
        let canonical_input = canonical_or_raw(input_dir);
        let canonical_output = canonical_or_raw(output_dir);
        let same_dir = canonical_input == canonical_output;

        WalkDir::new(input_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    log::warn!("skipping unreadable entry: {}", err);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| {
                same_dir
                    || path
                        .strip_prefix(input_dir)
                        .map(|rel| !canonical_input.join(rel).starts_with(&canonical_output))
                        .unwrap_or(true)
            })
            .filter(|path| {
                relative_slash_path(input_dir, path)
                    .is_some_and(|rel| glob_match(&self.options.pattern, &rel))
            })
            .collect()
    }
}

/// Mirror `file` (under `input_dir`) into `output_dir` with a new extension.
///
/// Returns `None` if `file` is not inside `input_dir`.
pub fn output_path_for(
    input_dir: &Path,
    output_dir: &Path,
    file: &Path,
    extension: &str,
) -> Option<PathBuf> {
    let relative = file.strip_prefix(input_dir).ok()?;
    let mut output = output_dir.join(relative);
    output.set_extension(extension);
    Some(output)
}

/// Resolve `path` on disk, keeping it as given when it does not exist yet.
fn canonical_or_raw(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

fn relative_slash_path(base: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(base).ok()?;
    let parts: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}

/// Match a `/`-separated relative path against a glob pattern.
///
/// `*` and `?` match within one path segment; a `**` segment matches zero or
/// more whole segments.
pub fn glob_match(pattern: &str, path: &str) -> bool {
    let pattern: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    match_segments(&pattern, &segments)
}

fn match_segments(pattern: &[&str], segments: &[&str]) -> bool {
    match pattern.split_first() {
        None => segments.is_empty(),
        Some((&"**", rest)) => (0..=segments.len()).any(|i| match_segments(rest, &segments[i..])),
        Some((head, rest)) => match segments.split_first() {
            Some((segment, remaining)) => {
                wildcard_match(head, segment) && match_segments(rest, remaining)
            }
            None => false,
        },
    }
}

fn wildcard_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();
    let (mut p, mut t) = (0, 0);
    // Position of the last `*` and the text index it is currently absorbing up to.
    let mut star: Option<(usize, usize)> = None;

    while t < text.len() {
        if p < pattern.len() && (pattern[p] == '?' || pattern[p] == text[t]) {
            p += 1;
            t += 1;
        } else if p < pattern.len() && pattern[p] == '*' {
            star = Some((p, t));
            p += 1;
        } else if let Some((star_p, star_t)) = star {
            p = star_p + 1;
            t = star_t + 1;
            star = Some((star_p, star_t + 1));
        } else {
            return false;
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}
