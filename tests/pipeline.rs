//! End-to-end tests for the conversion pipeline.
//!
//! Run with: cargo test --test pipeline

use pagepack::bundle::{list_members, read_member};
use pagepack::model::{INDEX_XML_PATH, THUMBNAIL_PATH, VERSION_HISTORY_PATH};
use pagepack::render::{is_xml_char, read_paragraphs};
use pagepack::{fingerprint_file, BlockKind, ConvertOptions, Converter, SourceFormat};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SAMPLE_MD: &str = "# Project Notes\n\n\
Some **bold** intro & context.\n\n\
## Tasks\n\n\
- write <tests>\n\
- ship it\n\n\
### Details\n\n\
Closing paragraph with \"quotes\" and 'apostrophes'.\n";

const SAMPLE_TXT: &str = "INTRODUCTION\n\nThis text has <angle> brackets & ampersands.\n\n\nSECOND SECTION\n\nMore body.";

fn write(path: &Path, content: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn index_xml(bundle: &Path) -> String {
    String::from_utf8(read_member(bundle, INDEX_XML_PATH).unwrap()).unwrap()
}

#[test]
fn test_hello_world_round_trip() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("hello.txt");
    let output = dir.path().join("hello.pages");
    write(&input, b"HELLO WORLD\n\nThis is body text.");

    Converter::default().convert_file(&input, &output).unwrap();

    let paragraphs = read_paragraphs(&index_xml(&output)).unwrap();
    assert_eq!(paragraphs.len(), 2);
    assert_eq!(paragraphs[0].style, "paragraph-style-1");
    assert_eq!(paragraphs[0].text, "HELLO WORLD");
    assert_eq!(paragraphs[1].style, "paragraph-style-0");
    assert_eq!(paragraphs[1].text, "This is body text.");
}

#[test]
fn test_determinism_across_runs() {
    let dir = TempDir::new().unwrap();
    let md = dir.path().join("notes.md");
    let txt = dir.path().join("notes.txt");
    write(&md, SAMPLE_MD.as_bytes());
    write(&txt, SAMPLE_TXT.as_bytes());

    for input in [&md, &txt] {
        let first = dir.path().join("run1").join(input.file_name().unwrap());
        let second = dir.path().join("run2").join(input.file_name().unwrap());

        let fp1 = Converter::default().convert_file(input, &first).unwrap();
        let fp2 = Converter::new(ConvertOptions::new())
            .convert_file(input, &second)
            .unwrap();

        assert_eq!(fp1, fp2);
        assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
        assert_eq!(fingerprint_file(&first).unwrap(), fp1);
    }
}

#[test]
fn test_overwrite_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("a.md");
    let output = dir.path().join("a.pages");
    write(&input, SAMPLE_MD.as_bytes());

    let converter = Converter::default();
    let fp1 = converter.convert_file(&input, &output).unwrap();
    let fp2 = converter.convert_file(&input, &output).unwrap();
    assert_eq!(fp1, fp2);
}

#[test]
fn test_archive_structure() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("doc.md");
    let output = dir.path().join("out/doc.pages");
    write(&input, SAMPLE_MD.as_bytes());

    Converter::default().convert_file(&input, &output).unwrap();

    let members = list_members(&output).unwrap();
    assert_eq!(members, [THUMBNAIL_PATH, VERSION_HISTORY_PATH, INDEX_XML_PATH]);

    let plist = String::from_utf8(read_member(&output, VERSION_HISTORY_PATH).unwrap()).unwrap();
    assert!(plist.contains("<string>192</string>"));
    assert!(plist.contains("<string>4.0</string>"));

    let thumb = read_member(&output, THUMBNAIL_PATH).unwrap();
    assert_eq!(thumb, pagepack::model::PLACEHOLDER_THUMBNAIL);

    // index.xml must be well-formed
    read_paragraphs(&index_xml(&output)).unwrap();
}

#[test]
fn test_markdown_mapping_in_bundle() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("doc.md");
    let output = dir.path().join("doc.pages");
    write(&input, SAMPLE_MD.as_bytes());

    Converter::default().convert_file(&input, &output).unwrap();
    let paragraphs = read_paragraphs(&index_xml(&output)).unwrap();

    let summary: Vec<(&str, &str)> = paragraphs
        .iter()
        .map(|p| (p.style.as_str(), p.text.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("paragraph-style-2", "Project Notes"),
            ("paragraph-style-0", "Some bold intro & context."),
            ("paragraph-style-1", "Tasks"),
            ("paragraph-style-0", "• write"),
            ("paragraph-style-0", "• ship it"),
            ("paragraph-style-1", "Details"),
            (
                "paragraph-style-0",
                "Closing paragraph with \"quotes\" and 'apostrophes'."
            ),
        ]
    );
}

#[test]
fn test_escaping_round_trip() {
    let converter = Converter::default();
    let xml = converter.render(SAMPLE_TXT, SourceFormat::PlainText);

    // No raw reserved characters inside text payloads
    for line in xml.lines().filter(|l| l.contains("<sf:text>")) {
        let inner = line
            .trim()
            .trim_start_matches("<sf:text>")
            .trim_end_matches("</sf:text>");
        assert!(!inner.contains('<') && !inner.contains('>'));
        assert!(!inner.contains('"') && !inner.contains('\''));
        assert!(inner.replace("&amp;", "").replace("&lt;", "").replace("&gt;", "").find('&').is_none());
    }

    let texts: Vec<_> = read_paragraphs(&xml)
        .unwrap()
        .into_iter()
        .map(|p| p.text)
        .collect();
    assert_eq!(
        texts,
        vec![
            "INTRODUCTION",
            "This text has <angle> brackets & ampersands.",
            "SECOND SECTION",
            "More body.",
        ]
    );
}

#[test]
fn test_latin1_input() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("legacy.txt");
    let output = dir.path().join("legacy.pages");
    write(&input, b"CAF\xC9\n\nna\xEFve text");

    Converter::default().convert_file(&input, &output).unwrap();
    let paragraphs = read_paragraphs(&index_xml(&output)).unwrap();
    assert_eq!(paragraphs[0].text, "CAFÉ");
    assert_eq!(paragraphs[0].style, "paragraph-style-1");
    assert_eq!(paragraphs[1].text, "naïve text");
}

#[test]
fn test_control_characters_stay_out_of_index() {
    let dir = TempDir::new().unwrap();
    let utf8 = dir.path().join("pages.txt");
    let latin1 = dir.path().join("legacy.txt");
    write(&utf8, b"PAGE ONE\n\nbody\x0cnext page");
    write(&latin1, b"CAF\xC9\x01\n\nbell\x07 and nul\x00 \xE9t\xE9");

    let converter = Converter::default();
    for input in [&utf8, &latin1] {
        let output = input.with_extension("pages");
        converter.convert_file(input, &output).unwrap();

        let xml = index_xml(&output);
        let bad: Vec<_> = xml.chars().filter(|&c| !is_xml_char(c)).collect();
        assert!(bad.is_empty(), "{} has non-XML chars {:?}", input.display(), bad);
        read_paragraphs(&xml).unwrap();
    }

    let texts: Vec<_> = read_paragraphs(&index_xml(&latin1.with_extension("pages")))
        .unwrap()
        .into_iter()
        .map(|p| p.text)
        .collect();
    assert_eq!(texts, vec!["CAFÉ", "bell and nul été"]);
}

#[test]
fn test_unknown_extension_is_plain_text() {
    let converter = Converter::default();
    let blocks = converter.blocks("# HEADING", SourceFormat::from_path("notes.rst"));
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].kind, BlockKind::Heading);
    assert_eq!(blocks[0].text, "# HEADING");
}

#[test]
fn test_missing_input_reports_failure() {
    let dir = TempDir::new().unwrap();
    let result = Converter::default().convert(dir.path().join("ghost.md"), dir.path().join("ghost.pages"));
    assert!(!result.success);
    assert!(!dir.path().join("ghost.pages").exists());
}

#[test]
fn test_batch_mirrors_tree_and_counts_successes() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in");
    let output = dir.path().join("out");

    write(&input.join("top.txt"), SAMPLE_TXT.as_bytes());
    write(&input.join("docs/guide.md"), SAMPLE_MD.as_bytes());
    write(&input.join("docs/deep/notes.markdown"), b"# Deep\n");
    write(&input.join("blocked.txt"), b"will fail");
    // A directory where the bundle should go makes that conversion fail.
    fs::create_dir_all(output.join("blocked.pages")).unwrap();

    let report = Converter::default().batch_convert(&input, &output);

    assert_eq!(report.converted, 3);
    assert_eq!(report.total(), 4);

    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].input, input.join("blocked.txt"));
    assert!(failures[0].error.is_some());

    assert!(output.join("top.pages").is_file());
    assert!(output.join("docs/guide.pages").is_file());
    assert!(output.join("docs/deep/notes.pages").is_file());

    // No scratch files left behind
    let leftovers: Vec<_> = file_names_under(&output)
        .into_iter()
        .filter(|name| name.ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[cfg(unix)]
#[test]
fn test_batch_counts_unreadable_input_as_failure() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in");
    let output = dir.path().join("out");

    write(&input.join("a.txt"), b"A");
    write(&input.join("b.txt"), b"B");
    write(&input.join("c.md"), b"# C\n");
    let locked = input.join("b.txt");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Permission bits do not apply to a privileged user
    if fs::read(&locked).is_ok() {
        return;
    }

    let report = Converter::default().batch_convert(&input, &output);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();

    assert_eq!(report.converted, 2);
    assert_eq!(report.total(), 3);

    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].input, locked);
    assert!(failures[0].error.as_deref().unwrap().starts_with("I/O error"));

    assert!(output.join("a.pages").is_file());
    assert!(!output.join("b.pages").exists());
    assert!(output.join("c.pages").is_file());
}

#[test]
fn test_batch_pattern_filters_inputs() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in");
    let output = dir.path().join("out");

    write(&input.join("a.md"), b"# A\n");
    write(&input.join("b.txt"), b"B");
    write(&input.join("sub/c.md"), b"# C\n");

    let converter = Converter::new(ConvertOptions::new().with_pattern("*.md"));
    let report = converter.batch_convert(&input, &output);

    assert_eq!(report.converted, 1);
    assert!(output.join("a.pages").is_file());
    assert!(!output.join("b.pages").exists());
    assert!(!output.join("sub/c.pages").exists());
}

#[test]
fn test_batch_results_serialize() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in");
    write(&input.join("a.txt"), b"A");

    let report = Converter::default().batch_convert(&input, dir.path().join("out"));
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["converted"], 1);
    assert_eq!(json["results"][0]["success"], true);
    assert_eq!(json["results"][0]["fingerprint"].as_str().unwrap().len(), 16);
    assert!(json["results"][0].get("error").is_none());
}

fn file_names_under(root: &Path) -> Vec<String> {
    let mut names = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in fs::read_dir(&dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                stack.push(path.clone());
            }
            names.push(path.file_name().unwrap().to_string_lossy().into_owned());
        }
    }
    names
}
