//! Corpus loading
//!
//! Parses the on-disk markdown corpus into document records for indexing.
//! The expected shape per file:
//!
//! ```text
//! # <ID>: <Title>
//! key: value            (metadata block, until the first blank line)
//!
//! body...
//! ```
//!
//! The document type comes from the file name prefix (`ADR-`, `STD-`,
//! `RBK-`, `PM-`, `TMP-`); files without a recognized prefix are skipped
//! with a warning.

use crate::error::{CliError, Result};
use regex::Regex;
use scribe_domain::{DocType, Document};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;
use tracing::warn;
use walkdir::WalkDir;

fn title_line() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^#\s+(.+?)\s*$").expect("static pattern"))
}

fn meta_line() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([a-zA-Z_][a-zA-Z0-9_]*)\s*:\s*(.+?)\s*$").expect("static pattern")
    })
}

fn doc_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^((?:ADR|STD|RBK|TMP)-\d{2,4}|PM-\d{4}-\d{2})\b").expect("static pattern")
    })
}

fn detect_doc_type(file_name: &str) -> Option<DocType> {
    let prefix = file_name.split('-').next()?;
    DocType::parse(prefix)
}

/// Load every markdown document under `dir`, sorted by path
pub fn load_corpus(dir: &Path) -> Result<Vec<Document>> {
    if !dir.exists() {
        return Err(CliError::Corpus(format!(
            "Corpus directory not found: {}",
            dir.display()
        )));
    }

    let mut paths: Vec<_> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry.path().extension().map(|e| e == "md").unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();
    paths.sort();

    if paths.is_empty() {
        return Err(CliError::Corpus(format!(
            "No markdown documents found under: {}",
            dir.display()
        )));
    }

    let mut documents = Vec::new();
    for path in paths {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let Some(doc_type) = detect_doc_type(&file_name) else {
            warn!(path = %path.display(), "skipping file without a typed prefix");
            continue;
        };

        documents.push(parse_markdown(&path, doc_type)?);
    }

    Ok(documents)
}

/// Parse one markdown file into a document record
///
/// A file without a title line is a fatal parse failure; it must not
/// contribute partial content to the index.
pub fn parse_markdown(path: &Path, doc_type: DocType) -> Result<Document> {
    let text = std::fs::read_to_string(path)?;
    let lines: Vec<&str> = text.lines().collect();

    let (title_idx, title) = lines
        .iter()
        .enumerate()
        .find_map(|(i, line)| {
            title_line()
                .captures(line.trim())
                .map(|c| (i, c[1].to_string()))
        })
        .ok_or_else(|| {
            CliError::Corpus(format!("Missing title line (# ...) in {}", path.display()))
        })?;

    let mut meta = BTreeMap::new();
    let mut body_start = title_idx + 1;
    for line in &lines[title_idx + 1..] {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            break;
        }
        let Some(captures) = meta_line().captures(trimmed) else {
            break;
        };
        meta.insert(captures[1].to_string(), captures[2].to_string());
        body_start += 1;
    }

    let body = lines[body_start..].join("\n").trim().to_string();

    let doc_id = doc_id_pattern()
        .captures(&title)
        .map(|c| c[1].to_string())
        .or_else(|| {
            let stem = path.file_stem()?.to_string_lossy();
            doc_id_pattern().captures(&stem).map(|c| c[1].to_string())
        })
        .unwrap_or_else(|| {
            path.file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default()
        });

    Ok(Document::new(
        doc_id,
        doc_type,
        title,
        meta,
        body,
        path.display().to_string(),
    ))
}
