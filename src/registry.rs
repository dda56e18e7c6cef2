//! Registry entry readers
//!
//! Two line-oriented formats are accepted:
//!
//! ```text
//! # JSON Lines (.jsonl / .json)
//! {"id": "f1r.1", "tokens": ["fachys", "ykal", "ar"]}
//!
//! # TSV (anything else): id, a tab, then tokens split on whitespace or '.'
//! f1r.1	fachys.ykal.ar
//! ```
//!
//! Blank lines and lines starting with `#` are skipped in both formats.
//! Entry ids must be unique; input order is preserved.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use reach_types::RegistryEntry;
use tracing::info;

use crate::error::RegistryError;

/// Registry line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryFormat {
    JsonLines,
    Tsv,
}

impl RegistryFormat {
    /// Pick a format from the file extension; TSV unless `.jsonl`/`.json`.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("jsonl") | Some("json") => RegistryFormat::JsonLines,
            _ => RegistryFormat::Tsv,
        }
    }
}

/// Read every entry in `path`.
pub fn read_registry(path: &Path) -> Result<Vec<RegistryEntry>, RegistryError> {
    let file = File::open(path).map_err(|source| RegistryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let entries = parse_registry(BufReader::new(file), RegistryFormat::from_path(path))
        .map_err(|e| match e {
            RegistryError::Io { source, .. } => RegistryError::Io {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;

    info!(path = %path.display(), entries = entries.len(), "registry loaded");
    Ok(entries)
}

/// Parse entries from any buffered reader.
pub fn parse_registry<R: BufRead>(
    reader: R,
    format: RegistryFormat,
) -> Result<Vec<RegistryEntry>, RegistryError> {
    let mut entries = Vec::new();
    let mut seen = HashSet::new();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|source| RegistryError::Io {
            path: Default::default(),
            source,
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let entry = match format {
            RegistryFormat::JsonLines => serde_json::from_str::<RegistryEntry>(trimmed)
                .map_err(|source| RegistryError::Json {
                    line: line_no,
                    source,
                })?,
            // keep the tab even when no tokens follow it
            RegistryFormat::Tsv => {
                parse_tsv_line(line.trim_end_matches(['\r', '\n']), line_no)?
            }
        };

        if entry.id.trim().is_empty() {
            return Err(RegistryError::EmptyId { line: line_no });
        }
        if !seen.insert(entry.id.clone()) {
            return Err(RegistryError::DuplicateId {
                line: line_no,
                id: entry.id,
            });
        }
        entries.push(entry);
    }

    Ok(entries)
}

fn parse_tsv_line(line: &str, line_no: usize) -> Result<RegistryEntry, RegistryError> {
    let (id, tokens) = line
        .split_once('\t')
        .ok_or(RegistryError::MissingTokens { line: line_no })?;

    let tokens = tokens
        .split(|c: char| c.is_whitespace() || c == '.')
        .filter(|t| !t.is_empty());

    Ok(RegistryEntry::new(id.trim(), tokens))
}
