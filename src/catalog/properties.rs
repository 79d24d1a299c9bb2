//! Line-oriented `key = value` catalog parsing.
//!
//! The macro-invocation library family ships either compiled JSON catalogs
//! or a plain line-based format. Lines are `key = value`; blank lines and
//! `#`/`!` comment lines are skipped; lines without a separator are
//! ignored.

use std::{fs, path::Path};

use anyhow::{Context, Result};

use crate::catalog::json::FlatEntry;

/// Read a line-oriented catalog file into flat entries.
pub fn parse_properties_file(path: &Path) -> Result<Vec<FlatEntry>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file: {:?}", path))?;
    Ok(parse_properties(&content))
}

fn parse_properties(content: &str) -> Vec<FlatEntry> {
    let mut entries = Vec::new();
    for (index, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        entries.push(FlatEntry {
            key: key.to_string(),
            value: value.trim().to_string(),
            line: index + 1,
        });
    }
    entries
}
