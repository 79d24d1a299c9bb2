//! JSON catalog parsing.
//!
//! Reads a nested JSON catalog file and flattens it into dotted keys with
//! the line each key appears on, so catalog-side findings can point at the
//! right place.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde_json::Value;

/// One flattened catalog entry as read from a file: dotted key, string
/// value, and the 1-based line the key is defined on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatEntry {
    pub key: String,
    pub value: String,
    pub line: usize,
}

/// Read and flatten one JSON catalog file.
pub fn parse_json_file(path: &Path) -> Result<Vec<FlatEntry>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file: {:?}", path))?;

    let json: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse catalog file: {:?}", path))?;

    // Pre-compute line index for O(log n) line lookups
    let line_index = build_line_index(&content);
    let mut entries = Vec::new();
    flatten_json(&json, String::new(), &content, &line_index, &mut entries);
    Ok(entries)
}

/// Build an index of line start byte offsets for O(log n) line lookups.
///
/// The returned vector contains byte offsets where each line starts.
/// Line 1 starts at offset 0, line 2 starts after the first '\n', etc.
fn build_line_index(content: &str) -> Vec<usize> {
    let mut offsets = vec![0]; // Line 1 starts at offset 0
    for (i, c) in content.char_indices() {
        if c == '\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// Find line number for a byte offset using binary search.
///
/// Returns 1-based line number.
fn offset_to_line(line_index: &[usize], offset: usize) -> usize {
    match line_index.binary_search(&offset) {
        Ok(line) => line + 1, // Exact match at line start
        Err(line) => line,    // Falls within this line
    }
}

/// Find the line number where a key appears in the JSON content.
///
/// Searches for each key part in sequence so duplicate leaf names resolve
/// correctly: `common.submit` finds the `"submit"` that comes after
/// `"common"`, not a `"submit"` under another branch. Each match is
/// validated to be an actual JSON key (followed by `:`), not a string
/// value that happens to contain the same text.
fn find_key_line(content: &str, key_path: &str, line_index: &[usize]) -> usize {
    let parts: Vec<&str> = key_path.split('.').collect();

    let mut search_start = 0;
    for part in &parts {
        let pattern = format!("\"{}\"", part);
        let remaining = &content[search_start..];

        // Find all occurrences and pick the one that's a key (followed by :)
        let mut pos = 0;
        let mut found = false;
        while let Some(rel_pos) = remaining[pos..].find(&pattern) {
            let abs_pos = pos + rel_pos;
            let after_pattern = abs_pos + pattern.len();

            if after_pattern < remaining.len() {
                let is_key = remaining[after_pattern..].trim_start().starts_with(':');
                if is_key {
                    search_start += after_pattern;
                    found = true;
                    break;
                }
            }
            pos = abs_pos + 1;
        }

        if !found {
            break;
        }
    }

    if search_start > 0 {
        offset_to_line(line_index, search_start)
    } else {
        1 // Default to line 1 if not found
    }
}

fn flatten_json(
    value: &Value,
    prefix: String,
    content: &str,
    line_index: &[usize],
    entries: &mut Vec<FlatEntry>,
) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let new_prefix = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_json(val, new_prefix, content, line_index, entries);
            }
        }
        Value::String(s) => {
            let line = find_key_line(content, &prefix, line_index);
            entries.push(FlatEntry {
                key: prefix,
                value: s.clone(),
                line,
            });
        }
        Value::Array(arr) => {
            if arr.is_empty() {
                return;
            }

            // String-only arrays are addressed as a whole; object arrays
            // are expanded with indexed keys (items.0.title, items.1.title)
            let is_string_array = arr.iter().all(|v| matches!(v, Value::String(_)));

            if is_string_array && !prefix.is_empty() {
                let values: Vec<&str> = arr.iter().filter_map(|v| v.as_str()).collect();
                let line = find_key_line(content, &prefix, line_index);
                entries.push(FlatEntry {
                    key: prefix,
                    value: values.join(", "),
                    line,
                });
            } else {
                for (index, val) in arr.iter().enumerate() {
                    let new_prefix = if prefix.is_empty() {
                        index.to_string()
                    } else {
                        format!("{}.{}", prefix, index)
                    };
                    flatten_json(val, new_prefix, content, line_index, entries);
                }
            }
        }
        _ => {}
    }
}
