//! Deterministic translation-key synthesis.
//!
//! Generates candidate catalog keys for text being externalized. All three
//! strategies are pure functions of (text, file path, config), so repeated
//! runs over unchanged input propose identical keys.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::utils::{stable_hash, to_base36};

/// Key-generation strategy, selected by config or by the active adapter's
/// preferred default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyStrategy {
    /// `{basename}.{slug}` derived from the file name.
    Path,
    /// `{dotted.dir.namespace}.{slug}` derived from directory segments.
    Namespace,
    /// `{prefix}{base36 hash}` derived from the text content alone.
    Hash,
}

/// Directory names treated as conventional source roots and excluded from
/// namespace derivation.
const SOURCE_ROOT_DIRS: &[&str] = &["src", "app", "pages"];

fn separator_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("[^a-z0-9]+").expect("static pattern compiles"))
}

/// Slugify text for use as a key segment: lowercase, runs of characters
/// outside `[a-z0-9]` collapsed to a single `_`, leading/trailing `_`
/// trimmed.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    separator_runs()
        .replace_all(&lowered, "_")
        .trim_matches('_')
        .to_string()
}

fn file_basename(file_path: &str) -> String {
    let name = file_path
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_path);
    let stem = name.split('.').next().unwrap_or(name);
    slugify(stem)
}

/// Derive a dotted namespace from the file's directory segments, excluding
/// leading `.`/`..` components and a conventional top-level source directory.
fn derive_namespace(file_path: &str) -> String {
    let normalized = file_path.replace('\\', "/");
    let mut segments: Vec<&str> = normalized
        .split('/')
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
        .collect();
    // Drop the file name itself
    segments.pop();
    if segments.first().is_some_and(|s| SOURCE_ROOT_DIRS.contains(s)) {
        segments.remove(0);
    }
    segments
        .iter()
        .map(|s| slugify(s))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(".")
}

/// Generate a candidate catalog key for `text` found in `file_path`.
///
/// The final string is truncated to `max_len` characters as the last step,
/// after concatenation; truncating mid-word is accepted.
pub fn generate_key(
    text: &str,
    file_path: &str,
    strategy: KeyStrategy,
    max_len: usize,
    hash_prefix: &str,
) -> String {
    let key = match strategy {
        KeyStrategy::Path => {
            let base = file_basename(file_path);
            join_segments(&base, &slug_or_hash(text))
        }
        KeyStrategy::Namespace => {
            let namespace = derive_namespace(file_path);
            join_segments(&namespace, &slug_or_hash(text))
        }
        KeyStrategy::Hash => format!("{}{}", hash_prefix, to_base36(stable_hash(text))),
    };
    truncate_chars(&key, max_len)
}

/// Slug for the text, falling back to a content hash when slugification
/// yields nothing (punctuation-only or non-Latin text).
fn slug_or_hash(text: &str) -> String {
    let slug = slugify(text);
    if slug.is_empty() {
        to_base36(stable_hash(text))
    } else {
        slug
    }
}

fn join_segments(prefix: &str, slug: &str) -> String {
    if prefix.is_empty() {
        slug.to_string()
    } else {
        format!("{}.{}", prefix, slug)
    }
}

fn truncate_chars(key: &str, max_len: usize) -> String {
    key.chars().take(max_len).collect()
}
