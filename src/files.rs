//! Source file resolution.
//!
//! Expands the configured source globs minus ignore globs into the set of
//! scannable files. Entries without wildcards are treated as literal
//! paths, so bracketed route directories like `app/[locale]` work without
//! escaping.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use colored::Colorize;
use glob::{Pattern, glob};
use walkdir::WalkDir;

use crate::config::{SOURCE_EXTENSIONS, TEST_FILE_PATTERNS};

/// Check if a pattern contains glob wildcards (* or ?).
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of resolving the file set.
pub struct ResolvedFiles {
    pub files: HashSet<String>,
    pub skipped_count: usize,
}

pub fn resolve_files(
    base_dir: &Path,
    src: &[String],
    ignore_patterns: &[String],
    ignore_test_files: bool,
    verbose: bool,
) -> ResolvedFiles {
    let mut files: HashSet<String> = HashSet::new();
    let mut skipped_count = 0;

    // Separate ignore patterns into literal paths and glob patterns
    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for pattern in ignore_patterns {
        if is_glob_pattern(pattern) {
            match Pattern::new(pattern) {
                Ok(compiled) => glob_patterns.push(compiled),
                Err(e) => {
                    if verbose {
                        eprintln!(
                            "{} Invalid ignore pattern '{}': {}",
                            "warning:".bold().yellow(),
                            pattern,
                            e
                        );
                    }
                }
            }
        } else {
            literal_ignore_paths.push(base_dir.join(pattern));
        }
    }

    if ignore_test_files {
        for pattern in TEST_FILE_PATTERNS {
            if let Ok(compiled) = Pattern::new(pattern) {
                glob_patterns.push(compiled);
            }
        }
    }

    // Expand src entries: literal paths used as-is, glob patterns expanded
    // to matching files and directories
    let mut roots: Vec<PathBuf> = Vec::new();
    if src.is_empty() {
        roots.push(base_dir.to_path_buf());
    } else {
        for entry in src {
            if is_glob_pattern(entry) {
                let full_pattern = base_dir.join(entry);
                match glob(&full_pattern.to_string_lossy()) {
                    Ok(matches) => {
                        for matched in matches.flatten() {
                            roots.push(matched);
                        }
                    }
                    Err(e) => {
                        if verbose {
                            eprintln!(
                                "{} Invalid src pattern '{}': {}",
                                "warning:".bold().yellow(),
                                entry,
                                e
                            );
                        }
                    }
                }
            } else {
                let path = base_dir.join(entry);
                if path.exists() {
                    roots.push(path);
                } else if verbose {
                    eprintln!(
                        "{} src path does not exist: {}",
                        "warning:".bold().yellow(),
                        path.display()
                    );
                }
            }
        }
    }

    for root in roots {
        for entry in WalkDir::new(root) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    if verbose {
                        eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                    }
                    continue;
                }
            };
            let path = entry.path();
            let path_str = path.to_string_lossy();

            // Literal ignore paths match by prefix
            if literal_ignore_paths
                .iter()
                .any(|ignore_path| path.starts_with(ignore_path))
            {
                continue;
            }

            if glob_patterns.iter().any(|p| p.matches(&path_str)) {
                continue;
            }

            if path.is_file() && is_scannable_file(path) {
                files.insert(path_str.into());
            }
        }
    }

    ResolvedFiles {
        files,
        skipped_count,
    }
}

fn is_scannable_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}
