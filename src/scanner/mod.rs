//! Traversal engine.
//!
//! Orchestrates a scan: resolve the file set, parse and traverse each
//! file (in parallel), cross-check extracted translation calls against
//! the catalog store, accumulate the usage set, reconcile unused keys,
//! and aggregate everything into a `ScanResult`.
//!
//! Per-invocation state (findings, usage set, file counter) belongs to
//! one scan call; the only shared state is the catalog store, loaded once
//! per scanner and read-only during traversal.

pub(crate) mod visitor;

use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use anyhow::Result;
use colored::Colorize;
use rayon::prelude::*;
use swc_common::SourceMap;

use crate::adapters::{Adapter, LibraryAdapter};
use crate::catalog::CatalogStore;
use crate::config::Config;
use crate::files::resolve_files;
use crate::findings::{
    CoverageReport, Finding, LocaleCoverage, Rule, ScanResult, ScanSummary, Severity, Suggestion,
    SuggestionKind, TextRange,
};
use crate::parsers::parse_source;
use crate::rules::{RuleCheck, builtin_rules};
use visitor::{FileScan, FileVisitor};

/// The scanning and analysis engine.
///
/// Construction validates the config and resolves the library adapter, so
/// configuration errors surface before any scanning begins. The catalog
/// store is loaded lazily, once, and cached for the scanner's lifetime;
/// callers that change catalog files invalidate explicitly.
pub struct Scanner {
    config: Config,
    root: PathBuf,
    adapter: Adapter,
    rules: Vec<Box<dyn RuleCheck + Send + Sync>>,
    catalogs: OnceLock<CatalogStore>,
    verbose: bool,
}

impl Scanner {
    pub fn new(config: Config, root: impl Into<PathBuf>) -> Result<Self> {
        config.validate()?;
        let adapter = Adapter::resolve(&config)?;
        Ok(Self {
            config,
            root: root.into(),
            adapter,
            rules: builtin_rules(),
            catalogs: OnceLock::new(),
            verbose: false,
        })
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Name of the resolved library adapter.
    pub fn library(&self) -> &'static str {
        self.adapter.name()
    }

    /// The catalog store, loaded on first use. Load failures degrade to
    /// empty catalogs with a logged warning; scanning proceeds without
    /// cross-checking.
    pub fn catalogs(&self) -> &CatalogStore {
        self.catalogs.get_or_init(|| {
            let result = self.adapter.load_catalogs(&self.config, &self.root);
            if !result.warnings.is_empty() {
                eprintln!(
                    "{} {} catalog file(s) failed to load; affected locales degrade to empty{}",
                    "warning:".bold().yellow(),
                    result.warnings.len(),
                    if self.verbose { ":" } else { "" }
                );
                if self.verbose {
                    for warning in &result.warnings {
                        eprintln!("  {}: {}", warning.file_path, warning.error);
                    }
                }
            }
            result.store
        })
    }

    /// Drop the cached catalog store so the next scan reloads it.
    pub fn invalidate_catalogs(&mut self) {
        self.catalogs = OnceLock::new();
    }

    /// Scan the whole configured source set, including unused-key
    /// reconciliation against the default locale's catalog.
    pub fn scan(&self) -> ScanResult {
        let started = Instant::now();
        let catalogs = self.catalogs();

        let resolved = resolve_files(
            &self.root,
            &self.config.src,
            &self.config.ignore,
            self.config.ignore_test_files,
            self.verbose,
        );
        if resolved.skipped_count > 0 {
            eprintln!(
                "{} {} path(s) skipped due to access errors",
                "warning:".bold().yellow(),
                resolved.skipped_count
            );
        }

        let mut file_list: Vec<String> = resolved.files.into_iter().collect();
        file_list.sort();
        let total_files = file_list.len();

        // Per-file work is independent: the catalog store is read-only
        // here and each file owns its syntax tree
        let scans: Vec<FileScan> = file_list
            .par_iter()
            .filter_map(|file_path| self.scan_file(file_path))
            .collect();

        let mut findings = Vec::new();
        let mut used_keys: HashSet<String> = HashSet::new();
        for scan in scans {
            findings.extend(scan.findings);
            used_keys.extend(scan.used_keys);
        }

        // Reconciling: the default locale's catalog is the authoritative
        // key universe; anything it defines that no file uses is unused
        findings.extend(self.unused_key_findings(catalogs, &used_keys));

        self.finish(findings, total_files, started)
    }

    /// Scan one file's content with the same per-file semantics as
    /// `scan`. Catalogs are still cross-checked; unused-key
    /// reconciliation is skipped because it needs global usage knowledge.
    pub fn scan_single_file(&self, file_path: &str, content: &str) -> ScanResult {
        let started = Instant::now();
        let _ = self.catalogs();

        let findings = self
            .scan_content(file_path, content.to_string())
            .map(|scan| scan.findings)
            .unwrap_or_default();

        self.finish(findings, 1, started)
    }

    fn scan_file(&self, file_path: &str) -> Option<FileScan> {
        let content = match std::fs::read_to_string(file_path) {
            Ok(content) => content,
            Err(e) => {
                if self.verbose {
                    eprintln!(
                        "{} failed to read {}: {}",
                        "warning:".bold().yellow(),
                        file_path,
                        e
                    );
                }
                return None;
            }
        };
        self.scan_content(file_path, content)
    }

    /// Parse and traverse one file. Parse failures are non-fatal: the
    /// file is skipped with zero findings and the scan continues.
    fn scan_content(&self, file_path: &str, content: String) -> Option<FileScan> {
        let parsed = match parse_source(content, file_path, Arc::new(SourceMap::default())) {
            Ok(parsed) => parsed,
            Err(e) => {
                if self.verbose {
                    eprintln!(
                        "{} failed to parse {}: {}",
                        "warning:".bold().yellow(),
                        file_path,
                        e
                    );
                }
                return None;
            }
        };

        let visitor = FileVisitor::new(
            file_path,
            &parsed,
            &self.config,
            &self.adapter,
            self.catalogs(),
            &self.rules,
            self.verbose,
        );
        Some(visitor.analyze(&parsed.module))
    }

    fn unused_key_findings(
        &self,
        catalogs: &CatalogStore,
        used_keys: &HashSet<String>,
    ) -> Vec<Finding> {
        let Some(default_catalog) = catalogs.locale(&self.config.default_locale) else {
            return Vec::new();
        };

        let mut unused: Vec<&String> = default_catalog
            .keys()
            .filter(|key| !used_keys.contains(*key))
            .collect();
        unused.sort();

        unused
            .into_iter()
            .map(|key| {
                let entry = default_catalog.get(key).expect("key comes from this catalog");
                Finding::new(
                    Rule::UnusedKey,
                    Severity::Warning,
                    format!("key \"{}\" is defined but never used", key),
                    entry.file_path.clone(),
                    TextRange::at_line(entry.line),
                    entry.value.clone(),
                )
                .with_suggestion(Suggestion {
                    kind: SuggestionKind::RemoveKey,
                    description: format!("remove unused key \"{}\"", key),
                    key: Some(key.clone()),
                    replacement: None,
                    catalog_path: Some(entry.file_path.clone()),
                })
            })
            .collect()
    }

    fn finish(&self, mut findings: Vec<Finding>, total_files: usize, started: Instant) -> ScanResult {
        findings.sort();
        let summary = ScanSummary::tally(
            &findings,
            total_files,
            started.elapsed().as_millis() as u64,
        );
        let coverage = compute_coverage(self.catalogs(), &self.config);
        ScanResult {
            summary,
            findings,
            coverage,
        }
    }
}

/// Coverage per locale: the default locale's catalog is the key universe;
/// a key counts as translated in a locale when it has a non-empty value
/// there.
fn compute_coverage(store: &CatalogStore, config: &Config) -> CoverageReport {
    let mut universe: Vec<&String> = store
        .locale(&config.default_locale)
        .map(|catalog| catalog.keys().collect())
        .unwrap_or_default();
    universe.sort();

    let mut by_locale = BTreeMap::new();
    let mut total_sum = 0usize;
    let mut translated_sum = 0usize;
    let mut all_budgets_met = true;

    for locale in &config.locales {
        let catalog = store.locale(locale);
        let total = universe.len();
        let mut translated = 0usize;
        let mut missing = Vec::new();

        for key in &universe {
            let has_value = catalog
                .and_then(|c| c.get(key))
                .is_some_and(|entry| !entry.value.trim().is_empty());
            if has_value {
                translated += 1;
            } else {
                missing.push((*key).clone());
            }
        }

        let percentage = if total == 0 {
            100.0
        } else {
            translated as f64 / total as f64 * 100.0
        };
        let budget_met = config
            .budgets
            .coverage
            .get(locale)
            .is_none_or(|required| percentage + 1e-9 >= *required);

        if locale != &config.default_locale {
            total_sum += total;
            translated_sum += translated;
        }
        if !budget_met {
            all_budgets_met = false;
        }

        by_locale.insert(
            locale.clone(),
            LocaleCoverage {
                total_keys: total,
                translated_keys: translated,
                missing_keys: missing,
                percentage,
                budget_met,
            },
        );
    }

    let overall_percentage = if total_sum == 0 {
        100.0
    } else {
        translated_sum as f64 / total_sum as f64 * 100.0
    };

    CoverageReport {
        by_locale,
        overall: LocaleCoverage {
            total_keys: total_sum,
            translated_keys: translated_sum,
            missing_keys: Vec::new(),
            percentage: overall_percentage,
            budget_met: all_budgets_met,
        },
    }
}
