//! Intlint - static-analysis engine for internationalization defects
//!
//! Intlint scans a source tree for i18n issues: user-facing text left
//! unexternalized, translation keys referenced in code but absent from one
//! or more locale catalogs, catalog keys never referenced by code,
//! malformed ICU pluralization syntax, and translation coverage measured
//! against per-locale budgets.
//!
//! It understands three translation-library conventions through pluggable
//! adapters (namespaced hierarchical catalogs, flat ICU message catalogs,
//! and macro invocation with structured-text catalogs), and exposes two
//! entry points with identical per-file semantics: [`Scanner::scan`] for
//! whole-project runs and [`Scanner::scan_single_file`] for interactive
//! callers.
//!
//! ## Module Structure
//!
//! - `adapters`: Library adapters (detection, catalog loading, invocation idioms)
//! - `catalog`: In-memory catalog store and file loaders
//! - `config`: Scan configuration (consumed, never mutated, by the core)
//! - `files`: Source file resolution (globs, ignores)
//! - `findings`: Finding types, summary, coverage, and the scan result
//! - `icu`: ICU-style message template validation
//! - `keygen`: Deterministic translation-key synthesis
//! - `parsers`: Syntax parser adapter over swc
//! - `rules`: Per-node detection rules
//! - `scanner`: Traversal engine orchestrating a scan
//! - `utils`: Shared utility functions

pub mod adapters;
pub mod catalog;
pub mod config;
pub mod files;
pub mod findings;
pub mod icu;
pub mod keygen;
pub mod parsers;
pub mod rules;
pub mod scanner;
pub mod utils;

pub use config::{Config, LibrarySelector};
pub use findings::{
    CoverageReport, Finding, LocaleCoverage, Rule, ScanResult, ScanSummary, Severity,
};
pub use scanner::Scanner;
