//! Finding types and scan results.
//!
//! This module defines everything a scan produces. Each finding is
//! self-contained with all information needed by:
//! - Reporters: to display the finding to users (console, JSON, CI)
//! - Editors: to map findings to live diagnostics and fix suggestions

use std::collections::BTreeMap;

use serde::Serialize;

use crate::utils::{stable_hash, to_base36};

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Rule identifier for each finding type.
///
/// The set is fixed and enumerable. Consumers must treat identifiers they
/// do not recognize as opaque rather than failing on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    HardcodedText,
    MissingKey,
    UnusedKey,
    IcuSyntax,
    /// Reserved for duplicate-text detection; never emitted today.
    DuplicateText,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::HardcodedText => write!(f, "hardcoded-text"),
            Rule::MissingKey => write!(f, "missing-key"),
            Rule::UnusedKey => write!(f, "unused-key"),
            Rule::IcuSyntax => write!(f, "icu-syntax"),
            Rule::DuplicateText => write!(f, "duplicate-text"),
        }
    }
}

// ============================================================
// Source positions
// ============================================================

/// A 1-based line/column range in a source or catalog file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TextRange {
    pub line: usize,
    pub column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

impl TextRange {
    pub fn new(line: usize, column: usize, end_line: usize, end_column: usize) -> Self {
        Self {
            line,
            column,
            end_line,
            end_column,
        }
    }

    /// A zero-width range at the start of a line.
    pub fn at_line(line: usize) -> Self {
        Self {
            line,
            column: 1,
            end_line: line,
            end_column: 1,
        }
    }
}

// ============================================================
// Suggestions
// ============================================================

/// Kind of fix suggestion attached to a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SuggestionKind {
    /// Replace hardcoded text with a translation call for a generated key.
    Externalize,
    /// Add the key to the named locale catalog.
    AddKey,
    /// Remove an unused key from the catalog.
    RemoveKey,
}

/// A machine-applicable fix hint. The core only suggests; applying is the
/// job of external collaborators (editor integration, CI bots).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replacement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<String>,
}

// ============================================================
// Finding
// ============================================================

/// One reported i18n defect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Content-derived identifier: stable for identical (file, position, rule)
    /// across repeated scans of unchanged input.
    pub id: String,
    pub rule_id: Rule,
    pub severity: Severity,
    pub message: String,
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub end_line: usize,
    pub end_column: usize,
    /// The offending source snippet (source line, or catalog value for
    /// catalog-side findings).
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<Suggestion>,
}

impl Finding {
    pub fn new(
        rule: Rule,
        severity: Severity,
        message: impl Into<String>,
        file: impl Into<String>,
        range: TextRange,
        source: impl Into<String>,
    ) -> Self {
        let file = file.into();
        let id = to_base36(stable_hash(&format!(
            "{}:{}:{}:{}",
            file, range.line, range.column, rule
        )));
        Self {
            id,
            rule_id: rule,
            severity,
            message: message.into(),
            file,
            line: range.line,
            column: range.column,
            end_line: range.end_line,
            end_column: range.end_column,
            source: source.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestion = Some(suggestion);
        self
    }
}

impl Ord for Finding {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Sort by: file, line, column, rule, message for stable output
        self.file
            .cmp(&other.file)
            .then_with(|| self.line.cmp(&other.line))
            .then_with(|| self.column.cmp(&other.column))
            .then_with(|| self.rule_id.cmp(&other.rule_id))
            .then_with(|| self.message.cmp(&other.message))
    }
}

impl PartialOrd for Finding {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Summary
// ============================================================

/// Per-category counters derived by tallying `Finding.rule_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    pub hard_coded: usize,
    pub missing: usize,
    pub unused: usize,
    pub icu_errors: usize,
    pub duplicates: usize,
    pub total_files: usize,
    #[serde(rename = "scanTime")]
    pub scan_time_ms: u64,
}

impl ScanSummary {
    pub fn tally(findings: &[Finding], total_files: usize, scan_time_ms: u64) -> Self {
        let mut summary = Self {
            total_files,
            scan_time_ms,
            ..Default::default()
        };
        for finding in findings {
            match finding.rule_id {
                Rule::HardcodedText => summary.hard_coded += 1,
                Rule::MissingKey => summary.missing += 1,
                Rule::UnusedKey => summary.unused += 1,
                Rule::IcuSyntax => summary.icu_errors += 1,
                Rule::DuplicateText => summary.duplicates += 1,
            }
        }
        summary
    }
}

// ============================================================
// Coverage
// ============================================================

/// Translation coverage for one locale, measured against the default
/// locale's key universe.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleCoverage {
    pub total_keys: usize,
    pub translated_keys: usize,
    pub missing_keys: Vec<String>,
    pub percentage: f64,
    pub budget_met: bool,
}

/// Coverage per locale plus an overall aggregate. Derived from the catalog
/// store, never independently mutated.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageReport {
    pub by_locale: BTreeMap<String, LocaleCoverage>,
    pub overall: LocaleCoverage,
}

// ============================================================
// Scan result
// ============================================================

/// The complete output of one scan invocation.
///
/// Always well-formed: `summary`, `findings` (possibly empty) and
/// `coverage` (possibly zeroed) are present even for degraded scans.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub summary: ScanSummary,
    pub findings: Vec<Finding>,
    pub coverage: CoverageReport,
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use crate::findings::*;

    fn finding_at(file: &str, line: usize, col: usize, rule: Rule) -> Finding {
        Finding::new(
            rule,
            Severity::Warning,
            "msg",
            file,
            TextRange::new(line, col, line, col + 5),
            "source line",
        )
    }

    #[test]
    fn test_finding_id_is_stable() {
        let a = finding_at("./src/app.tsx", 10, 5, Rule::HardcodedText);
        let b = finding_at("./src/app.tsx", 10, 5, Rule::HardcodedText);
        assert_eq!(a.id, b.id);
        assert_eq!(a, b);
    }

    #[test]
    fn test_finding_id_differs_by_position_and_rule() {
        let a = finding_at("./src/app.tsx", 10, 5, Rule::HardcodedText);
        let b = finding_at("./src/app.tsx", 11, 5, Rule::HardcodedText);
        let c = finding_at("./src/app.tsx", 10, 5, Rule::MissingKey);
        assert_ne!(a.id, b.id);
        assert_ne!(a.id, c.id);
    }

    #[test]
    fn test_finding_ordering() {
        let mut findings = vec![
            finding_at("./b.tsx", 1, 1, Rule::HardcodedText),
            finding_at("./a.tsx", 5, 1, Rule::MissingKey),
            finding_at("./a.tsx", 2, 4, Rule::HardcodedText),
            finding_at("./a.tsx", 2, 1, Rule::HardcodedText),
        ];
        findings.sort();
        assert_eq!(findings[0].file, "./a.tsx");
        assert_eq!((findings[0].line, findings[0].column), (2, 1));
        assert_eq!((findings[1].line, findings[1].column), (2, 4));
        assert_eq!(findings[2].line, 5);
        assert_eq!(findings[3].file, "./b.tsx");
    }

    #[test]
    fn test_summary_tally() {
        let findings = vec![
            finding_at("./a.tsx", 1, 1, Rule::HardcodedText),
            finding_at("./a.tsx", 2, 1, Rule::HardcodedText),
            finding_at("./a.tsx", 3, 1, Rule::MissingKey),
            finding_at("./a.tsx", 4, 1, Rule::UnusedKey),
            finding_at("./a.tsx", 5, 1, Rule::IcuSyntax),
        ];
        let summary = ScanSummary::tally(&findings, 3, 12);
        assert_eq!(summary.hard_coded, 2);
        assert_eq!(summary.missing, 1);
        assert_eq!(summary.unused, 1);
        assert_eq!(summary.icu_errors, 1);
        assert_eq!(summary.duplicates, 0);
        assert_eq!(summary.total_files, 3);
        assert_eq!(summary.scan_time_ms, 12);
    }

    #[test]
    fn test_rule_display() {
        assert_eq!(Rule::HardcodedText.to_string(), "hardcoded-text");
        assert_eq!(Rule::MissingKey.to_string(), "missing-key");
        assert_eq!(Rule::UnusedKey.to_string(), "unused-key");
        assert_eq!(Rule::IcuSyntax.to_string(), "icu-syntax");
        assert_eq!(Rule::DuplicateText.to_string(), "duplicate-text");
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(Severity::Warning.to_string(), "warning");
        assert_eq!(Severity::Info.to_string(), "info");
    }

    #[test]
    fn test_suggestion_serializes_kind_as_type() {
        let finding = finding_at("./a.tsx", 1, 1, Rule::HardcodedText).with_suggestion(
            Suggestion {
                kind: SuggestionKind::Externalize,
                description: "externalize".to_string(),
                key: Some("app.hello".to_string()),
                replacement: None,
                catalog_path: None,
            },
        );
        let json = serde_json::to_string(&finding).unwrap();
        assert!(json.contains(r#""type":"externalize""#));
        assert!(json.contains(r#""ruleId":"hardcoded-text""#));
        assert!(!json.contains("replacement"));
    }
}
