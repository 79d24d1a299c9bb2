//! Scan configuration.
//!
//! The config is consumed, not produced, by the core: discovery and loading
//! of a config file belong to the calling layer. This module defines the
//! immutable per-scan value, its serde shape, defaults, and validation.
//! Callers that need variations clone-and-patch before constructing a
//! scanner; the core never mutates a config.

use std::collections::HashMap;

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::keygen::KeyStrategy;

/// Source file extensions the scanner recognizes.
pub const SOURCE_EXTENSIONS: &[&str] = &["tsx", "ts", "jsx", "js"];

pub const TEST_FILE_PATTERNS: &[&str] = &[
    "**/*.test.tsx",
    "**/*.test.ts",
    "**/*.test.jsx",
    "**/*.test.js",
    "**/*.spec.tsx",
    "**/*.spec.ts",
    "**/*.spec.jsx",
    "**/*.spec.js",
    "**/__tests__/**",
];

/// Markup attributes whose string values carry user-facing text.
pub const CHECKED_ATTRIBUTES: &[&str] = &[
    "placeholder",
    "title",
    "alt",
    "label",
    "aria-label",
    "aria-description",
    "aria-placeholder",
    "aria-roledescription",
    "aria-valuetext",
];

/// Literals that are never translatable, compared case-insensitively
/// against trimmed text.
pub const IGNORED_TEXTS: &[&str] = &[
    "true",
    "false",
    "null",
    "undefined",
    "submit",
    "button",
    "checkbox",
    "radio",
    "password",
    "hidden",
    "ltr",
    "rtl",
];

/// Translation library selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LibrarySelector {
    Auto,
    I18next,
    Formatjs,
    Lingui,
}

impl std::fmt::Display for LibrarySelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LibrarySelector::Auto => write!(f, "auto"),
            LibrarySelector::I18next => write!(f, "i18next"),
            LibrarySelector::Formatjs => write!(f, "formatjs"),
            LibrarySelector::Lingui => write!(f, "lingui"),
        }
    }
}

/// Catalog location for namespaced hierarchical catalogs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct I18nextCatalogs {
    /// Path pattern with `{locale}` and optionally `{namespace}` tokens,
    /// e.g. `public/locales/{locale}/{namespace}.json`.
    #[serde(default = "default_i18next_path")]
    pub path: String,
    /// Namespace assumed for keys written without a `ns:` prefix.
    #[serde(default = "default_namespace")]
    pub default_namespace: String,
}

fn default_i18next_path() -> String {
    "public/locales/{locale}/{namespace}.json".to_string()
}

fn default_namespace() -> String {
    "translation".to_string()
}

impl Default for I18nextCatalogs {
    fn default() -> Self {
        Self {
            path: default_i18next_path(),
            default_namespace: default_namespace(),
        }
    }
}

/// Catalog location for flat per-locale message files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatjsCatalogs {
    /// Glob patterns with a `{locale}` token; used when non-empty.
    #[serde(default)]
    pub glob: Vec<String>,
    /// Single path pattern with a `{locale}` token.
    #[serde(default)]
    pub path: Option<String>,
}

/// Catalog location for compiled macro catalogs (flat JSON or line-based
/// `key = value` files, decided by extension).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinguiCatalogs {
    #[serde(default = "default_lingui_path")]
    pub path: String,
}

fn default_lingui_path() -> String {
    "locale/{locale}/messages.json".to_string()
}

impl Default for LinguiCatalogs {
    fn default() -> Self {
        Self {
            path: default_lingui_path(),
        }
    }
}

/// Per-variant catalog configuration blocks. The presence of a block is
/// what `auto` library detection probes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogsConfig {
    #[serde(default)]
    pub i18next: Option<I18nextCatalogs>,
    #[serde(default)]
    pub formatjs: Option<FormatjsCatalogs>,
    #[serde(default)]
    pub lingui: Option<LinguiCatalogs>,
}

/// Key-generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeygenConfig {
    /// When unset, the active adapter's preferred strategy is used.
    #[serde(default)]
    pub strategy: Option<KeyStrategy>,
    #[serde(default = "default_max_len")]
    pub max_len: usize,
}

fn default_max_len() -> usize {
    64
}

impl Default for KeygenConfig {
    fn default() -> Self {
        Self {
            strategy: None,
            max_len: default_max_len(),
        }
    }
}

/// Report settings, carried for external reporters; the core does not
/// read them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportConfig {
    #[serde(default = "default_report_formats")]
    pub formats: Vec<String>,
    #[serde(default = "default_report_output_dir")]
    pub output_dir: String,
}

fn default_report_formats() -> Vec<String> {
    vec!["console".to_string()]
}

fn default_report_output_dir() -> String {
    "./i18n-report".to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            formats: default_report_formats(),
            output_dir: default_report_output_dir(),
        }
    }
}

/// Per-locale quality budgets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetsConfig {
    /// Required coverage percentage per locale; locales without an entry
    /// always meet their budget.
    #[serde(default)]
    pub coverage: HashMap<String, f64>,
}

/// Baseline reference, carried for the external comparison layer; the core
/// does not read it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaselineConfig {
    pub path: String,
    #[serde(default = "default_baseline_mode")]
    pub mode: String,
}

fn default_baseline_mode() -> String {
    "new-only".to_string()
}

/// Immutable per-scan configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_library")]
    pub library: LibrarySelector,
    #[serde(default = "default_src")]
    pub src: Vec<String>,
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,
    #[serde(default = "default_locales")]
    pub locales: Vec<String>,
    #[serde(default = "default_locale")]
    pub default_locale: String,
    #[serde(default)]
    pub catalogs: CatalogsConfig,
    #[serde(default)]
    pub keygen: KeygenConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub budgets: BudgetsConfig,
    #[serde(default)]
    pub baseline: Option<BaselineConfig>,
    #[serde(default = "default_ignore_test_files")]
    pub ignore_test_files: bool,
}

fn default_library() -> LibrarySelector {
    LibrarySelector::Auto
}

fn default_src() -> Vec<String> {
    ["src", "app", "pages", "components"]
        .map(String::from)
        .to_vec()
}

fn default_ignore() -> Vec<String> {
    [
        "**/node_modules/**",
        "**/dist/**",
        "**/build/**",
        "**/.next/**",
    ]
    .map(String::from)
    .to_vec()
}

fn default_locales() -> Vec<String> {
    vec!["en".to_string()]
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_ignore_test_files() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            library: default_library(),
            src: default_src(),
            ignore: default_ignore(),
            locales: default_locales(),
            default_locale: default_locale(),
            catalogs: CatalogsConfig::default(),
            keygen: KeygenConfig::default(),
            report: ReportConfig::default(),
            budgets: BudgetsConfig::default(),
            baseline: None,
            ignore_test_files: default_ignore_test_files(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// These are the fatal configuration errors: they surface before any
    /// scanning begins.
    pub fn validate(&self) -> Result<()> {
        if self.locales.is_empty() {
            bail!("'locales' must contain at least one locale");
        }

        if !self.locales.contains(&self.default_locale) {
            bail!(
                "'defaultLocale' \"{}\" is not a member of 'locales' {:?}",
                self.default_locale,
                self.locales
            );
        }

        for pattern in &self.ignore {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignore': \"{}\"", pattern))?;
        }

        // Validate src patterns that contain glob wildcards (* or ?).
        // Patterns without wildcards are treated as literal paths, so
        // bracketed route segments like app/[locale] stay valid unescaped.
        for pattern in &self.src {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern)
                    .with_context(|| format!("Invalid glob pattern in 'src': \"{}\"", pattern))?;
            }
        }

        for (locale, budget) in &self.budgets.coverage {
            if !(0.0..=100.0).contains(budget) {
                bail!(
                    "coverage budget for locale \"{}\" must be between 0 and 100, got {}",
                    locale,
                    budget
                );
            }
        }

        Ok(())
    }
}
