//! Per-node rule engine.
//!
//! Each rule is an independent checker invoked once per visited node; a
//! rule may report zero or more findings. A failing rule is caught per
//! rule per node so it cannot suppress other rules or abort the file.
//!
//! Missing-key and unused-key detection are not rules: they need
//! whole-scan state (the usage set and the catalog store) and live in the
//! scanner.

pub mod hardcoded;
pub mod icu_syntax;

use anyhow::Result;
use colored::Colorize;

pub use hardcoded::HardcodedTextRule;
pub use icu_syntax::IcuSyntaxRule;

use crate::adapters::{Adapter, TranslationCall};
use crate::config::Config;
use crate::findings::{Finding, Rule, TextRange};

/// A node view passed to rules during traversal.
#[derive(Debug)]
pub enum RuleNode<'a> {
    /// Markup text content: `<p>Hello</p>`.
    JsxText { text: &'a str, range: TextRange },
    /// String value of a markup attribute: `placeholder="..."`.
    JsxAttribute {
        name: &'a str,
        value: &'a str,
        range: TextRange,
    },
    /// An inline message template recognized by the active adapter.
    MessageTemplate { call: &'a TranslationCall },
}

/// Per-file context handed to rules: configuration, the active adapter,
/// the file's source lines, and the finding sink.
pub struct RuleContext<'a> {
    pub file_path: &'a str,
    pub config: &'a Config,
    pub adapter: &'a Adapter,
    pub verbose: bool,
    lines: Vec<&'a str>,
    findings: Vec<Finding>,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        file_path: &'a str,
        source: &'a str,
        config: &'a Config,
        adapter: &'a Adapter,
        verbose: bool,
    ) -> Self {
        Self {
            file_path,
            config,
            adapter,
            verbose,
            lines: source.lines().collect(),
            findings: Vec::new(),
        }
    }

    /// The content of a 1-based source line, for finding snippets.
    pub fn line_content(&self, line: usize) -> String {
        self.lines
            .get(line.saturating_sub(1))
            .map(|l| l.trim().to_string())
            .unwrap_or_default()
    }

    pub fn report(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }
}

/// One rule: a pure check over a node view.
pub trait RuleCheck {
    fn rule(&self) -> Rule;

    fn check(&self, node: &RuleNode<'_>, ctx: &mut RuleContext<'_>) -> Result<()>;
}

/// The built-in per-node rules, in evaluation order.
pub fn builtin_rules() -> Vec<Box<dyn RuleCheck + Send + Sync>> {
    vec![Box::new(HardcodedTextRule), Box::new(IcuSyntaxRule)]
}

/// Run every rule against one node. A rule failure is logged and the
/// remaining rules still run.
pub fn run_rules(
    rules: &[Box<dyn RuleCheck + Send + Sync>],
    node: &RuleNode<'_>,
    ctx: &mut RuleContext<'_>,
) {
    for rule in rules {
        if let Err(e) = rule.check(node, ctx) {
            if ctx.verbose {
                eprintln!(
                    "{} rule {} failed in {}: {}",
                    "warning:".bold().yellow(),
                    rule.rule(),
                    ctx.file_path,
                    e
                );
            }
        }
    }
}
