//! Hardcoded text detection rule.
//!
//! Fires on markup text content and on a fixed allowlist of markup
//! attributes. Skips text shorter than 3 characters, text without any
//! alphabetic character, and a small denylist of non-translatable
//! literals.

use anyhow::Result;

use crate::config::{CHECKED_ATTRIBUTES, IGNORED_TEXTS};
use crate::findings::{Finding, Rule, Severity, Suggestion, SuggestionKind};
use crate::rules::{RuleCheck, RuleContext, RuleNode};
use crate::utils::contains_alphabetic;

const MIN_TEXT_LEN: usize = 3;

pub struct HardcodedTextRule;

/// True when the text is worth reporting: long enough, contains letters,
/// and is not a known non-translatable literal.
fn is_translatable(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.chars().count() < MIN_TEXT_LEN {
        return false;
    }
    if !contains_alphabetic(trimmed) {
        return false;
    }
    let lowered = trimmed.to_lowercase();
    !IGNORED_TEXTS.contains(&lowered.as_str())
}

impl HardcodedTextRule {
    fn report_text(
        &self,
        text: &str,
        range: crate::findings::TextRange,
        ctx: &mut RuleContext<'_>,
    ) {
        let trimmed = text.trim();
        let key = ctx.adapter.generate_key(trimmed, ctx.file_path, ctx.config);
        let finding = Finding::new(
            Rule::HardcodedText,
            Severity::Warning,
            format!("hardcoded text \"{}\" should use a translation call", trimmed),
            ctx.file_path,
            range,
            ctx.line_content(range.line),
        )
        .with_suggestion(Suggestion {
            kind: SuggestionKind::Externalize,
            description: format!("externalize as translation key \"{}\"", key),
            key: Some(key),
            replacement: None,
            catalog_path: None,
        });
        ctx.report(finding);
    }
}

impl RuleCheck for HardcodedTextRule {
    fn rule(&self) -> Rule {
        Rule::HardcodedText
    }

    fn check(&self, node: &RuleNode<'_>, ctx: &mut RuleContext<'_>) -> Result<()> {
        match node {
            RuleNode::JsxText { text, range } => {
                if is_translatable(text) {
                    self.report_text(text, *range, ctx);
                }
            }
            RuleNode::JsxAttribute { name, value, range } => {
                if CHECKED_ATTRIBUTES.contains(name) && is_translatable(value) {
                    self.report_text(value, *range, ctx);
                }
            }
            RuleNode::MessageTemplate { .. } => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::adapters::Adapter;
    use crate::config::{Config, LibrarySelector};
    use crate::findings::TextRange;
    use crate::rules::*;

    fn check(node: &RuleNode<'_>) -> Vec<crate::findings::Finding> {
        let config = Config {
            library: LibrarySelector::I18next,
            ..Config::default()
        };
        let adapter = Adapter::resolve(&config).unwrap();
        let mut ctx = RuleContext::new(
            "./src/app.tsx",
            "<p>Hello there</p>",
            &config,
            &adapter,
            false,
        );
        HardcodedTextRule.check(node, &mut ctx).unwrap();
        ctx.into_findings()
    }

    #[test]
    fn test_reports_jsx_text() {
        let findings = check(&RuleNode::JsxText {
            text: "Hello there",
            range: TextRange::new(1, 4, 1, 15),
        });
        assert_eq!(findings.len(), 1);
        let finding = &findings[0];
        assert_eq!(finding.severity, crate::findings::Severity::Warning);
        assert!(finding.message.contains("Hello there"));
        let suggestion = finding.suggestion.as_ref().unwrap();
        assert_eq!(
            suggestion.kind,
            crate::findings::SuggestionKind::Externalize
        );
        assert!(suggestion.key.is_some());
    }

    #[test]
    fn test_skips_short_text() {
        assert!(
            check(&RuleNode::JsxText {
                text: "Hi",
                range: TextRange::at_line(1),
            })
            .is_empty()
        );
    }

    #[test]
    fn test_skips_whitespace_and_punctuation() {
        assert!(
            check(&RuleNode::JsxText {
                text: "   ",
                range: TextRange::at_line(1),
            })
            .is_empty()
        );
        assert!(
            check(&RuleNode::JsxText {
                text: "12345",
                range: TextRange::at_line(1),
            })
            .is_empty()
        );
        assert!(
            check(&RuleNode::JsxText {
                text: "---!!!",
                range: TextRange::at_line(1),
            })
            .is_empty()
        );
    }

    #[test]
    fn test_skips_denylisted_literals() {
        for text in ["true", "False", "null", "undefined", "submit"] {
            assert!(
                check(&RuleNode::JsxText {
                    text,
                    range: TextRange::at_line(1),
                })
                .is_empty(),
                "{:?} should be skipped",
                text
            );
        }
    }

    #[test]
    fn test_checks_allowlisted_attributes_only() {
        let reported = check(&RuleNode::JsxAttribute {
            name: "placeholder",
            value: "Enter your name",
            range: TextRange::at_line(1),
        });
        assert_eq!(reported.len(), 1);

        let skipped = check(&RuleNode::JsxAttribute {
            name: "className",
            value: "Enter your name",
            range: TextRange::at_line(1),
        });
        assert!(skipped.is_empty());
    }

    #[test]
    fn test_aria_attributes_are_checked() {
        let findings = check(&RuleNode::JsxAttribute {
            name: "aria-label",
            value: "Close dialog",
            range: TextRange::at_line(1),
        });
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn test_ignores_message_templates() {
        use crate::adapters::TranslationCall;
        let call = TranslationCall {
            key: "x".to_string(),
            namespace: None,
            default_text: Some("Hello".to_string()),
            variables: vec![],
            is_template: true,
            key_span: TextRange::at_line(1),
            call_span: TextRange::at_line(1),
        };
        assert!(check(&RuleNode::MessageTemplate { call: &call }).is_empty());
    }
}
