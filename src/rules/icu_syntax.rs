//! ICU message syntax rule.
//!
//! Fires on inline message templates recognized by the active adapter
//! (formatjs `defaultMessage`, lingui literals) and emits one finding per
//! validator error.

use anyhow::Result;

use crate::findings::{Finding, Rule, Severity};
use crate::icu;
use crate::rules::{RuleCheck, RuleContext, RuleNode};

pub struct IcuSyntaxRule;

impl RuleCheck for IcuSyntaxRule {
    fn rule(&self) -> Rule {
        Rule::IcuSyntax
    }

    fn check(&self, node: &RuleNode<'_>, ctx: &mut RuleContext<'_>) -> Result<()> {
        let RuleNode::MessageTemplate { call } = node else {
            return Ok(());
        };
        if !call.is_template {
            return Ok(());
        }
        let Some(message) = &call.default_text else {
            return Ok(());
        };

        for error in icu::validate(message) {
            ctx.report(Finding::new(
                Rule::IcuSyntax,
                Severity::Error,
                format!("invalid ICU message for \"{}\": {}", call.flattened_key(), error),
                ctx.file_path,
                call.call_span,
                ctx.line_content(call.call_span.line),
            ));
        }
        Ok(())
    }
}
