//! Per-file traversal.
//!
//! Depth-first pre-order walk over one parsed file. At each node the
//! active adapter gets a chance to extract a translation call (which is
//! cross-checked against every configured locale and recorded in the
//! usage set), and every rule runs.

use swc_common::{BytePos, SourceMap};
use swc_ecma_ast::{
    CallExpr, ImportDecl, JSXAttr, JSXAttrName, JSXAttrValue, JSXElement, JSXFragment, JSXText,
    Module, Pat, TaggedTpl, VarDecl,
};
use swc_ecma_visit::{Visit, VisitWith};

use crate::adapters::{Adapter, Binding, BindingTable, LibraryAdapter, TranslationCall};
use crate::catalog::CatalogStore;
use crate::config::Config;
use crate::findings::{Finding, Rule, Severity, Suggestion, SuggestionKind, TextRange};
use crate::parsers::{ParsedSource, span_range};
use crate::rules::{RuleCheck, RuleContext, RuleNode, run_rules};

/// Everything one file's traversal produced.
pub(crate) struct FileScan {
    pub findings: Vec<Finding>,
    /// Flattened keys of every extracted translation call, found or not.
    pub used_keys: Vec<String>,
}

pub(crate) struct FileVisitor<'a> {
    file_path: &'a str,
    source_map: &'a SourceMap,
    config: &'a Config,
    adapter: &'a Adapter,
    catalogs: &'a CatalogStore,
    rules: &'a [Box<dyn RuleCheck + Send + Sync>],
    bindings: BindingTable,
    /// Inside a translation component's children; text there is being
    /// translated, not hardcoded.
    in_translation_component: bool,
    rule_ctx: RuleContext<'a>,
    used_keys: Vec<String>,
}

impl<'a> FileVisitor<'a> {
    pub(crate) fn new(
        file_path: &'a str,
        parsed: &'a ParsedSource,
        config: &'a Config,
        adapter: &'a Adapter,
        catalogs: &'a CatalogStore,
        rules: &'a [Box<dyn RuleCheck + Send + Sync>],
        verbose: bool,
    ) -> Self {
        Self {
            file_path,
            source_map: parsed.source_map.as_ref(),
            config,
            adapter,
            catalogs,
            rules,
            bindings: BindingTable::new(),
            in_translation_component: false,
            rule_ctx: RuleContext::new(file_path, &parsed.source, config, adapter, verbose),
            used_keys: Vec::new(),
        }
    }

    pub(crate) fn analyze(mut self, module: &Module) -> FileScan {
        module.visit_with(&mut self);
        FileScan {
            findings: self.rule_ctx.into_findings(),
            used_keys: self.used_keys,
        }
    }

    /// Record a recognized translation call: add it to the usage set
    /// unconditionally, cross-check every configured locale, then hand it
    /// to the per-node rules.
    fn process_call(&mut self, call: TranslationCall) {
        let flattened = call.flattened_key();
        self.used_keys.push(flattened.clone());

        // An entirely empty store means catalog loading was skipped or
        // degraded; scanning proceeds without cross-checking
        if !self.catalogs.is_empty() {
            for locale in &self.config.locales {
                let present = self
                    .catalogs
                    .locale(locale)
                    .is_some_and(|catalog| catalog.contains_key(&flattened));
                if present {
                    continue;
                }
                let catalog_path =
                    self.adapter
                        .catalog_path(self.config, locale, call.namespace.as_deref());
                let finding = Finding::new(
                    Rule::MissingKey,
                    Severity::Error,
                    format!("key \"{}\" is missing from locale \"{}\"", flattened, locale),
                    self.file_path,
                    call.key_span,
                    self.rule_ctx.line_content(call.key_span.line),
                )
                .with_suggestion(Suggestion {
                    kind: SuggestionKind::AddKey,
                    description: format!("add \"{}\" to the \"{}\" catalog", flattened, locale),
                    key: Some(flattened.clone()),
                    replacement: None,
                    catalog_path,
                });
                self.rule_ctx.report(finding);
            }
        }

        run_rules(
            self.rules,
            &RuleNode::MessageTemplate { call: &call },
            &mut self.rule_ctx,
        );
    }
}

impl<'a> Visit for FileVisitor<'a> {
    fn visit_import_decl(&mut self, node: &ImportDecl) {
        for (name, binding) in self.adapter.import_binding(node) {
            self.bindings.insert(name, binding);
        }
        node.visit_children_with(self);
    }

    fn visit_var_decl(&mut self, node: &VarDecl) {
        for decl in &node.decls {
            let hook_bindings = self.adapter.hook_binding(decl);
            if hook_bindings.is_empty() {
                // A plain local declaration shadows any recognized name
                if let Pat::Ident(ident) = &decl.name {
                    self.bindings
                        .insert(ident.id.sym.to_string(), Binding::Shadowed);
                }
            } else {
                for (name, binding) in hook_bindings {
                    self.bindings.insert(name, binding);
                }
            }
        }
        node.visit_children_with(self);
    }

    fn visit_function(&mut self, node: &swc_ecma_ast::Function) {
        self.bindings.enter_scope();
        node.visit_children_with(self);
        self.bindings.exit_scope();
    }

    fn visit_arrow_expr(&mut self, node: &swc_ecma_ast::ArrowExpr) {
        self.bindings.enter_scope();
        node.visit_children_with(self);
        self.bindings.exit_scope();
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        if let Some(call) =
            self.adapter
                .extract_call(node, &self.bindings, self.config, self.source_map)
        {
            self.process_call(call);
        }
        node.visit_children_with(self);
    }

    fn visit_tagged_tpl(&mut self, node: &TaggedTpl) {
        if let Some(call) =
            self.adapter
                .extract_tagged_template(node, &self.bindings, self.source_map)
        {
            self.process_call(call);
        }
        node.visit_children_with(self);
    }

    fn visit_jsx_element(&mut self, node: &JSXElement) {
        if let Some(call) = self
            .adapter
            .extract_component(node, self.config, self.source_map)
        {
            self.process_call(call);
        }

        // Attributes keep the current suppression state
        node.opening.visit_with(self);

        let name = crate::adapters::jsx_element_name(node);

        // <style> children are CSS, never user-facing text
        if name.as_deref() == Some("style") {
            if let Some(closing) = &node.closing {
                closing.visit_with(self);
            }
            return;
        }

        let suppress = name
            .as_deref()
            .is_some_and(|n| self.adapter.is_translation_component(n));

        let prev = self.in_translation_component;
        self.in_translation_component = prev || suppress;
        for child in &node.children {
            child.visit_with(self);
        }
        self.in_translation_component = prev;

        if let Some(closing) = &node.closing {
            closing.visit_with(self);
        }
    }

    fn visit_jsx_fragment(&mut self, node: &JSXFragment) {
        node.opening.visit_with(self);
        for child in &node.children {
            child.visit_with(self);
        }
        node.closing.visit_with(self);
    }

    fn visit_jsx_text(&mut self, node: &JSXText) {
        if self.in_translation_component {
            return;
        }
        let raw_value = &node.value;
        let trimmed = raw_value.trim();
        if trimmed.is_empty() {
            return;
        }

        // Report the position of the text itself, not the surrounding
        // whitespace the parser includes in the node span
        let trim_start_offset = raw_value.len() - raw_value.trim_start().len();
        let start = node.span.lo + BytePos(trim_start_offset as u32);
        let end = start + BytePos(trimmed.len() as u32);
        let lo = self.source_map.lookup_char_pos(start);
        let hi = self.source_map.lookup_char_pos(end);
        let range = TextRange {
            line: lo.line,
            column: lo.col_display + 1,
            end_line: hi.line,
            end_column: hi.col_display + 1,
        };

        run_rules(
            self.rules,
            &RuleNode::JsxText {
                text: trimmed,
                range,
            },
            &mut self.rule_ctx,
        );
    }

    fn visit_jsx_attr(&mut self, node: &JSXAttr) {
        let attr_name = match &node.name {
            JSXAttrName::Ident(ident) => ident.sym.to_string(),
            JSXAttrName::JSXNamespacedName(ns) => format!("{}-{}", ns.ns.sym, ns.name.sym),
        };

        if let Some(JSXAttrValue::Str(s)) = &node.value
            && let Some(value) = s.value.as_str()
        {
            let range = span_range(self.source_map, s.span);
            run_rules(
                self.rules,
                &RuleNode::JsxAttribute {
                    name: &attr_name,
                    value,
                    range,
                },
                &mut self.rule_ctx,
            );
        }

        node.visit_children_with(self);
    }
}
