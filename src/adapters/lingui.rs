//! Adapter for macro/template invocation with structured-text catalogs
//! (lingui conventions).
//!
//! The literal argument *is* the catalog key: ``t`Save changes` `` or
//! `t("Save changes")`, plus a `<Trans>` component wrapping translatable
//! text directly. Catalogs are flat JSON or a line-oriented `key = value`
//! format, decided by file extension.

use std::path::Path;

use swc_common::SourceMap;
use swc_ecma_ast::{
    CallExpr, Expr, ImportDecl, ImportSpecifier, JSXElement, JSXElementChild, ModuleExportName,
    Pat, TaggedTpl, VarDeclarator,
};

use crate::adapters::{
    Binding, BindingTable, LibraryAdapter, TranslationCall, call_ranges, callee_ident_name,
    callee_member_names, first_string_arg, init_call, jsx_attr_string, jsx_element_name,
    object_pat_bindings,
};
use crate::catalog::{
    CatalogEntry, CatalogLoadResult, CatalogWarning, json::parse_json_file,
    properties::parse_properties_file,
};
use crate::config::Config;
use crate::keygen::KeyStrategy;

const RECOGNIZED_FNS: &[&str] = &["t"];

/// Module sources whose `t` / `Trans` exports are the macro entry points.
const MACRO_SOURCES: &[&str] = &["@lingui/macro", "@lingui/core/macro", "@lingui/react/macro"];

const HOOKS: &[&str] = &["useLingui"];

const COMPONENT_NAME: &str = "Trans";

#[derive(Debug, Clone, Copy, Default)]
pub struct LinguiAdapter;

fn catalog_pattern(config: &Config) -> String {
    config
        .catalogs
        .lingui
        .as_ref()
        .map(|c| c.path.clone())
        .unwrap_or_else(|| "locale/{locale}/messages.json".to_string())
}

/// Render a template literal as a message, turning identifier expressions
/// into `{name}` placeholders. Non-identifier expressions make the key
/// dynamic and unresolvable.
fn template_message(tagged: &TaggedTpl) -> Option<(String, Vec<String>)> {
    let tpl = &tagged.tpl;
    let mut message = String::new();
    let mut variables = Vec::new();

    for (i, quasi) in tpl.quasis.iter().enumerate() {
        if let Some(cooked) = &quasi.cooked
            && let Some(text) = cooked.as_str()
        {
            message.push_str(text);
        }
        if i < tpl.exprs.len() {
            match &*tpl.exprs[i] {
                Expr::Ident(ident) => {
                    let name = ident.sym.to_string();
                    message.push('{');
                    message.push_str(&name);
                    message.push('}');
                    variables.push(name);
                }
                _ => return None,
            }
        }
    }

    Some((message, variables))
}

/// Concatenated text children of a `<Trans>` element, whitespace-collapsed.
fn element_text(element: &JSXElement) -> String {
    let mut parts = Vec::new();
    for child in &element.children {
        if let JSXElementChild::JSXText(text) = child {
            let trimmed = text.value.trim();
            if !trimmed.is_empty() {
                parts.push(trimmed.to_string());
            }
        }
    }
    parts.join(" ")
}

impl LibraryAdapter for LinguiAdapter {
    fn name(&self) -> &'static str {
        "lingui"
    }

    fn detect(&self, config: &Config) -> bool {
        config.catalogs.lingui.is_some()
    }

    fn load_catalogs(&self, config: &Config, root: &Path) -> CatalogLoadResult {
        let mut result = CatalogLoadResult::default();
        let pattern = catalog_pattern(config);

        for locale in &config.locales {
            result.store.locale_mut(locale);
            let path = root.join(crate::adapters::substitute_tokens(&pattern, locale, None));
            let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");

            let parsed = if is_json {
                parse_json_file(&path)
            } else {
                parse_properties_file(&path)
            };

            match parsed {
                Ok(flat) => {
                    let file_path = path.to_string_lossy().to_string();
                    let catalog = result.store.locale_mut(locale);
                    for entry in flat {
                        catalog.insert(
                            entry.key,
                            CatalogEntry {
                                value: entry.value,
                                file_path: file_path.clone(),
                                line: entry.line,
                            },
                        );
                    }
                }
                Err(e) => {
                    result.warnings.push(CatalogWarning {
                        file_path: path.to_string_lossy().to_string(),
                        error: e.to_string(),
                    });
                }
            }
        }

        result
    }

    fn hook_binding(&self, decl: &VarDeclarator) -> Vec<(String, Binding)> {
        let Some(call) = init_call(decl) else {
            return Vec::new();
        };
        let Some(hook) = callee_ident_name(call) else {
            return Vec::new();
        };
        if !HOOKS.contains(&hook.as_str()) {
            return Vec::new();
        }

        match &decl.name {
            Pat::Ident(ident) => vec![(ident.id.sym.to_string(), Binding::IntlObject)],
            // const { t, i18n } = useLingui()
            pat => object_pat_bindings(pat)
                .into_iter()
                .filter_map(|(prop, local)| match prop.as_str() {
                    "t" => Some((local, Binding::TranslateFn { namespace: None })),
                    "i18n" => Some((local, Binding::IntlObject)),
                    _ => None,
                })
                .collect(),
        }
    }

    fn import_binding(&self, import: &ImportDecl) -> Vec<(String, Binding)> {
        let Some(source) = import.src.value.as_str() else {
            return Vec::new();
        };
        if !MACRO_SOURCES.contains(&source) {
            return Vec::new();
        }
        import
            .specifiers
            .iter()
            .filter_map(|spec| match spec {
                // import { t } from "@lingui/macro"
                ImportSpecifier::Named(named) => {
                    let imported = match &named.imported {
                        Some(ModuleExportName::Ident(ident)) => ident.sym.to_string(),
                        Some(ModuleExportName::Str(s)) => s.value.as_str()?.to_string(),
                        None => named.local.sym.to_string(),
                    };
                    (imported == "t").then(|| {
                        (
                            named.local.sym.to_string(),
                            Binding::TranslateFn { namespace: None },
                        )
                    })
                }
                _ => None,
            })
            .collect()
    }

    fn extract_call(
        &self,
        call: &CallExpr,
        bindings: &BindingTable,
        _config: &Config,
        source_map: &SourceMap,
    ) -> Option<TranslationCall> {
        match callee_ident_name(call) {
            Some(name) => match bindings.get(&name) {
                Some(Binding::TranslateFn { .. }) => {}
                Some(_) => return None,
                None if RECOGNIZED_FNS.contains(&name.as_str()) => {}
                None => return None,
            },
            None => {
                // i18n._("key") core form
                let (obj, prop) = callee_member_names(call)?;
                let receiver_ok = matches!(bindings.get(&obj), Some(Binding::IntlObject))
                    || (bindings.get(&obj).is_none() && obj == "i18n");
                if !receiver_ok || prop != "_" {
                    return None;
                }
            }
        }

        let (text, key_span) = first_string_arg(call)?;
        let (key_range, call_range) = call_ranges(source_map, key_span, call.span);
        Some(TranslationCall {
            key: text.clone(),
            namespace: None,
            default_text: Some(text),
            variables: Vec::new(),
            is_template: true,
            key_span: key_range,
            call_span: call_range,
        })
    }

    fn extract_tagged_template(
        &self,
        tagged: &TaggedTpl,
        bindings: &BindingTable,
        source_map: &SourceMap,
    ) -> Option<TranslationCall> {
        let Expr::Ident(tag) = &*tagged.tag else {
            return None;
        };
        let name = tag.sym.to_string();
        match bindings.get(&name) {
            Some(Binding::TranslateFn { .. }) => {}
            Some(_) => return None,
            None if RECOGNIZED_FNS.contains(&name.as_str()) => {}
            None => return None,
        }

        let (message, variables) = template_message(tagged)?;
        if message.trim().is_empty() {
            return None;
        }

        let (key_range, call_range) = call_ranges(source_map, tagged.tpl.span, tagged.span);
        Some(TranslationCall {
            key: message.clone(),
            namespace: None,
            default_text: Some(message),
            variables,
            is_template: true,
            key_span: key_range,
            call_span: call_range,
        })
    }

    fn extract_component(
        &self,
        element: &JSXElement,
        _config: &Config,
        source_map: &SourceMap,
    ) -> Option<TranslationCall> {
        if jsx_element_name(element).as_deref() != Some(COMPONENT_NAME) {
            return None;
        }

        let text = element_text(element);
        let id_attr = jsx_attr_string(element, "id");

        let (key, key_span) = match &id_attr {
            // <Trans id="explicit.key">Fallback text</Trans>
            Some((id, span)) => (id.clone(), *span),
            // <Trans>The text is the key</Trans>
            None => {
                if text.is_empty() {
                    return None;
                }
                (text.clone(), element.span)
            }
        };

        let default_text = if text.is_empty() { key.clone() } else { text };

        let (key_range, call_range) = call_ranges(source_map, key_span, element.span);
        Some(TranslationCall {
            key,
            namespace: None,
            default_text: Some(default_text),
            variables: Vec::new(),
            is_template: true,
            key_span: key_range,
            call_span: call_range,
        })
    }

    fn is_translation_component(&self, name: &str) -> bool {
        name == COMPONENT_NAME
    }

    fn catalog_path(
        &self,
        config: &Config,
        locale: &str,
        _namespace: Option<&str>,
    ) -> Option<String> {
        Some(crate::adapters::substitute_tokens(
            &catalog_pattern(config),
            locale,
            None,
        ))
    }

    fn default_strategy(&self) -> KeyStrategy {
        KeyStrategy::Hash
    }

    fn hash_prefix(&self) -> &'static str {
        "msg_"
    }
}
