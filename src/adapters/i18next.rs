//! Adapter for namespaced hierarchical catalogs (i18next conventions).
//!
//! Catalogs are partitioned into named namespaces, one JSON tree per
//! namespace per locale; flattened keys are `namespace:dot.path`. The
//! invocation idiom is a call with a string first argument optionally
//! prefixed with `namespace:`, plus a `<Trans i18nKey="...">` markup
//! component.

use std::path::Path;

use swc_common::SourceMap;
use swc_ecma_ast::{CallExpr, Expr, ImportDecl, ImportSpecifier, JSXElement, Pat, TaggedTpl, VarDeclarator};

use crate::adapters::{
    Binding, BindingTable, LibraryAdapter, TranslationCall, call_ranges, callee_ident_name,
    callee_member_names, first_string_arg, init_call, jsx_attr_object_keys, jsx_attr_string,
    jsx_element_name, object_pat_bindings, object_prop_names, object_prop_string,
    substitute_tokens,
};
use crate::catalog::{CatalogEntry, CatalogLoadResult, CatalogWarning, json::parse_json_file};
use crate::config::Config;
use crate::keygen::KeyStrategy;

/// Bare function names recognized as translation calls even without an
/// explicit hook binding.
const RECOGNIZED_FNS: &[&str] = &["t", "translate"];

/// Receiver objects whose `.t(...)` method translates.
const RECOGNIZED_RECEIVERS: &[&str] = &["i18n", "i18next"];

/// Hooks that bind translation functions. `useTranslation` carries the
/// namespace as its first argument.
const TRANSLATION_HOOKS: &[&str] = &["useTranslation", "getFixedT"];

const COMPONENT_NAME: &str = "Trans";

#[derive(Debug, Clone, Copy, Default)]
pub struct I18nextAdapter;

fn default_namespace(config: &Config) -> String {
    config
        .catalogs
        .i18next
        .as_ref()
        .map(|c| c.default_namespace.clone())
        .unwrap_or_else(|| "translation".to_string())
}

fn catalog_pattern(config: &Config) -> String {
    config
        .catalogs
        .i18next
        .as_ref()
        .map(|c| c.path.clone())
        .unwrap_or_else(|| "public/locales/{locale}/{namespace}.json".to_string())
}

/// Split a raw key literal into (namespace, key), resolving the namespace
/// from the literal prefix, the binding, or the configured default in
/// that order.
fn split_key(raw: &str, binding_ns: Option<String>, config: &Config) -> (String, String) {
    match raw.split_once(':') {
        Some((ns, key)) => (ns.to_string(), key.to_string()),
        None => (
            binding_ns.unwrap_or_else(|| default_namespace(config)),
            raw.to_string(),
        ),
    }
}

/// Namespace argument of a recognized hook call: first string argument for
/// `useTranslation`, second for `getFixedT(lng, ns)`.
fn hook_namespace(hook: &str, call: &CallExpr) -> Option<String> {
    let index = if hook == "getFixedT" { 1 } else { 0 };
    call.args.get(index).and_then(|arg| {
        crate::adapters::string_literal(&arg.expr).map(|(value, _)| value)
    })
}

impl LibraryAdapter for I18nextAdapter {
    fn name(&self) -> &'static str {
        "i18next"
    }

    fn detect(&self, config: &Config) -> bool {
        config.catalogs.i18next.is_some()
    }

    fn load_catalogs(&self, config: &Config, root: &Path) -> CatalogLoadResult {
        let mut result = CatalogLoadResult::default();
        let pattern = catalog_pattern(config);
        let default_ns = default_namespace(config);

        for locale in &config.locales {
            // A failed locale still gets an (empty) catalog so cross-checks
            // see it as configured
            result.store.locale_mut(locale);

            if pattern.contains("{namespace}") {
                let glob_pattern = substitute_tokens(&pattern, locale, Some("*"));
                let full_pattern = root.join(&glob_pattern);
                let entries = match glob::glob(&full_pattern.to_string_lossy()) {
                    Ok(entries) => entries,
                    Err(e) => {
                        result.warnings.push(CatalogWarning {
                            file_path: full_pattern.to_string_lossy().to_string(),
                            error: e.to_string(),
                        });
                        continue;
                    }
                };
                for path in entries.flatten() {
                    let Some(namespace) =
                        path.file_stem().and_then(|s| s.to_str()).map(String::from)
                    else {
                        continue;
                    };
                    match parse_json_file(&path) {
                        Ok(flat) => {
                            let file_path = path.to_string_lossy().to_string();
                            let catalog = result.store.locale_mut(locale);
                            for entry in flat {
                                catalog.insert(
                                    format!("{}:{}", namespace, entry.key),
                                    CatalogEntry {
                                        value: entry.value,
                                        file_path: file_path.clone(),
                                        line: entry.line,
                                    },
                                );
                            }
                        }
                        Err(e) => {
                            // This namespace contributes nothing; never a
                            // partial mix
                            result.warnings.push(CatalogWarning {
                                file_path: path.to_string_lossy().to_string(),
                                error: e.to_string(),
                            });
                        }
                    }
                }
            } else {
                let path = root.join(substitute_tokens(&pattern, locale, None));
                match parse_json_file(&path) {
                    Ok(flat) => {
                        let file_path = path.to_string_lossy().to_string();
                        let catalog = result.store.locale_mut(locale);
                        for entry in flat {
                            catalog.insert(
                                format!("{}:{}", default_ns, entry.key),
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
        if !TRANSLATION_HOOKS.contains(&hook.as_str()) {
            return Vec::new();
        }
        let namespace = hook_namespace(&hook, call);

        match &decl.name {
            // const t = useTranslation("ns")
            Pat::Ident(ident) => vec![(
                ident.id.sym.to_string(),
                Binding::TranslateFn { namespace },
            )],
            // const { t, i18n } = useTranslation("ns")
            pat => object_pat_bindings(pat)
                .into_iter()
                .filter_map(|(prop, local)| match prop.as_str() {
                    "t" => Some((local, Binding::TranslateFn {
                        namespace: namespace.clone(),
                    })),
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
        if source != "i18next" {
            return Vec::new();
        }
        import
            .specifiers
            .iter()
            .filter_map(|spec| match spec {
                // import i18n from "i18next"
                ImportSpecifier::Default(default) => {
                    Some((default.local.sym.to_string(), Binding::IntlObject))
                }
                _ => None,
            })
            .collect()
    }

    fn extract_call(
        &self,
        call: &CallExpr,
        bindings: &BindingTable,
        config: &Config,
        source_map: &SourceMap,
    ) -> Option<TranslationCall> {
        let binding_ns = match callee_ident_name(call) {
            Some(name) => match bindings.get(&name) {
                Some(Binding::TranslateFn { namespace }) => namespace.clone(),
                Some(_) => return None,
                None if RECOGNIZED_FNS.contains(&name.as_str()) => None,
                None => return None,
            },
            None => {
                // i18n.t("key") receiver form
                let (obj, prop) = callee_member_names(call)?;
                let receiver_ok = matches!(bindings.get(&obj), Some(Binding::IntlObject))
                    || (bindings.get(&obj).is_none()
                        && RECOGNIZED_RECEIVERS.contains(&obj.as_str()));
                if !receiver_ok || prop != "t" {
                    return None;
                }
                None
            }
        };

        let (raw_key, key_span) = first_string_arg(call)?;
        let (namespace, key) = split_key(&raw_key, binding_ns, config);

        let mut default_text = None;
        let mut variables = Vec::new();
        if let Some(arg) = call.args.get(1)
            && let Expr::Object(obj) = &*arg.expr
        {
            default_text = object_prop_string(obj, "defaultValue").map(|(value, _)| value);
            variables = object_prop_names(obj)
                .into_iter()
                .filter(|name| name != "defaultValue")
                .collect();
        }

        let (key_range, call_range) = call_ranges(source_map, key_span, call.span);
        Some(TranslationCall {
            key,
            namespace: Some(namespace),
            default_text,
            variables,
            is_template: false,
            key_span: key_range,
            call_span: call_range,
        })
    }

    fn extract_tagged_template(
        &self,
        _tagged: &TaggedTpl,
        _bindings: &BindingTable,
        _source_map: &SourceMap,
    ) -> Option<TranslationCall> {
        None
    }

    fn extract_component(
        &self,
        element: &JSXElement,
        config: &Config,
        source_map: &SourceMap,
    ) -> Option<TranslationCall> {
        if jsx_element_name(element).as_deref() != Some(COMPONENT_NAME) {
            return None;
        }
        let (raw_key, key_span) = jsx_attr_string(element, "i18nKey")?;
        let ns_attr = jsx_attr_string(element, "ns").map(|(value, _)| value);
        let (namespace, key) = split_key(&raw_key, ns_attr, config);
        let default_text = jsx_attr_string(element, "defaults").map(|(value, _)| value);
        let variables = jsx_attr_object_keys(element, "values");

        let (key_range, call_range) = call_ranges(source_map, key_span, element.span);
        Some(TranslationCall {
            key,
            namespace: Some(namespace),
            default_text,
            variables,
            is_template: false,
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
        namespace: Option<&str>,
    ) -> Option<String> {
        let default_ns = default_namespace(config);
        let ns = namespace.unwrap_or(&default_ns);
        Some(substitute_tokens(&catalog_pattern(config), locale, Some(ns)))
    }

    fn default_strategy(&self) -> KeyStrategy {
        KeyStrategy::Namespace
    }

    fn hash_prefix(&self) -> &'static str {
        "key_"
    }
}
