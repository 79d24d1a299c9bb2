//! Adapter for flat message catalogs with ICU templates (formatjs /
//! react-intl conventions).
//!
//! Catalogs are single flat files per locale; keys are message ids. The
//! invocation idiom is `formatMessage({ id, defaultMessage })` (optionally
//! through an `intl` object) plus the `<FormattedMessage />` markup
//! component. Default messages are ICU templates and are validated.

use std::path::{Path, PathBuf};

use swc_common::SourceMap;
use swc_ecma_ast::{
    CallExpr, Expr, ImportDecl, JSXElement, Pat, TaggedTpl, VarDeclarator,
};

use crate::adapters::{
    Binding, BindingTable, LibraryAdapter, TranslationCall, call_ranges, callee_ident_name,
    callee_member_names, init_call, jsx_attr_object_keys, jsx_attr_string, jsx_element_name,
    object_pat_bindings, object_prop_names, object_prop_string, substitute_tokens,
};
use crate::catalog::{CatalogEntry, CatalogLoadResult, CatalogWarning, json::parse_json_file};
use crate::config::Config;
use crate::keygen::KeyStrategy;

const RECOGNIZED_FNS: &[&str] = &["formatMessage"];

const RECOGNIZED_RECEIVERS: &[&str] = &["intl"];

/// Hooks and factories that produce an intl object.
const INTL_HOOKS: &[&str] = &["useIntl", "createIntl"];

const COMPONENT_NAME: &str = "FormattedMessage";

#[derive(Debug, Clone, Copy, Default)]
pub struct FormatjsAdapter;

/// Catalog file paths for one locale, from the `glob` list when present,
/// otherwise the single `path` pattern.
fn locale_paths(config: &Config, root: &Path, locale: &str) -> (Vec<PathBuf>, Vec<CatalogWarning>) {
    let mut paths = Vec::new();
    let mut warnings = Vec::new();
    let Some(cfg) = &config.catalogs.formatjs else {
        warnings.push(CatalogWarning {
            file_path: String::new(),
            error: "formatjs catalogs block is missing".to_string(),
        });
        return (paths, warnings);
    };

    if !cfg.glob.is_empty() {
        for pattern in &cfg.glob {
            let full = root.join(substitute_tokens(pattern, locale, None));
            match glob::glob(&full.to_string_lossy()) {
                Ok(entries) => paths.extend(entries.flatten()),
                Err(e) => warnings.push(CatalogWarning {
                    file_path: full.to_string_lossy().to_string(),
                    error: e.to_string(),
                }),
            }
        }
    } else if let Some(pattern) = &cfg.path {
        paths.push(root.join(substitute_tokens(pattern, locale, None)));
    } else {
        warnings.push(CatalogWarning {
            file_path: String::new(),
            error: "formatjs catalogs block has neither 'glob' nor 'path'".to_string(),
        });
    }

    (paths, warnings)
}

impl LibraryAdapter for FormatjsAdapter {
    fn name(&self) -> &'static str {
        "formatjs"
    }

    fn detect(&self, config: &Config) -> bool {
        config.catalogs.formatjs.is_some()
    }

    fn load_catalogs(&self, config: &Config, root: &Path) -> CatalogLoadResult {
        let mut result = CatalogLoadResult::default();

        for locale in &config.locales {
            result.store.locale_mut(locale);
            let (paths, warnings) = locale_paths(config, root, locale);
            result.warnings.extend(warnings);

            // Later files overwrite earlier ones on key collision
            for path in paths {
                match parse_json_file(&path) {
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
        if !INTL_HOOKS.contains(&hook.as_str()) {
            return Vec::new();
        }

        match &decl.name {
            // const intl = useIntl()
            Pat::Ident(ident) => vec![(ident.id.sym.to_string(), Binding::IntlObject)],
            // const { formatMessage } = useIntl()
            pat => object_pat_bindings(pat)
                .into_iter()
                .filter_map(|(prop, local)| {
                    (prop == "formatMessage")
                        .then_some((local, Binding::TranslateFn { namespace: None }))
                })
                .collect(),
        }
    }

    fn import_binding(&self, _import: &ImportDecl) -> Vec<(String, Binding)> {
        Vec::new()
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
                let (obj, prop) = callee_member_names(call)?;
                let receiver_ok = matches!(bindings.get(&obj), Some(Binding::IntlObject))
                    || (bindings.get(&obj).is_none()
                        && RECOGNIZED_RECEIVERS.contains(&obj.as_str()));
                if !receiver_ok || prop != "formatMessage" {
                    return None;
                }
            }
        }

        // Descriptor object: { id, defaultMessage }
        let first = call.args.first()?;
        let Expr::Object(descriptor) = &*first.expr else {
            return None;
        };
        let (key, key_span) = object_prop_string(descriptor, "id")?;
        let default_text = object_prop_string(descriptor, "defaultMessage").map(|(v, _)| v);

        // Interpolation values: formatMessage(descriptor, { count, name })
        let mut variables = Vec::new();
        if let Some(arg) = call.args.get(1)
            && let Expr::Object(values) = &*arg.expr
        {
            variables = object_prop_names(values);
        }

        let is_template = default_text.is_some();
        let (key_range, call_range) = call_ranges(source_map, key_span, call.span);
        Some(TranslationCall {
            key,
            namespace: None,
            default_text,
            variables,
            is_template,
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
        _config: &Config,
        source_map: &SourceMap,
    ) -> Option<TranslationCall> {
        if jsx_element_name(element).as_deref() != Some(COMPONENT_NAME) {
            return None;
        }
        let (key, key_span) = jsx_attr_string(element, "id")?;
        let default_text = jsx_attr_string(element, "defaultMessage").map(|(v, _)| v);
        let variables = jsx_attr_object_keys(element, "values");

        let is_template = default_text.is_some();
        let (key_range, call_range) = call_ranges(source_map, key_span, element.span);
        Some(TranslationCall {
            key,
            namespace: None,
            default_text,
            variables,
            is_template,
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
        let cfg = config.catalogs.formatjs.as_ref()?;
        let pattern = cfg.path.as_ref().or_else(|| cfg.glob.first())?;
        Some(substitute_tokens(pattern, locale, None))
    }

    fn default_strategy(&self) -> KeyStrategy {
        KeyStrategy::Hash
    }

    fn hash_prefix(&self) -> &'static str {
        "msg_"
    }
}
