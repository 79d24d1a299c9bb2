//! Library adapters.
//!
//! Each adapter teaches the engine one translation-library convention:
//! how to detect it from config, how to load and flatten its catalogs,
//! and how to recognize its invocation idioms in the syntax tree.
//!
//! The set of conventions is fixed and known, so the adapters form a
//! closed sum type rather than an open plugin registry.

pub mod formatjs;
pub mod i18next;
pub mod lingui;

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Result, bail};
use enum_dispatch::enum_dispatch;
use swc_common::{SourceMap, Span};
use swc_ecma_ast::{
    Callee, CallExpr, Expr, ImportDecl, JSXAttr, JSXAttrName, JSXAttrOrSpread, JSXAttrValue,
    JSXElement, JSXElementName, JSXExpr, Lit, ObjectLit, ObjectPatProp, Pat, Prop, PropName,
    PropOrSpread, TaggedTpl, VarDeclarator,
};

pub use formatjs::FormatjsAdapter;
pub use i18next::I18nextAdapter;
pub use lingui::LinguiAdapter;

use crate::catalog::CatalogLoadResult;
use crate::config::{Config, LibrarySelector};
use crate::findings::TextRange;
use crate::keygen::{self, KeyStrategy};
use crate::parsers::span_range;

// ============================================================
// Translation calls
// ============================================================

/// A recognized translation invocation, extracted from one syntax node.
/// Ephemeral: produced and consumed within a single traversal step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationCall {
    /// Key name without namespace.
    pub key: String,
    pub namespace: Option<String>,
    /// Inline default text, when the idiom carries one.
    pub default_text: Option<String>,
    /// Interpolation variable names, when statically visible.
    pub variables: Vec<String>,
    /// The default text is an ICU message template subject to validation.
    pub is_template: bool,
    /// Span of exactly the key literal, for fine-grained highlighting.
    pub key_span: TextRange,
    /// Span of the whole invocation.
    pub call_span: TextRange,
}

impl TranslationCall {
    /// The single string uniquely identifying the catalog entry:
    /// `namespace:key` for namespaced conventions, the literal key
    /// otherwise.
    pub fn flattened_key(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{}:{}", ns, self.key),
            None => self.key.clone(),
        }
    }
}

// ============================================================
// Bindings
// ============================================================

/// How a local name relates to the active translation library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// A translation function, optionally carrying a bound namespace
    /// (e.g. `const t = useTranslation("common")`).
    TranslateFn { namespace: Option<String> },
    /// An intl-like object whose methods translate (`intl.formatMessage`).
    IntlObject,
    /// A local declaration shadowing a recognized name; calls through it
    /// are not translation calls.
    Shadowed,
}

/// Lexically scoped translation-function bindings for one file.
///
/// The traversal engine pushes a scope per function body so inner
/// declarations shadow outer ones.
#[derive(Debug, Default)]
pub struct BindingTable {
    scopes: Vec<HashMap<String, Binding>>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self {
            scopes: vec![HashMap::new()],
        }
    }

    pub fn enter_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    pub fn exit_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, binding: Binding) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.into(), binding);
        }
    }

    /// Innermost binding for a name, if any.
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }
}

// ============================================================
// Adapter contract
// ============================================================

/// The capability set every library adapter provides.
#[enum_dispatch]
pub trait LibraryAdapter {
    fn name(&self) -> &'static str;

    /// True if this variant's catalog configuration block is present.
    fn detect(&self, config: &Config) -> bool;

    /// Load and flatten every configured locale's catalogs. Failures
    /// degrade to empty sub-maps plus warnings, never partial mixes.
    fn load_catalogs(&self, config: &Config, root: &Path) -> CatalogLoadResult;

    /// Recognize a declaration that binds a translation helper
    /// (`const t = useTranslation("ns")`). May bind several names for
    /// destructuring patterns.
    fn hook_binding(&self, decl: &VarDeclarator) -> Vec<(String, Binding)>;

    /// Recognize an import that binds a translation helper
    /// (`import { t } from "@lingui/macro"`).
    fn import_binding(&self, import: &ImportDecl) -> Vec<(String, Binding)>;

    /// Recognize this variant's call idiom.
    fn extract_call(
        &self,
        call: &CallExpr,
        bindings: &BindingTable,
        config: &Config,
        source_map: &SourceMap,
    ) -> Option<TranslationCall>;

    /// Recognize this variant's tagged-template idiom, if it has one.
    fn extract_tagged_template(
        &self,
        tagged: &TaggedTpl,
        bindings: &BindingTable,
        source_map: &SourceMap,
    ) -> Option<TranslationCall>;

    /// Recognize this variant's markup-component idiom.
    fn extract_component(
        &self,
        element: &JSXElement,
        config: &Config,
        source_map: &SourceMap,
    ) -> Option<TranslationCall>;

    /// Element names whose children are translated content; the
    /// hardcoded-text rule does not fire inside them.
    fn is_translation_component(&self, name: &str) -> bool;

    /// Catalog file a key for (locale, namespace) would live in, derived
    /// from the configured path pattern.
    fn catalog_path(&self, config: &Config, locale: &str, namespace: Option<&str>)
    -> Option<String>;

    /// Key-generation strategy used when the config leaves it unset.
    fn default_strategy(&self) -> KeyStrategy;

    /// Prefix for hash-derived keys.
    fn hash_prefix(&self) -> &'static str;
}

/// The closed set of library adapters.
#[enum_dispatch(LibraryAdapter)]
#[derive(Debug, Clone, Copy)]
pub enum Adapter {
    I18next(I18nextAdapter),
    Formatjs(FormatjsAdapter),
    Lingui(LinguiAdapter),
}

impl Adapter {
    /// Resolve the active adapter from config: an explicit selector wins;
    /// `auto` probes `detect` in declaration order, first match wins.
    pub fn resolve(config: &Config) -> Result<Adapter> {
        match config.library {
            LibrarySelector::I18next => Ok(I18nextAdapter.into()),
            LibrarySelector::Formatjs => Ok(FormatjsAdapter.into()),
            LibrarySelector::Lingui => Ok(LinguiAdapter.into()),
            LibrarySelector::Auto => {
                let candidates: [Adapter; 3] = [
                    I18nextAdapter.into(),
                    FormatjsAdapter.into(),
                    LinguiAdapter.into(),
                ];
                for adapter in candidates {
                    if adapter.detect(config) {
                        return Ok(adapter);
                    }
                }
                bail!(
                    "Unable to detect a translation library: set 'library' explicitly \
                     or add a 'catalogs' block"
                )
            }
        }
    }

    /// Generate a candidate key for text being externalized, using the
    /// configured strategy or this adapter's preferred default.
    pub fn generate_key(&self, text: &str, file_path: &str, config: &Config) -> String {
        let strategy = config
            .keygen
            .strategy
            .unwrap_or_else(|| self.default_strategy());
        keygen::generate_key(
            text,
            file_path,
            strategy,
            config.keygen.max_len,
            self.hash_prefix(),
        )
    }
}

// ============================================================
// Shared AST helpers
// ============================================================

/// Extract a static string from a string literal or expression-free
/// template literal, with its span.
pub(crate) fn string_literal(expr: &Expr) -> Option<(String, Span)> {
    match expr {
        Expr::Lit(Lit::Str(s)) => s.value.as_str().map(|v| (v.to_string(), s.span)),
        Expr::Tpl(tpl) if tpl.exprs.is_empty() => tpl
            .quasis
            .first()
            .and_then(|q| q.cooked.as_ref())
            .and_then(|cooked| cooked.as_str().map(|v| (v.to_string(), tpl.span))),
        Expr::Paren(paren) => string_literal(&paren.expr),
        _ => None,
    }
}

/// String value of a named property in an object literal, with its span.
pub(crate) fn object_prop_string(obj: &ObjectLit, name: &str) -> Option<(String, Span)> {
    for prop in &obj.props {
        if let PropOrSpread::Prop(prop) = prop
            && let Prop::KeyValue(kv) = &**prop
            && prop_name(&kv.key).as_deref() == Some(name)
        {
            return string_literal(&kv.value);
        }
    }
    None
}

/// All statically visible property names of an object literal.
pub(crate) fn object_prop_names(obj: &ObjectLit) -> Vec<String> {
    obj.props
        .iter()
        .filter_map(|prop| match prop {
            PropOrSpread::Prop(prop) => match &**prop {
                Prop::KeyValue(kv) => prop_name(&kv.key),
                Prop::Shorthand(ident) => Some(ident.sym.to_string()),
                _ => None,
            },
            PropOrSpread::Spread(_) => None,
        })
        .collect()
}

pub(crate) fn prop_name(key: &PropName) -> Option<String> {
    match key {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        PropName::Str(s) => s.value.as_str().map(|v| v.to_string()),
        _ => None,
    }
}

/// Name of a JSX element, for plain identifiers only.
pub(crate) fn jsx_element_name(element: &JSXElement) -> Option<String> {
    match &element.opening.name {
        JSXElementName::Ident(ident) => Some(ident.sym.to_string()),
        _ => None,
    }
}

fn find_attr<'a>(element: &'a JSXElement, name: &str) -> Option<&'a JSXAttr> {
    element.opening.attrs.iter().find_map(|attr| match attr {
        JSXAttrOrSpread::JSXAttr(attr) => {
            let attr_name = match &attr.name {
                JSXAttrName::Ident(ident) => ident.sym.to_string(),
                JSXAttrName::JSXNamespacedName(ns) => format!("{}-{}", ns.ns.sym, ns.name.sym),
            };
            (attr_name == name).then_some(attr)
        }
        JSXAttrOrSpread::SpreadElement(_) => None,
    })
}

/// Static string value of a named JSX attribute, with the value's span.
pub(crate) fn jsx_attr_string(element: &JSXElement, name: &str) -> Option<(String, Span)> {
    let attr = find_attr(element, name)?;
    match attr.value.as_ref()? {
        JSXAttrValue::Str(s) => s.value.as_str().map(|v| (v.to_string(), s.span)),
        JSXAttrValue::JSXExprContainer(container) => match &container.expr {
            JSXExpr::Expr(expr) => string_literal(expr),
            _ => None,
        },
        _ => None,
    }
}

/// Property names of an object-literal JSX attribute value, for idioms
/// like `values={{ count, name }}`.
pub(crate) fn jsx_attr_object_keys(element: &JSXElement, name: &str) -> Vec<String> {
    let Some(attr) = find_attr(element, name) else {
        return Vec::new();
    };
    if let Some(JSXAttrValue::JSXExprContainer(container)) = &attr.value
        && let JSXExpr::Expr(expr) = &container.expr
        && let Expr::Object(obj) = &**expr
    {
        return object_prop_names(obj);
    }
    Vec::new()
}

/// Unwrap a declarator initializer to a call expression, looking through
/// `await` for server-side hook variants.
pub(crate) fn init_call(decl: &VarDeclarator) -> Option<&CallExpr> {
    match decl.init.as_deref()? {
        Expr::Call(call) => Some(call),
        Expr::Await(await_expr) => match &*await_expr.arg {
            Expr::Call(call) => Some(call),
            _ => None,
        },
        _ => None,
    }
}

/// Plain identifier name of a call's callee, if it has one.
pub(crate) fn callee_ident_name(call: &CallExpr) -> Option<String> {
    if let Callee::Expr(expr) = &call.callee
        && let Expr::Ident(ident) = &**expr
    {
        Some(ident.sym.to_string())
    } else {
        None
    }
}

/// Member callee as (object name, property name), e.g. `intl.formatMessage`.
pub(crate) fn callee_member_names(call: &CallExpr) -> Option<(String, String)> {
    if let Callee::Expr(expr) = &call.callee
        && let Expr::Member(member) = &**expr
        && let Expr::Ident(obj) = &*member.obj
        && let swc_ecma_ast::MemberProp::Ident(prop) = &member.prop
    {
        Some((obj.sym.to_string(), prop.sym.to_string()))
    } else {
        None
    }
}

/// First argument as a static string, with its span.
pub(crate) fn first_string_arg(call: &CallExpr) -> Option<(String, Span)> {
    call.args.first().and_then(|arg| string_literal(&arg.expr))
}

/// Names bound by a destructuring pattern, as (property, local) pairs:
/// `{ t }` → ("t", "t"); `{ t: translate }` → ("t", "translate").
pub(crate) fn object_pat_bindings(pat: &Pat) -> Vec<(String, String)> {
    let Pat::Object(obj_pat) = pat else {
        return Vec::new();
    };
    let mut bindings = Vec::new();
    for prop in &obj_pat.props {
        match prop {
            ObjectPatProp::Assign(assign) => {
                let name = assign.key.sym.to_string();
                bindings.push((name.clone(), name));
            }
            ObjectPatProp::KeyValue(kv) => {
                if let Some(prop_name) = prop_name(&kv.key)
                    && let Pat::Ident(ident) = &*kv.value
                {
                    bindings.push((prop_name, ident.id.sym.to_string()));
                }
            }
            ObjectPatProp::Rest(_) => {}
        }
    }
    bindings
}

/// Substitute `{locale}` and `{namespace}` tokens in a catalog path
/// pattern.
pub(crate) fn substitute_tokens(pattern: &str, locale: &str, namespace: Option<&str>) -> String {
    let mut path = pattern.replace("{locale}", locale);
    if let Some(ns) = namespace {
        path = path.replace("{namespace}", ns);
    }
    path
}

/// Resolve a translation-call range pair from the key literal span and the
/// whole invocation span.
pub(crate) fn call_ranges(
    source_map: &SourceMap,
    key_span: Span,
    call_span: Span,
) -> (TextRange, TextRange) {
    (span_range(source_map, key_span), span_range(source_map, call_span))
}
