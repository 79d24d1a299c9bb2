//! ICU-style message template validation.
//!
//! Validates a minimal plural/select grammar: `{variable, type, cases...}`
//! expressions, possibly nested inside case bodies. This is a lightweight
//! structural check, not a full ICU MessageFormat parse; deeply nested or
//! escaped-brace messages are out of reach by design.

/// Recognized ICU argument types.
pub const ICU_TYPES: &[&str] = &["plural", "select", "selectordinal", "number", "date", "time"];

/// Recognized plural case tokens.
pub const PLURAL_CASE_TOKENS: &[&str] =
    &["zero", "one", "two", "few", "many", "other", "=0", "=1"];

/// What went wrong in one ICU expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IcuErrorKind {
    /// `{, plural, ...}`: no variable name before the first comma.
    EmptyVariable,
    /// The type segment is not one of [`ICU_TYPES`].
    UnknownType { type_name: String },
    /// A plural/selectordinal body without the mandatory `other` case.
    MissingOtherCase { variable: String },
    /// A plural/selectordinal body with no recognized case token at all.
    MissingCaseTokens { variable: String },
    /// An opening brace with no matching closing brace.
    UnclosedBrace,
}

/// One syntax error in a message template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcuError {
    pub kind: IcuErrorKind,
    /// Byte offset of the offending opening brace within the message.
    pub offset: usize,
}

impl std::fmt::Display for IcuError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            IcuErrorKind::EmptyVariable => {
                write!(f, "empty variable name in ICU expression")
            }
            IcuErrorKind::UnknownType { type_name } => {
                write!(f, "unknown ICU type '{}'", type_name)
            }
            IcuErrorKind::MissingOtherCase { variable } => {
                write!(
                    f,
                    "plural expression for '{}' is missing the 'other' case",
                    variable
                )
            }
            IcuErrorKind::MissingCaseTokens { variable } => {
                write!(
                    f,
                    "plural expression for '{}' has no recognized plural case",
                    variable
                )
            }
            IcuErrorKind::UnclosedBrace => write!(f, "unclosed '{{' in message"),
        }
    }
}

/// Validate a message template, returning every syntax error found.
///
/// Scans for top-level `{...}` spans with full brace matching (nested
/// braces inside case bodies are counted, not treated as terminators),
/// then checks the variable/type head and, for plural types, the case
/// body requirements.
pub fn validate(message: &str) -> Vec<IcuError> {
    let mut errors = Vec::new();
    let bytes = message.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'{' {
            i += 1;
            continue;
        }
        match find_matching_brace(message, i) {
            Some(close) => {
                let inner = &message[i + 1..close];
                check_expression(inner, i, &mut errors);
                i = close + 1;
            }
            None => {
                errors.push(IcuError {
                    kind: IcuErrorKind::UnclosedBrace,
                    offset: i,
                });
                break;
            }
        }
    }

    errors
}

/// Find the index of the brace closing the one at `open`, counting nested
/// `{`/`}` pairs.
fn find_matching_brace(message: &str, open: usize) -> Option<usize> {
    let bytes = message.as_bytes();
    debug_assert_eq!(bytes[open], b'{');
    let mut depth = 0usize;
    for (idx, &b) in bytes.iter().enumerate().skip(open) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

fn check_expression(inner: &str, offset: usize, errors: &mut Vec<IcuError>) {
    let mut parts = inner.splitn(3, ',');
    let variable = parts.next().unwrap_or("").trim().to_string();
    let type_segment = parts.next().map(|s| s.trim().to_string());
    let body = parts.next().unwrap_or("");

    if variable.is_empty() {
        errors.push(IcuError {
            kind: IcuErrorKind::EmptyVariable,
            offset,
        });
    }

    let Some(type_name) = type_segment else {
        // A bare interpolation like `{name}` is always fine.
        return;
    };

    if !ICU_TYPES.contains(&type_name.as_str()) {
        errors.push(IcuError {
            kind: IcuErrorKind::UnknownType { type_name },
            offset,
        });
        return;
    }

    if type_name == "plural" || type_name == "selectordinal" {
        if !body.contains("other") {
            errors.push(IcuError {
                kind: IcuErrorKind::MissingOtherCase {
                    variable: variable.clone(),
                },
                offset,
            });
        }
        if !PLURAL_CASE_TOKENS.iter().any(|token| body.contains(token)) {
            errors.push(IcuError {
                kind: IcuErrorKind::MissingCaseTokens { variable },
                offset,
            });
        }
    }
}
