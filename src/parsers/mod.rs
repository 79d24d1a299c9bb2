//! Syntax parser adapter.
//!
//! Wraps the external swc parser and exposes span-to-position helpers.
//! Parse failures are non-fatal to a scan: the scanner logs and skips the
//! file rather than aborting the run.

pub mod jsx;

pub use jsx::{ParsedSource, parse_source};

use swc_common::{SourceMap, Span};

use crate::findings::TextRange;

/// Resolve an AST span to a 1-based line/column range.
pub fn span_range(source_map: &SourceMap, span: Span) -> TextRange {
    let lo = source_map.lookup_char_pos(span.lo);
    let hi = source_map.lookup_char_pos(span.hi);
    TextRange {
        line: lo.line,
        column: lo.col_display + 1,
        end_line: hi.line,
        end_column: hi.col_display + 1,
    }
}
