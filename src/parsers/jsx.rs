use std::sync::Arc;

use anyhow::{Result, anyhow};
use swc_common::{FileName, Globals, SourceMap};
use swc_ecma_ast::Module;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

/// A parsed source file: the syntax tree plus the source map needed to
/// resolve spans back to line/column positions.
///
/// Owned by one file's traversal and dropped when it completes; no
/// cross-file references are retained.
pub struct ParsedSource {
    pub module: Module,
    pub source_map: Arc<SourceMap>,
    pub source: String,
}

/// Parse JSX/TSX source code into an AST.
///
/// Accepts a shared SourceMap so parallel per-file parsing stays
/// thread-safe; each file gets its own map in practice.
pub fn parse_source(code: String, file_path: &str, source_map: Arc<SourceMap>) -> Result<ParsedSource> {
    use swc_common::GLOBALS;

    // Wrap in GLOBALS.set() for thread safety
    GLOBALS.set(&Globals::new(), || {
        let source_file =
            source_map.new_source_file(FileName::Real(file_path.into()).into(), code.clone());

        let syntax = Syntax::Typescript(TsSyntax {
            tsx: true,
            ..Default::default()
        });

        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), None);

        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("Failed to parse source: {:?}", e))?;

        Ok(ParsedSource {
            module,
            source_map,
            source: code,
        })
    })
}
