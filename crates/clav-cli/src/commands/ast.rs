//! AST dump command - output the syntax tree

use crate::config::Config;
use anyhow::{bail, Result};
use clav_runtime::ast::printer::stmt_to_sexpr;
use clav_runtime::ast::VersionedProgram;
use clav_runtime::{scan, Diagnostic, Parser};

/// Dump the syntax tree of a source file
///
/// Prints one S-expression per statement, or the versioned program as
/// JSON. Nothing is printed when scanning or parsing fails.
pub fn run(file_path: &str, json: bool, config: &Config) -> Result<()> {
    let source = super::read_source(file_path)?;

    let (tokens, scan_errors) = scan(&source);
    if !scan_errors.is_empty() {
        let diagnostics: Vec<Diagnostic> = scan_errors
            .iter()
            .map(|e| e.to_diagnostic(&source).with_file(file_path))
            .collect();
        super::report(&diagnostics, json, config)?;
        bail!("Scan errors");
    }

    let mut parser = Parser::new(tokens);
    let (statements, parse_errors) = parser.parse();
    if !parse_errors.is_empty() {
        let diagnostics: Vec<Diagnostic> = parse_errors
            .iter()
            .map(|e| e.to_diagnostic(&source).with_file(file_path))
            .collect();
        super::report(&diagnostics, json, config)?;
        bail!("Parse errors");
    }

    if json {
        println!("{}", VersionedProgram::new(statements).to_json()?);
    } else {
        for stmt in &statements {
            println!("{}", stmt_to_sexpr(stmt));
        }
    }

    Ok(())
}
