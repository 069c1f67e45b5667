//! Token dump command - show what the scanner produced

use crate::config::Config;
use anyhow::{bail, Result};
use clav_runtime::{scan, Diagnostic, Token};

/// Dump the token stream of a source file
///
/// Tokens are printed even when the scanner reported errors, so the dump
/// shows where recovery resumed.
pub fn run(file_path: &str, json: bool, config: &Config) -> Result<()> {
    let source = super::read_source(file_path)?;
    let (tokens, errors) = scan(&source);

    println!("{}", render(&tokens, json)?);

    if !errors.is_empty() {
        let diagnostics: Vec<Diagnostic> = errors
            .iter()
            .map(|e| e.to_diagnostic(&source).with_file(file_path))
            .collect();
        super::report(&diagnostics, json, config)?;
        bail!("Scan errors");
    }

    Ok(())
}

/// One `line kind lexeme [literal]` row per token, or a JSON array
fn render(tokens: &[Token], json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(tokens)?);
    }

    let rows: Vec<String> = tokens
        .iter()
        .map(|token| format!("{:>4} {}", token.line, token))
        .collect();
    Ok(rows.join("\n"))
}
