pub mod ast;
pub mod repl;
pub mod run;
pub mod tokens;

use crate::config::Config;
use anyhow::{Context, Result};
use clav_runtime::diagnostic::formatter::DiagnosticFormatter;
use clav_runtime::Diagnostic;
use std::fs;
use std::io::{self, Write};

/// Read a source file for the dump commands
pub fn read_source(file_path: &str) -> Result<String> {
    fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read source file: {}", file_path))
}

/// Write diagnostics to stderr, one compact JSON object per line or
/// rendered for humans
pub fn report(diagnostics: &[Diagnostic], json: bool, config: &Config) -> Result<()> {
    if json {
        let mut stderr = io::stderr().lock();
        for diag in diagnostics {
            writeln!(stderr, "{}", diag.to_json_compact()?)?;
        }
    } else {
        DiagnosticFormatter::new(config.color_mode())
            .emit_all(diagnostics)
            .context("Failed to write diagnostics")?;
    }
    Ok(())
}
