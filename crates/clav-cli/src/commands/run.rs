//! Run command - execute Clav source files

use crate::config::Config;
use anyhow::{bail, Result};
use clav_runtime::Clav;

/// Run a Clav source file
///
/// Program output goes to stdout and diagnostics to stderr. Returns an
/// error (and so a non-zero exit status) when anything was reported.
pub fn run(file_path: &str, json: bool, config: &Config) -> Result<()> {
    let runtime = Clav::new();

    match runtime.run_file(file_path) {
        Ok(()) => Ok(()),
        Err(diagnostics) => {
            tracing::debug!(count = diagnostics.len(), "program failed");
            super::report(&diagnostics, json, config)?;
            bail!(
                "{} reported {} error{}",
                file_path,
                diagnostics.len(),
                if diagnostics.len() == 1 { "" } else { "s" }
            )
        }
    }
}
