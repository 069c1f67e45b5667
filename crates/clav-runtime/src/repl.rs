//! REPL core logic (UI-agnostic)

use crate::diagnostic::Diagnostic;
use crate::interpreter::Interpreter;
use crate::lexer::scan;
use crate::runtime::run_source;
use crate::token::TokenKind;
use crate::value::Value;
use std::io::Write;

/// File name reported in REPL diagnostics
const REPL_FILE: &str = "<repl>";

/// Outcome of one REPL line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplResult {
    /// Diagnostics from whichever phase failed (empty on success)
    pub diagnostics: Vec<Diagnostic>,
    /// Number of statements executed
    pub statements: usize,
}

impl ReplResult {
    /// True when the line ran without any diagnostic
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// REPL core state
///
/// Maintains persistent state across multiple eval calls:
/// - Variable declarations persist
/// - Errors do not reset state
pub struct ReplCore {
    interpreter: Interpreter,
}

impl ReplCore {
    /// Create a REPL core printing to standard output
    pub fn new() -> Self {
        Self {
            interpreter: Interpreter::new(),
        }
    }

    /// Create a REPL core printing to `output`
    pub fn with_output(output: Box<dyn Write>) -> Self {
        Self {
            interpreter: Interpreter::with_output(output),
        }
    }

    /// Evaluate a line of input
    ///
    /// A line whose last token is not `;` gets one inserted after that
    /// token, so `print 1` and `a = 2 // note` work at the prompt.
    pub fn eval_line(&mut self, input: &str) -> ReplResult {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return ReplResult::default();
        }

        let source = terminate(trimmed);

        match run_source(&mut self.interpreter, &source, REPL_FILE) {
            Ok(statements) => ReplResult {
                diagnostics: Vec::new(),
                statements,
            },
            Err(diagnostics) => ReplResult {
                diagnostics,
                statements: 0,
            },
        }
    }

    /// Reset REPL state
    ///
    /// Clears all variables; the output sink is kept.
    pub fn reset(&mut self) {
        self.interpreter.reset();
    }

    /// Global variables, sorted by name
    pub fn variables(&self) -> Vec<(String, Value)> {
        self.interpreter.environment().globals()
    }
}

/// Insert `;` after the last real token unless it already is one.
///
/// Trailing comments stay after the inserted `;`.
fn terminate(line: &str) -> String {
    let (tokens, _) = scan(line);
    let last = tokens.iter().rev().find(|t| t.kind != TokenKind::Eof);

    match last {
        Some(token) if token.kind != TokenKind::Semicolon => {
            let mut chars = line.chars();
            let head: String = chars.by_ref().take(token.span.end).collect();
            let tail: String = chars.collect();
            format!("{};{}", head, tail)
        }
        _ => line.to_string(),
    }
}

impl Default for ReplCore {
    fn default() -> Self {
        Self::new()
    }
}
