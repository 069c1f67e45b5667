//! Clav runtime API for embedding

use crate::diagnostic::{error_codes, Diagnostic, UNKNOWN_FILE};
use crate::interpreter::Interpreter;
use crate::lexer::Lexer;
use crate::parser::Parser;
use std::cell::RefCell;
use std::io::Write;
use std::path::Path;

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, Vec<Diagnostic>>;

/// Clav runtime instance
///
/// Provides a high-level API for embedding Clav in host applications.
/// Bindings persist across `run` calls on the same instance.
///
/// # Examples
///
/// ```
/// use clav_runtime::Clav;
///
/// let runtime = Clav::with_output(Box::new(std::io::sink()));
/// runtime.run("var a = 1;").unwrap();
/// runtime.run("print a + 2;").unwrap();
/// ```
pub struct Clav {
    /// Interpreter for executing code (using interior mutability)
    interpreter: RefCell<Interpreter>,
}

impl Clav {
    /// Create a runtime that prints to standard output
    pub fn new() -> Self {
        Self {
            interpreter: RefCell::new(Interpreter::new()),
        }
    }

    /// Create a runtime that prints to `output`
    pub fn with_output(output: Box<dyn Write>) -> Self {
        Self {
            interpreter: RefCell::new(Interpreter::with_output(output)),
        }
    }

    /// Run Clav source code
    ///
    /// Scan errors are returned as a batch before parsing is attempted, and
    /// parse errors as a batch before anything is evaluated. A runtime error
    /// stops the remaining statements and is returned alone.
    ///
    /// # Examples
    ///
    /// ```
    /// use clav_runtime::Clav;
    ///
    /// let runtime = Clav::with_output(Box::new(std::io::sink()));
    /// let diagnostics = runtime.run("print 1 +;").unwrap_err();
    /// assert_eq!(diagnostics[0].code, "CL1000");
    /// ```
    pub fn run(&self, source: &str) -> RuntimeResult<()> {
        self.run_named(source, UNKNOWN_FILE)
    }

    /// Run Clav source code, labelling diagnostics with `file`
    pub fn run_named(&self, source: &str, file: &str) -> RuntimeResult<()> {
        let mut interpreter = self.interpreter.borrow_mut();
        run_source(&mut interpreter, source, file).map(|_| ())
    }

    /// Run a Clav source file
    ///
    /// A file that cannot be read produces a single diagnostic.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use clav_runtime::Clav;
    ///
    /// let runtime = Clav::new();
    /// let result = runtime.run_file("program.clav");
    /// ```
    pub fn run_file(&self, path: impl AsRef<Path>) -> RuntimeResult<()> {
        let path = path.as_ref();
        let file = path.display().to_string();

        let source = std::fs::read_to_string(path).map_err(|e| {
            vec![Diagnostic::error(
                error_codes::READ_FAILURE,
                format!("Failed to read file: {}", e),
            )
            .with_file(file.clone())
            .with_default_help()]
        })?;

        self.run_named(&source, &file)
    }
}

impl Default for Clav {
    fn default() -> Self {
        Self::new()
    }
}

/// Scan, parse and interpret one unit of input.
///
/// Returns the number of statements executed.
pub(crate) fn run_source(
    interpreter: &mut Interpreter,
    source: &str,
    file: &str,
) -> RuntimeResult<usize> {
    let (tokens, scan_errors) = Lexer::new(source).tokenize();
    if !scan_errors.is_empty() {
        return Err(scan_errors
            .iter()
            .map(|e| e.to_diagnostic(source).with_file(file))
            .collect());
    }

    let (statements, parse_errors) = Parser::new(tokens).parse();
    if !parse_errors.is_empty() {
        return Err(parse_errors
            .iter()
            .map(|e| e.to_diagnostic(source).with_file(file))
            .collect());
    }

    interpreter
        .interpret(&statements)
        .map(|()| statements.len())
        .map_err(|e| vec![e.to_diagnostic(source).with_file(file)])
}
