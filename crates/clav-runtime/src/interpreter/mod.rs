//! AST interpreter (tree-walking)
//!
//! Direct AST evaluation over a scope-stack [`Environment`]. Statements run
//! in order; the first runtime error aborts the remaining statements of the
//! current `interpret` call. Bindings made before the failure persist.

mod expr;
mod stmt;

use crate::ast::Stmt;
use crate::environment::Environment;
use crate::value::RuntimeError;
use std::io::{self, Write};

/// Interpreter state
pub struct Interpreter {
    /// Variable bindings
    pub(super) environment: Environment,
    /// Sink for `print` output
    pub(super) output: Box<dyn Write>,
}

impl Interpreter {
    /// Create a new interpreter printing to standard output
    pub fn new() -> Self {
        Self::with_output(Box::new(io::stdout()))
    }

    /// Create a new interpreter printing to `output`
    pub fn with_output(output: Box<dyn Write>) -> Self {
        Self {
            environment: Environment::new(),
            output,
        }
    }

    /// Execute statements in order, stopping at the first runtime error
    #[tracing::instrument(level = "debug", skip_all, fields(statements = statements.len()))]
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        let result = statements.iter().try_for_each(|stmt| self.execute(stmt));

        if let Err(err) = &result {
            tracing::debug!(line = err.line(), error = %err, "runtime error");
        }

        // Flush whatever was printed even when a later statement failed
        let flushed = self.output.flush().map_err(|e| RuntimeError::Io {
            message: e.to_string(),
            line: 0,
        });

        result.and(flushed)
    }

    /// Variable bindings
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Drop every binding, keeping the output sink
    pub fn reset(&mut self) {
        self.environment = Environment::new();
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::lexer::scan;
    use crate::parser::parse;
    use crate::value::Value;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Write sink that can be read back after the interpreter is done
    #[derive(Clone, Default)]
    pub(crate) struct SharedBuf(pub(crate) Rc<RefCell<Vec<u8>>>);

    impl SharedBuf {
        pub(crate) fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.borrow()).into_owned()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    pub(crate) fn run(interp: &mut Interpreter, source: &str) -> Result<(), RuntimeError> {
        let (tokens, scan_errors) = scan(source);
        assert!(scan_errors.is_empty(), "scan errors: {:?}", scan_errors);
        let (statements, parse_errors) = parse(tokens);
        assert!(parse_errors.is_empty(), "parse errors: {:?}", parse_errors);
        interp.interpret(&statements)
    }

    #[test]
    fn test_interpreter_creation() {
        let interp = Interpreter::new();
        assert_eq!(interp.environment().depth(), 1);
        assert!(interp.environment().globals().is_empty());
    }

    #[test]
    fn test_first_error_aborts_rest() {
        let buf = SharedBuf::default();
        let mut interp = Interpreter::with_output(Box::new(buf.clone()));

        let err = run(&mut interp, "print 1; print missing; print 2;").unwrap_err();
        assert!(matches!(err, RuntimeError::UndefinedVariable { .. }));
        assert_eq!(buf.contents(), "1\n");
    }

    #[test]
    fn test_bindings_survive_failure() {
        let mut interp = Interpreter::with_output(Box::new(io::sink()));
        assert!(run(&mut interp, "var a = 1; a - \"x\"; var b = 2;").is_err());
        assert!(interp.environment().is_defined("a"));
        assert!(!interp.environment().is_defined("b"));
    }

    #[test]
    fn test_reset() {
        let mut interp = Interpreter::with_output(Box::new(io::sink()));
        run(&mut interp, "var a = 1;").unwrap();
        interp.reset();
        assert!(!interp.environment().is_defined("a"));
    }

    #[test]
    fn test_state_persists_across_calls() {
        let buf = SharedBuf::default();
        let mut interp = Interpreter::with_output(Box::new(buf.clone()));
        run(&mut interp, "var a = 1;").unwrap();
        run(&mut interp, "a = a + 1; print a;").unwrap();
        assert_eq!(buf.contents(), "2\n");
        assert_eq!(
            interp.environment().globals(),
            vec![("a".to_string(), Value::Number(2.0))]
        );
    }
}
