//! Shared test utilities
//!
//! Helpers for running Clav source end to end and inspecting what it
//! printed or reported.
#![allow(dead_code)]

use clav_runtime::ast::printer::stmt_to_sexpr;
use clav_runtime::{parse, scan, Clav, Diagnostic};
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

// Re-export testing utilities
pub use pretty_assertions::{assert_eq, assert_ne};

/// In-memory print sink that stays readable after being boxed
#[derive(Clone, Default)]
pub struct SharedBuf(Rc<RefCell<Vec<u8>>>);

impl SharedBuf {
    pub fn contents(&self) -> String {
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

/// A runtime whose output can be read back
pub fn runtime() -> (Clav, SharedBuf) {
    let buf = SharedBuf::default();
    (Clav::with_output(Box::new(buf.clone())), buf)
}

/// Run source on a fresh runtime; return printed output and the result
pub fn run(source: &str) -> (String, Result<(), Vec<Diagnostic>>) {
    let (runtime, buf) = runtime();
    let result = runtime.run(source);
    (buf.contents(), result)
}

/// Assert that source runs cleanly and prints exactly `expected`
pub fn assert_output(source: &str, expected: &str) {
    let (output, result) = run(source);
    if let Err(diags) = result {
        panic!("Expected success for {:?}, got {:?}", source, diags);
    }
    assert_eq!(output, expected);
}

/// Assert that source fails and the first diagnostic has `expected_code`
pub fn assert_error_code(source: &str, expected_code: &str) {
    match run(source).1 {
        Err(diags) => {
            assert!(!diags.is_empty(), "Expected error, got success");
            assert_eq!(
                diags[0].code, expected_code,
                "Expected error code {}, got {}: {}",
                expected_code, diags[0].code, diags[0].message
            );
        }
        Ok(()) => panic!("Expected error {}, got success", expected_code),
    }
}

/// Parse source that must be free of errors, rendering each statement
pub fn sexprs(source: &str) -> String {
    let (tokens, scan_errors) = scan(source);
    assert!(scan_errors.is_empty(), "scan errors: {:?}", scan_errors);
    let (statements, parse_errors) = parse(tokens);
    assert!(parse_errors.is_empty(), "parse errors: {:?}", parse_errors);
    statements
        .iter()
        .map(stmt_to_sexpr)
        .collect::<Vec<_>>()
        .join("\n")
}
