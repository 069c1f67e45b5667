//! Clav Runtime - Core language implementation
//!
//! This library provides the Clav language front-end and evaluator:
//! - Lexical analysis and parsing with error recovery
//! - A tree-walking interpreter over a scope-stack environment
//! - Diagnostics with stable error codes, for humans and for tools

/// Clav runtime version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Public API modules
pub mod ast;
pub mod diagnostic;
pub mod environment;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod repl;
pub mod runtime;
pub mod span;
pub mod token;
pub mod value;

// Re-export commonly used types
pub use ast::{Expr, Stmt, VersionedProgram, AST_VERSION};
pub use diagnostic::{error_codes, Diagnostic, DIAG_VERSION};
pub use environment::Environment;
pub use interpreter::Interpreter;
pub use lexer::{scan, Lexer, ScanError, ScanErrorKind};
pub use parser::{parse, ParseError, Parser};
pub use repl::{ReplCore, ReplResult};
pub use runtime::{Clav, RuntimeResult};
pub use span::Span;
pub use token::{Token, TokenKind, TokenLiteral};
pub use value::{RuntimeError, Value};
