//! Runtime value representation
//!
//! Every runtime value belongs to exactly one variant of [`Value`]:
//! - Numbers, Bools, Nil: immediate values
//! - Strings: heap-allocated, reference-counted (`Arc<String>`), immutable
//!
//! Values are never mutated in place; operators always produce new values.

use crate::span::Span;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Dynamically typed runtime value
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Numeric value (IEEE 754 double-precision)
    Number(f64),
    /// String value (reference-counted, immutable)
    String(Arc<String>),
    /// Boolean value
    Bool(bool),
    /// Absence of a value
    Nil,
}

impl Value {
    /// Create a new string value
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(Arc::new(s.into()))
    }

    /// Get the type name of this value, as used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Bool(_) => "boolean",
            Value::Nil => "nil",
        }
    }

    /// Equality restricted to operands of the same variant.
    ///
    /// Returns `None` for cross-variant comparisons; equality is not total
    /// over the value domain.
    pub fn same_variant_eq(&self, other: &Value) -> Option<bool> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Some(a == b),
            (Value::String(a), Value::String(b)) => Some(a == b),
            (Value::Bool(a), Value::Bool(b)) => Some(a == b),
            (Value::Nil, Value::Nil) => Some(true),
            _ => None,
        }
    }

    /// Get a display string representation
    pub fn to_display_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::String(s) => write!(f, "{}", s.as_ref()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Nil => write!(f, "nil"),
        }
    }
}

/// Shortest round-trip form, switching to `1e+21` style when the decimal
/// exponent is below -4 or at least 21
fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return n.to_string();
    }

    if n != 0.0 {
        let sci = format!("{:e}", n);
        if let Some((mantissa, exp)) = sci.split_once('e') {
            if let Ok(exp) = exp.parse::<i32>() {
                if !(-4..21).contains(&exp) {
                    let sign = if exp < 0 { '-' } else { '+' };
                    return format!("{}e{}{:02}", mantissa, sign, exp.abs());
                }
            }
        }
    }

    // No trailing .0 for whole numbers
    if n.fract() == 0.0 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "Number({})", n),
            Value::String(s) => write!(f, "String({:?})", s),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Nil => write!(f, "Nil"),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

/// Runtime error type with source location information
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeError {
    /// Variable read or assigned before any declaration
    #[error("Undefined variable '{name}'")]
    UndefinedVariable { name: String, line: u32, span: Span },
    /// Operator applied to operands of the wrong runtime type
    #[error("{message}")]
    TypeError {
        message: String,
        line: u32,
        span: Span,
    },
    /// The output sink failed while printing
    #[error("I/O error: {message}")]
    Io { message: String, line: u32 },
}

impl RuntimeError {
    /// Get the source line for this error
    pub fn line(&self) -> u32 {
        match self {
            RuntimeError::UndefinedVariable { line, .. } => *line,
            RuntimeError::TypeError { line, .. } => *line,
            RuntimeError::Io { line, .. } => *line,
        }
    }

    /// Get the source span for this error
    pub fn span(&self) -> Span {
        match self {
            RuntimeError::UndefinedVariable { span, .. } => *span,
            RuntimeError::TypeError { span, .. } => *span,
            RuntimeError::Io { .. } => Span::dummy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_display() {
        assert_eq!(Value::Number(42.0).to_display_string(), "42");
        assert_eq!(Value::Number(-3.0).to_display_string(), "-3");
        assert_eq!(Value::Number(2.5).to_display_string(), "2.5");
        assert_eq!(Value::Number(0.1).to_display_string(), "0.1");
        assert_eq!(Value::Number(f64::INFINITY).to_display_string(), "inf");
        assert_eq!(Value::Number(f64::NEG_INFINITY).to_display_string(), "-inf");
        assert_eq!(Value::Number(f64::NAN).to_display_string(), "NaN");
    }

    #[test]
    fn test_number_display_exponent_form() {
        assert_eq!(Value::Number(1e300).to_display_string(), "1e+300");
        assert_eq!(Value::Number(-2.5e21).to_display_string(), "-2.5e+21");
        assert_eq!(Value::Number(1e21).to_display_string(), "1e+21");
        assert_eq!(Value::Number(1e20).to_display_string(), "100000000000000000000");
        assert_eq!(Value::Number(0.0001).to_display_string(), "0.0001");
        assert_eq!(Value::Number(0.00001).to_display_string(), "1e-05");
        assert_eq!(Value::Number(1.5e-300).to_display_string(), "1.5e-300");
        assert_eq!(Value::Number(0.0).to_display_string(), "0");
    }

    #[test]
    fn test_string_display_is_raw() {
        assert_eq!(Value::string("hello \"x\"").to_display_string(), "hello \"x\"");
    }

    #[test]
    fn test_bool_and_nil_display() {
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::Nil.to_string(), "nil");
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Number(1.0).type_name(), "number");
        assert_eq!(Value::string("").type_name(), "string");
        assert_eq!(Value::Bool(false).type_name(), "boolean");
        assert_eq!(Value::Nil.type_name(), "nil");
    }

    #[test]
    fn test_same_variant_eq() {
        assert_eq!(Value::Nil.same_variant_eq(&Value::Nil), Some(true));
        assert_eq!(
            Value::string("a").same_variant_eq(&Value::string("a")),
            Some(true)
        );
        assert_eq!(
            Value::Number(1.0).same_variant_eq(&Value::Number(2.0)),
            Some(false)
        );
        assert_eq!(Value::Number(1.0).same_variant_eq(&Value::string("1")), None);
        assert_eq!(Value::Bool(false).same_variant_eq(&Value::Nil), None);
    }

    #[test]
    fn test_nan_is_not_equal_to_itself() {
        let nan = Value::Number(f64::NAN);
        assert_eq!(nan.same_variant_eq(&nan), Some(false));
    }

    #[test]
    fn test_runtime_error_accessors() {
        let err = RuntimeError::UndefinedVariable {
            name: "x".to_string(),
            line: 4,
            span: Span::new(10, 11),
        };
        assert_eq!(err.line(), 4);
        assert_eq!(err.span(), Span::new(10, 11));
        assert_eq!(err.to_string(), "Undefined variable 'x'");
    }
}
