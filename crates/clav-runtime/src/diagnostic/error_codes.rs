//! Error code registry with descriptions and help text
//!
//! Ranges:
//! - CL0xxx: Runtime errors
//! - CL1xxx: Syntax and lexer errors

// CL0xxx - Runtime Errors
pub const TYPE_ERROR: &str = "CL0001";
pub const UNDEFINED_VARIABLE: &str = "CL0002";
pub const OUTPUT_FAILURE: &str = "CL0003";
pub const READ_FAILURE: &str = "CL0004";

// CL1xxx - Syntax Errors
pub const SYNTAX_ERROR: &str = "CL1000";
pub const UNEXPECTED_CHARACTER: &str = "CL1001";
pub const UNTERMINATED_STRING: &str = "CL1002";
pub const INVALID_ESCAPE: &str = "CL1003";

/// Error code descriptor with code, description, and optional help text
#[derive(Debug, Clone)]
pub struct ErrorCodeInfo {
    /// The error code string (e.g., "CL0001")
    pub code: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Optional contextual help text
    pub help: Option<&'static str>,
}

/// Get info for an error code, if known
pub fn lookup(code: &str) -> Option<ErrorCodeInfo> {
    ERROR_CODES.iter().find(|e| e.code == code).cloned()
}

/// Get help text for an error code
pub fn help_for(code: &str) -> Option<&'static str> {
    lookup(code).and_then(|e| e.help)
}

/// Get description for an error code
pub fn description_for(code: &str) -> Option<&'static str> {
    lookup(code).map(|e| e.description)
}

/// All known error codes
pub static ERROR_CODES: &[ErrorCodeInfo] = &[
    ErrorCodeInfo {
        code: TYPE_ERROR,
        description: "Operator applied to a value of the wrong type",
        help: Some("Values are never converted implicitly. `+` needs two numbers or two strings, `!` needs a boolean."),
    },
    ErrorCodeInfo {
        code: UNDEFINED_VARIABLE,
        description: "Undefined variable",
        help: Some("Declare the variable with `var` before reading or assigning it."),
    },
    ErrorCodeInfo {
        code: OUTPUT_FAILURE,
        description: "Failed to write program output",
        help: None,
    },
    ErrorCodeInfo {
        code: READ_FAILURE,
        description: "Failed to read source file",
        help: Some("Check that the path exists and is readable."),
    },
    ErrorCodeInfo {
        code: SYNTAX_ERROR,
        description: "Syntax error",
        help: None,
    },
    ErrorCodeInfo {
        code: UNEXPECTED_CHARACTER,
        description: "Unexpected character",
        help: Some("Only ASCII letters, digits, `_` and the language's operators may appear outside strings."),
    },
    ErrorCodeInfo {
        code: UNTERMINATED_STRING,
        description: "Unterminated string literal",
        help: Some("Add a closing `\"`."),
    },
    ErrorCodeInfo {
        code: INVALID_ESCAPE,
        description: "Invalid escape sequence",
        help: Some("Supported escapes are \\n, \\t, \\r, \\\\ and \\\"."),
    },
];
