//! Diagnostic system for errors
//!
//! Scan, parse and runtime errors stay distinct types until they are
//! reported. At that point each is converted into a [`Diagnostic`], which
//! carries a stable error code plus enough source context (line, column,
//! snippet) to render a caret under the offending text.

pub mod error_codes;
pub mod formatter;

use crate::lexer::{ScanError, ScanErrorKind};
use crate::parser::ParseError;
use crate::span::Span;
use crate::token::TokenKind;
use crate::value::RuntimeError;
use formatter::{extract_snippet, gutter_width, offset_to_line_col};
use serde::{Deserialize, Serialize};

/// Diagnostic schema version
pub const DIAG_VERSION: u32 = 1;

/// File name used when the source did not come from a file
pub const UNKNOWN_FILE: &str = "<input>";

/// A reportable error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Diagnostic schema version
    pub diag_version: u32,
    /// Error code (e.g., "CL0001")
    pub code: String,
    /// Main diagnostic message
    pub message: String,
    /// File path
    pub file: String,
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub column: usize,
    /// Length of error span
    pub length: usize,
    /// Source line string
    pub snippet: String,
    /// Short label for caret range
    pub label: String,
    /// Additional notes (optional)
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub notes: Vec<String>,
    /// Suggested fix (optional)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic with code
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            diag_version: DIAG_VERSION,
            code: code.into(),
            message: message.into(),
            file: UNKNOWN_FILE.to_string(),
            line: 1,
            column: 1,
            length: 0,
            snippet: String::new(),
            label: String::new(),
            notes: Vec::new(),
            help: None,
        }
    }

    /// Set the file path
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = file.into();
        self
    }

    /// Set the line number
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    /// Set the snippet (source line)
    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = snippet.into();
        self
    }

    /// Set the label (caret description)
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Add a note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Add a help message
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Attach the registry help text for this diagnostic's code, if any
    pub fn with_default_help(self) -> Self {
        match error_codes::help_for(&self.code) {
            Some(help) => self.with_help(help),
            None => self,
        }
    }

    /// Fill in line, column, length and snippet from a character span.
    ///
    /// The caret never runs past the end of the snippet line, and is at
    /// least one column wide.
    pub fn with_source_span(mut self, source: &str, span: Span) -> Self {
        let (line, column) = offset_to_line_col(source, span.start);
        let snippet = extract_snippet(source, line).unwrap_or_default();
        let rest = snippet.chars().count().saturating_sub(column - 1);

        self.line = line;
        self.column = column;
        self.length = span.len().min(rest).max(1);
        self.snippet = snippet;
        self
    }

    /// Format as human-readable string
    pub fn to_human_string(&self) -> String {
        let mut output = String::new();

        // Header: error[CL0001]: Cannot add number and string
        output.push_str(&format!("error[{}]: {}\n", self.code, self.message));

        // Location: --> path/to/file.clav:12:9
        output.push_str(&format!(
            "  --> {}:{}:{}\n",
            self.file, self.line, self.column
        ));

        if !self.snippet.is_empty() {
            let width = gutter_width(self.line);
            output.push_str(&format!("{:>width$} |\n", ""));
            output.push_str(&format!("{:>width$} | {}\n", self.line, self.snippet));

            if self.length > 0 {
                let padding = " ".repeat(self.column.saturating_sub(1));
                let carets = "^".repeat(self.length);
                output.push_str(&format!("{:>width$} | {}{}", "", padding, carets));

                if !self.label.is_empty() {
                    output.push_str(&format!(" {}", self.label));
                }
                output.push('\n');
            }
        }

        for note in &self.notes {
            output.push_str(&format!("   = note: {}\n", note));
        }

        if let Some(help) = &self.help {
            output.push_str(&format!("   = help: {}\n", help));
        }

        output
    }

    /// Format as JSON string
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Format as compact JSON string (one line)
    pub fn to_json_compact(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl ScanError {
    /// Convert to a diagnostic against the scanned source
    pub fn to_diagnostic(&self, source: &str) -> Diagnostic {
        let diag = match self.kind {
            ScanErrorKind::UnexpectedCharacter(_) => {
                Diagnostic::error(error_codes::UNEXPECTED_CHARACTER, self.kind.message())
                    .with_source_span(source, self.span)
                    .with_label("not valid here")
            }
            // Reported where the input ran out, which is the line the error carries
            ScanErrorKind::UnterminatedString => {
                let (start_line, _) = offset_to_line_col(source, self.span.start);
                let end = Span::new(self.span.end, self.span.end);
                let diag = Diagnostic::error(error_codes::UNTERMINATED_STRING, self.kind.message())
                    .with_source_span(source, end)
                    .with_line(self.line as usize)
                    .with_label("input ends here");
                if start_line == self.line as usize {
                    diag
                } else {
                    diag.with_note(format!("the string starts on line {}", start_line))
                }
            }
            ScanErrorKind::InvalidEscape(_) => {
                Diagnostic::error(error_codes::INVALID_ESCAPE, self.kind.message())
                    .with_source_span(source, self.span)
                    .with_label("in this string")
            }
        };

        diag.with_default_help()
    }
}

impl ParseError {
    /// Convert to a diagnostic against the parsed source
    pub fn to_diagnostic(&self, source: &str) -> Diagnostic {
        let label = if self.token.kind == TokenKind::Eof {
            "at end".to_string()
        } else {
            format!("at '{}'", self.token.lexeme)
        };

        Diagnostic::error(error_codes::SYNTAX_ERROR, self.context)
            .with_source_span(source, self.token.span)
            .with_label(label)
    }
}

impl RuntimeError {
    /// Convert to a diagnostic against the executed source
    pub fn to_diagnostic(&self, source: &str) -> Diagnostic {
        match self {
            RuntimeError::UndefinedVariable { span, .. } => {
                Diagnostic::error(error_codes::UNDEFINED_VARIABLE, self.to_string())
                    .with_source_span(source, *span)
                    .with_label("not declared")
                    .with_default_help()
            }
            RuntimeError::TypeError { span, .. } => {
                Diagnostic::error(error_codes::TYPE_ERROR, self.to_string())
                    .with_source_span(source, *span)
                    .with_label("in this operation")
            }
            RuntimeError::Io { line, .. } => {
                let line = (*line as usize).max(1);
                Diagnostic::error(error_codes::OUTPUT_FAILURE, self.to_string())
                    .with_line(line)
                    .with_snippet(extract_snippet(source, line).unwrap_or_default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::scan;
    use crate::parser::parse;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builder_pattern() {
        let diag = Diagnostic::error(error_codes::UNDEFINED_VARIABLE, "Undefined variable 'y'")
            .with_file("test.clav")
            .with_line(10)
            .with_snippet("print y;")
            .with_label("not declared")
            .with_note("y is not defined in this scope")
            .with_help("declare y before using it");

        assert_eq!(diag.file, "test.clav");
        assert_eq!(diag.line, 10);
        assert_eq!(diag.snippet, "print y;");
        assert_eq!(diag.label, "not declared");
        assert_eq!(diag.notes.len(), 1);
        assert!(diag.help.is_some());
        assert_eq!(diag.diag_version, DIAG_VERSION);
    }

    #[test]
    fn test_source_span_location() {
        let source = "var a = 1;\nprint a + b;";
        let diag = Diagnostic::error("CL0002", "x").with_source_span(source, Span::new(21, 22));
        assert_eq!(diag.line, 2);
        assert_eq!(diag.column, 11);
        assert_eq!(diag.length, 1);
        assert_eq!(diag.snippet, "print a + b;");
    }

    #[test]
    fn test_caret_clamped_to_line() {
        let source = "\"abc\ndef";
        let diag = Diagnostic::error("CL1002", "x").with_source_span(source, Span::new(0, 8));
        assert_eq!(diag.line, 1);
        assert_eq!(diag.length, 4);
    }

    #[test]
    fn test_human_format() {
        let source = "print 1 + \"a\";";
        let diag = RuntimeError::TypeError {
            message: "Cannot add number and string".to_string(),
            line: 1,
            span: Span::new(8, 9),
        }
        .to_diagnostic(source)
        .with_file("test.clav");

        assert_eq!(
            diag.to_human_string(),
            "error[CL0001]: Cannot add number and string\n  \
             --> test.clav:1:9\n   \
             |\n \
             1 | print 1 + \"a\";\n   \
             |         ^ in this operation\n"
        );
    }

    #[test]
    fn test_scan_error_conversion() {
        let source = "var x = 1;\nvar y = @;";
        let (_, errors) = scan(source);
        let diag = errors[0].to_diagnostic(source);
        assert_eq!(diag.code, error_codes::UNEXPECTED_CHARACTER);
        assert_eq!(diag.message, "Unexpected character '@'");
        assert_eq!(diag.line, 2);
        assert_eq!(diag.column, 9);
        assert!(diag.help.is_some());
    }

    #[test]
    fn test_unterminated_string_reports_end_line() {
        let source = "print 1;\n\"abc\ndef\nghi";
        let (_, errors) = scan(source);
        assert_eq!(errors[0].line, 4);

        let diag = errors[0].to_diagnostic(source);
        assert_eq!(diag.code, error_codes::UNTERMINATED_STRING);
        assert_eq!(diag.line, 4);
        assert_eq!(diag.snippet, "ghi");
        assert_eq!(diag.column, 4);
        assert_eq!(diag.notes, vec!["the string starts on line 2".to_string()]);
    }

    #[test]
    fn test_unterminated_string_on_one_line() {
        let source = "print \"abc";
        let (_, errors) = scan(source);
        let diag = errors[0].to_diagnostic(source);
        assert_eq!(diag.line, 1);
        assert_eq!(diag.column, 11);
        assert_eq!(diag.length, 1);
        assert!(diag.notes.is_empty());
    }

    #[test]
    fn test_parse_error_conversion() {
        let source = "print (1 + 2;";
        let (tokens, _) = scan(source);
        let (_, errors) = parse(tokens);
        let diag = errors[0].to_diagnostic(source);
        assert_eq!(diag.code, error_codes::SYNTAX_ERROR);
        assert_eq!(diag.message, "Expect ')' after expression");
        assert_eq!(diag.label, "at ';'");
        assert_eq!(diag.column, 13);
    }

    #[test]
    fn test_parse_error_at_end() {
        let source = "print 1";
        let (tokens, _) = scan(source);
        let (_, errors) = parse(tokens);
        let diag = errors[0].to_diagnostic(source);
        assert_eq!(diag.label, "at end");
        assert_eq!(diag.line, 1);
        assert_eq!(diag.column, 8);
    }

    #[test]
    fn test_io_error_conversion() {
        let err = RuntimeError::Io {
            message: "broken pipe".to_string(),
            line: 2,
        };
        let diag = err.to_diagnostic("var a;\nprint a;");
        assert_eq!(diag.code, error_codes::OUTPUT_FAILURE);
        assert_eq!(diag.line, 2);
        assert_eq!(diag.snippet, "print a;");
        assert_eq!(diag.length, 0);
    }

    #[test]
    fn test_json_roundtrip() {
        let diag = Diagnostic::error(error_codes::TYPE_ERROR, "test")
            .with_file("test.clav")
            .with_line(1);

        let json = diag.to_json_string().unwrap();
        assert!(json.contains("\"diag_version\": 1"));
        assert!(json.contains("\"code\": \"CL0001\""));
        assert!(!json.contains("\"help\""));

        let restored: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, diag);
    }

    #[test]
    fn test_json_compact_is_single_line() {
        let diag = Diagnostic::error(error_codes::SYNTAX_ERROR, "Expect expression");
        assert!(!diag.to_json_compact().unwrap().contains('\n'));
    }
}
