//! Lexical analysis (tokenization)
//!
//! The lexer converts Clav source code into a stream of tokens in a single
//! left-to-right pass. Malformed input never aborts the pass: each problem is
//! recorded as a line-tagged [`ScanError`] and scanning resumes with the next
//! character.

use crate::span::Span;
use crate::token::{Token, TokenKind};
use thiserror::Error;

mod literals;

/// What went wrong while scanning
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanErrorKind {
    /// A character that starts no token
    UnexpectedCharacter(char),
    /// A string literal that reaches end of input before its closing quote
    UnterminatedString,
    /// An unknown `\x` escape inside a string literal
    InvalidEscape(char),
}

impl ScanErrorKind {
    /// Human-readable message (without location)
    pub fn message(&self) -> String {
        match self {
            ScanErrorKind::UnexpectedCharacter(c) => format!("Unexpected character '{}'", c),
            ScanErrorKind::UnterminatedString => "Unterminated string".to_string(),
            ScanErrorKind::InvalidEscape(c) => format!("Invalid escape sequence '\\{}'", c),
        }
    }
}

/// A lexical error tagged with its source line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Error on line {line}: {}", kind.message())]
pub struct ScanError {
    pub kind: ScanErrorKind,
    pub line: u32,
    pub span: Span,
}

/// Scan `source` into tokens, collecting every lexical error
pub fn scan(source: &str) -> (Vec<Token>, Vec<ScanError>) {
    Lexer::new(source).tokenize()
}

/// Lexer state for tokenizing source code
pub struct Lexer {
    /// Characters of source code
    pub(super) chars: Vec<char>,
    /// Start of the lexeme being scanned
    pub(super) start: usize,
    /// Current position in chars
    pub(super) current: usize,
    /// Current line number (1-indexed)
    pub(super) line: u32,
    /// Collected errors
    pub(super) errors: Vec<ScanError>,
}

impl Lexer {
    /// Create a new lexer for the given source code
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            start: 0,
            current: 0,
            line: 1,
            errors: Vec::new(),
        }
    }

    /// Tokenize the source code, returning tokens and any errors.
    ///
    /// The token list always ends with a single `Eof` token.
    pub fn tokenize(&mut self) -> (Vec<Token>, Vec<ScanError>) {
        let mut tokens = Vec::new();

        while !self.is_at_end() {
            self.start = self.current;
            if let Some(token) = self.scan_token() {
                tracing::trace!(kind = ?token.kind, line = token.line, lexeme = %token.lexeme, "token");
                tokens.push(token);
            }
        }

        tokens.push(Token::new(
            TokenKind::Eof,
            "",
            self.line,
            Span::new(self.current, self.current),
        ));

        tracing::debug!(
            tokens = tokens.len(),
            errors = self.errors.len(),
            "scan complete"
        );

        (tokens, std::mem::take(&mut self.errors))
    }

    /// Scan one lexeme starting at `self.start`.
    ///
    /// Returns `None` for whitespace, comments and errors.
    fn scan_token(&mut self) -> Option<Token> {
        let c = self.advance();

        match c {
            // Single-character tokens
            '(' => Some(self.make_token(TokenKind::LeftParen)),
            ')' => Some(self.make_token(TokenKind::RightParen)),
            '{' => Some(self.make_token(TokenKind::LeftBrace)),
            '}' => Some(self.make_token(TokenKind::RightBrace)),
            ',' => Some(self.make_token(TokenKind::Comma)),
            '.' => Some(self.make_token(TokenKind::Dot)),
            '-' => Some(self.make_token(TokenKind::Minus)),
            '+' => Some(self.make_token(TokenKind::Plus)),
            ';' => Some(self.make_token(TokenKind::Semicolon)),
            '*' => Some(self.make_token(TokenKind::Star)),

            // One or two character tokens
            '!' => {
                let kind = if self.match_char('=') {
                    TokenKind::BangEqual
                } else {
                    TokenKind::Bang
                };
                Some(self.make_token(kind))
            }
            '=' => {
                let kind = if self.match_char('=') {
                    TokenKind::EqualEqual
                } else {
                    TokenKind::Equal
                };
                Some(self.make_token(kind))
            }
            '<' => {
                let kind = if self.match_char('=') {
                    TokenKind::LessEqual
                } else {
                    TokenKind::Less
                };
                Some(self.make_token(kind))
            }
            '>' => {
                let kind = if self.match_char('=') {
                    TokenKind::GreaterEqual
                } else {
                    TokenKind::Greater
                };
                Some(self.make_token(kind))
            }

            // Division or line comment
            '/' => {
                if self.match_char('/') {
                    while !self.is_at_end() && self.peek() != '\n' {
                        self.advance();
                    }
                    None
                } else {
                    Some(self.make_token(TokenKind::Slash))
                }
            }

            // Whitespace
            ' ' | '\r' | '\t' => None,
            '\n' => {
                self.line += 1;
                None
            }

            // String literals
            '"' => self.string(),

            // Numbers
            c if c.is_ascii_digit() => Some(self.number()),

            // Identifiers and keywords
            c if is_identifier_start(c) => Some(self.identifier()),

            // Unexpected character
            _ => {
                self.error(ScanErrorKind::UnexpectedCharacter(c));
                None
            }
        }
    }

    // === Character navigation ===

    /// Advance to next character and return it
    pub(super) fn advance(&mut self) -> char {
        let c = self.chars[self.current];
        self.current += 1;
        c
    }

    /// Peek at current character without advancing
    pub(super) fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.chars[self.current]
        }
    }

    /// Peek at next character (current + 1)
    pub(super) fn peek_next(&self) -> Option<char> {
        self.chars.get(self.current + 1).copied()
    }

    /// Check if current character matches expected, and advance if so
    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.chars[self.current] != expected {
            false
        } else {
            self.current += 1;
            true
        }
    }

    /// Check if we've reached the end of source
    pub(super) fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }

    // === Token creation ===

    /// Exact source text of the current lexeme
    pub(super) fn lexeme(&self) -> String {
        self.chars[self.start..self.current].iter().collect()
    }

    /// Create a token for the current lexeme
    pub(super) fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(
            kind,
            self.lexeme(),
            self.line,
            Span::new(self.start, self.current),
        )
    }

    /// Record an error for the current lexeme
    pub(super) fn error(&mut self, kind: ScanErrorKind) {
        let span = Span::new(self.start, self.current.max(self.start + 1));
        tracing::debug!(line = self.line, error = %kind.message(), "scan error");
        self.errors.push(ScanError {
            kind,
            line: self.line,
            span,
        });
    }
}

pub(super) fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

pub(super) fn is_identifier_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
