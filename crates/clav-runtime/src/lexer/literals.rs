//! Literal scanning for the lexer

use crate::lexer::{is_identifier_continue, Lexer, ScanErrorKind};
use crate::token::{Token, TokenKind, TokenLiteral};

impl Lexer {
    /// Scan a string literal (opening quote already consumed).
    ///
    /// Returns `None` when the literal is unterminated or contains an
    /// invalid escape; the error has been recorded.
    pub(super) fn string(&mut self) -> Option<Token> {
        let mut value = String::new();
        let mut invalid_escape = None;

        while !self.is_at_end() && self.peek() != '"' {
            if self.peek() == '\n' {
                self.line += 1;
            }

            if self.peek() == '\\' {
                self.advance(); // consume backslash
                if self.is_at_end() {
                    break;
                }

                let escape_char = self.advance();
                match escape_char {
                    'n' => value.push('\n'),
                    'r' => value.push('\r'),
                    't' => value.push('\t'),
                    '\\' => value.push('\\'),
                    '"' => value.push('"'),
                    other => {
                        if other == '\n' {
                            self.line += 1;
                        }
                        // Keep scanning to the closing quote, report once
                        invalid_escape.get_or_insert(other);
                    }
                }
            } else {
                value.push(self.advance());
            }
        }

        if self.is_at_end() {
            self.error(ScanErrorKind::UnterminatedString);
            return None;
        }

        self.advance(); // Closing "

        if let Some(c) = invalid_escape {
            self.error(ScanErrorKind::InvalidEscape(c));
            return None;
        }

        Some(
            self.make_token(TokenKind::String)
                .with_literal(TokenLiteral::String(value)),
        )
    }

    /// Scan a number literal (first digit already consumed)
    pub(super) fn number(&mut self) -> Token {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        // A '.' only belongs to the number when a digit follows it
        if self.peek() == '.' && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance(); // consume .
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        let text = self.lexeme();
        self.make_token(TokenKind::Number)
            .with_literal(TokenLiteral::Number(text))
    }

    /// Scan an identifier or keyword
    pub(super) fn identifier(&mut self) -> Token {
        while is_identifier_continue(self.peek()) {
            self.advance();
        }

        let kind = TokenKind::keyword(&self.lexeme()).unwrap_or(TokenKind::Identifier);
        self.make_token(kind)
    }
}
