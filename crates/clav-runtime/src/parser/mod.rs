//! Parsing (tokens to AST)
//!
//! Recursive descent, one method per grammar level. A syntax error inside a
//! statement discards tokens up to the next statement boundary (panic-mode
//! recovery) so that one broken statement does not hide errors in the rest
//! of the input.

mod expr;
mod stmt;

use crate::ast::Stmt;
use crate::span::Span;
use crate::token::{Token, TokenKind};
use thiserror::Error;

/// A grammar violation at a specific token
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Parse error on line {} {}: {}", .token.line, location(.token), .context)]
pub struct ParseError {
    /// The offending token
    pub token: Token,
    /// What the parser expected at this point
    pub context: &'static str,
}

fn location(token: &Token) -> String {
    if token.kind == TokenKind::Eof {
        "at end".to_string()
    } else {
        format!("at '{}'", token.lexeme)
    }
}

/// Parse a token stream, collecting every syntax error
pub fn parse(tokens: Vec<Token>) -> (Vec<Stmt>, Vec<ParseError>) {
    Parser::new(tokens).parse()
}

/// Parser state for building AST from tokens
pub struct Parser {
    pub(super) tokens: Vec<Token>,
    pub(super) current: usize,
    pub(super) errors: Vec<ParseError>,
    /// Returned by `peek` once the token list is exhausted
    eof: Token,
}

impl Parser {
    /// Create a new parser for the given tokens
    pub fn new(tokens: Vec<Token>) -> Self {
        let eof = match tokens.last() {
            Some(last) => Token::new(
                TokenKind::Eof,
                "",
                last.line,
                Span::new(last.span.end, last.span.end),
            ),
            None => Token::new(TokenKind::Eof, "", 1, Span::dummy()),
        };

        Self {
            tokens,
            current: 0,
            errors: Vec::new(),
            eof,
        }
    }

    /// Parse tokens into a list of statements.
    ///
    /// Always runs to the end of input; the error list is empty only when
    /// every statement parsed cleanly.
    pub fn parse(&mut self) -> (Vec<Stmt>, Vec<ParseError>) {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            match self.declaration() {
                Ok(stmt) => statements.push(stmt),
                Err(err) => {
                    tracing::debug!(line = err.token.line, context = err.context, "parse error");
                    self.errors.push(err);
                    self.synchronize();
                }
            }
        }

        tracing::debug!(
            statements = statements.len(),
            errors = self.errors.len(),
            "parse complete"
        );

        (statements, std::mem::take(&mut self.errors))
    }

    // === Helper methods ===

    /// Advance to next token and return reference to the consumed one
    pub(super) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    /// Peek at current token
    pub(super) fn peek(&self) -> &Token {
        self.tokens.get(self.current).unwrap_or(&self.eof)
    }

    /// Most recently consumed token
    pub(super) fn previous(&self) -> &Token {
        self.current
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .unwrap_or(&self.eof)
    }

    /// Check if current token matches kind
    pub(super) fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    /// Match and consume token if it matches
    pub(super) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Match and consume the current token if it is any of `kinds`
    pub(super) fn match_any(&mut self, kinds: &[TokenKind]) -> bool {
        kinds.iter().any(|&kind| self.match_token(kind))
    }

    /// Consume token of given kind or error
    pub(super) fn consume(&mut self, kind: TokenKind, context: &'static str) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance().clone())
        } else {
            Err(self.error(context))
        }
    }

    /// Check if at end of token stream
    pub(super) fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    /// Build an error at the current token
    pub(super) fn error(&self, context: &'static str) -> ParseError {
        ParseError {
            token: self.peek().clone(),
            context,
        }
    }

    /// Discard tokens until a likely statement boundary.
    ///
    /// Stops after a `;` or before a keyword that starts a statement.
    pub(super) fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().kind == TokenKind::Semicolon {
                return;
            }

            if self.peek().kind.starts_statement() {
                return;
            }

            self.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::printer::stmt_to_sexpr;
    use crate::lexer::scan;

    fn parse_source(source: &str) -> (Vec<Stmt>, Vec<ParseError>) {
        let (tokens, scan_errors) = scan(source);
        assert!(scan_errors.is_empty(), "scan errors: {:?}", scan_errors);
        parse(tokens)
    }

    fn sexprs(source: &str) -> Vec<String> {
        let (statements, errors) = parse_source(source);
        assert!(errors.is_empty(), "parse errors: {:?}", errors);
        statements.iter().map(stmt_to_sexpr).collect()
    }

    #[test]
    fn test_parser_creation() {
        let mut parser = Parser::new(Vec::new());
        let (statements, errors) = parser.parse();
        assert!(statements.is_empty());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_parse_statements() {
        assert_eq!(
            sexprs("var a = 1; print a + 2; a;"),
            vec!["(var a 1)", "(print (+ a 2))", "(expr a)"]
        );
    }

    #[test]
    fn test_missing_eof_token_is_tolerated() {
        let (mut tokens, _) = scan("print 1;");
        tokens.pop();
        let (statements, errors) = parse(tokens);
        assert_eq!(statements.len(), 1);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_error_message_format() {
        let (_, errors) = parse_source("1 + ;");
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            "Parse error on line 1 at ';': Expect expression"
        );
    }

    #[test]
    fn test_error_at_end() {
        let (_, errors) = parse_source("print 1");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].token.kind, TokenKind::Eof);
        assert_eq!(
            errors[0].to_string(),
            "Parse error on line 1 at end: Expect ';' after value"
        );
    }

    #[test]
    fn test_synchronize_stops_after_semicolon() {
        let (statements, errors) = parse_source("1 + ; print \"x\";");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].token.kind, TokenKind::Semicolon);
        assert_eq!(statements.len(), 1);
        assert_eq!(stmt_to_sexpr(&statements[0]), "(print \"x\")");
    }

    #[test]
    fn test_synchronize_stops_before_keyword() {
        // No semicolon between the broken expression and the declaration
        let (statements, errors) = parse_source("1 + + 2 var b = 3;");
        assert_eq!(errors.len(), 1);
        assert_eq!(statements.len(), 1);
        assert_eq!(stmt_to_sexpr(&statements[0]), "(var b 3)");
    }

    #[test]
    fn test_multiple_independent_errors() {
        let (statements, errors) = parse_source("var = 1; print (2; print 3;");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].context, "Expect variable name");
        assert_eq!(errors[1].context, "Expect ')' after expression");
        assert_eq!(statements.len(), 1);
    }
}
