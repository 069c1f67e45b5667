//! Expression parsing (recursive descent)
//!
//! One method per precedence level, lowest first:
//!
//! ```text
//! expression → assignment
//! assignment → IDENTIFIER "=" assignment | equality
//! equality   → comparison ( ( "!=" | "==" ) comparison )*
//! comparison → term ( ( ">" | ">=" | "<" | "<=" ) term )*
//! term       → factor ( ( "-" | "+" ) factor )*
//! factor     → unary ( ( "/" | "*" ) unary )*
//! unary      → ( "!" | "-" ) unary | primary
//! primary    → NUMBER | STRING | "true" | "false" | "nil"
//!            | IDENTIFIER | "(" expression ")"
//! ```

use crate::ast::Expr;
use crate::parser::{ParseError, Parser};
use crate::token::{TokenKind, TokenLiteral};
use crate::value::Value;

impl Parser {
    /// Parse an expression
    pub(super) fn expression(&mut self) -> Result<Expr, ParseError> {
        self.assignment()
    }

    /// Assignment is right-associative and binds loosest.
    ///
    /// The left side is parsed as an ordinary expression first; only a bare
    /// variable is a valid target. An invalid target is recorded without
    /// unwinding, since the parser is still in a known state.
    fn assignment(&mut self) -> Result<Expr, ParseError> {
        let expr = self.equality()?;

        if self.match_token(TokenKind::Equal) {
            let equals = self.previous().clone();
            let value = self.assignment()?;

            return match expr {
                Expr::Variable(name) => Ok(Expr::assign(name, value)),
                target => {
                    self.errors.push(ParseError {
                        token: equals,
                        context: "Invalid assignment target",
                    });
                    Ok(target)
                }
            };
        }

        Ok(expr)
    }

    fn equality(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.comparison()?;

        while self.match_any(&[TokenKind::BangEqual, TokenKind::EqualEqual]) {
            let operator = self.previous().clone();
            let right = self.comparison()?;
            expr = Expr::binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn comparison(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.term()?;

        while self.match_any(&[
            TokenKind::Greater,
            TokenKind::GreaterEqual,
            TokenKind::Less,
            TokenKind::LessEqual,
        ]) {
            let operator = self.previous().clone();
            let right = self.term()?;
            expr = Expr::binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn term(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.factor()?;

        while self.match_any(&[TokenKind::Minus, TokenKind::Plus]) {
            let operator = self.previous().clone();
            let right = self.factor()?;
            expr = Expr::binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn factor(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.unary()?;

        while self.match_any(&[TokenKind::Slash, TokenKind::Star]) {
            let operator = self.previous().clone();
            let right = self.unary()?;
            expr = Expr::binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr, ParseError> {
        if self.match_any(&[TokenKind::Bang, TokenKind::Minus]) {
            let operator = self.previous().clone();
            let operand = self.unary()?;
            return Ok(Expr::unary(operator, operand));
        }

        self.primary()
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        match self.peek().kind {
            TokenKind::False => {
                self.advance();
                Ok(Expr::Literal(Value::Bool(false)))
            }
            TokenKind::True => {
                self.advance();
                Ok(Expr::Literal(Value::Bool(true)))
            }
            TokenKind::Nil => {
                self.advance();
                Ok(Expr::Literal(Value::Nil))
            }
            TokenKind::Number => self.number(),
            TokenKind::String => {
                let token = self.advance();
                let text = match &token.literal {
                    Some(TokenLiteral::String(s)) => s.clone(),
                    // Hand-built tokens may carry only the quoted lexeme
                    _ => token.lexeme.trim_matches('"').to_string(),
                };
                Ok(Expr::Literal(Value::string(text)))
            }
            TokenKind::Identifier => Ok(Expr::Variable(self.advance().clone())),
            TokenKind::LeftParen => {
                self.advance();
                let inner = self.expression()?;
                self.consume(TokenKind::RightParen, "Expect ')' after expression")?;
                Ok(Expr::grouping(inner))
            }
            _ => Err(self.error("Expect expression")),
        }
    }

    fn number(&mut self) -> Result<Expr, ParseError> {
        let token = self.peek().clone();
        let text = match &token.literal {
            Some(TokenLiteral::Number(text)) => text.as_str(),
            _ => token.lexeme.as_str(),
        };

        let n: f64 = text
            .parse()
            .map_err(|_| self.error("Invalid number literal"))?;

        self.advance();
        Ok(Expr::Literal(Value::Number(n)))
    }
}
