//! Statement parsing

use crate::ast::{Stmt, VarDecl};
use crate::parser::{ParseError, Parser};
use crate::token::TokenKind;

impl Parser {
    /// Parse a declaration or statement
    pub(super) fn declaration(&mut self) -> Result<Stmt, ParseError> {
        if self.match_token(TokenKind::Var) {
            return self.var_declaration();
        }

        self.statement()
    }

    /// Parse `var name;` or `var name = expr;` (the `var` is already consumed)
    fn var_declaration(&mut self) -> Result<Stmt, ParseError> {
        let name = self.consume(TokenKind::Identifier, "Expect variable name")?;

        let initializer = if self.match_token(TokenKind::Equal) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(
            TokenKind::Semicolon,
            "Expect ';' after variable declaration",
        )?;

        Ok(Stmt::Var(VarDecl { name, initializer }))
    }

    /// Parse a non-declaring statement
    fn statement(&mut self) -> Result<Stmt, ParseError> {
        if self.match_token(TokenKind::Print) {
            return self.print_statement();
        }

        self.expression_statement()
    }

    fn print_statement(&mut self) -> Result<Stmt, ParseError> {
        let value = self.expression()?;
        self.consume(TokenKind::Semicolon, "Expect ';' after value")?;
        Ok(Stmt::Print(value))
    }

    fn expression_statement(&mut self) -> Result<Stmt, ParseError> {
        let expr = self.expression()?;
        self.consume(TokenKind::Semicolon, "Expect ';' after expression")?;
        Ok(Stmt::Expression(expr))
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::printer::stmt_to_sexpr;
    use crate::lexer::scan;
    use crate::parser::parse;

    fn contexts(source: &str) -> Vec<&'static str> {
        let (tokens, _) = scan(source);
        let (_, errors) = parse(tokens);
        errors.iter().map(|e| e.context).collect()
    }

    #[test]
    fn test_var_without_initializer() {
        let (tokens, _) = scan("var x;");
        let (statements, errors) = parse(tokens);
        assert!(errors.is_empty());
        assert_eq!(stmt_to_sexpr(&statements[0]), "(var x)");
    }

    #[test]
    fn test_missing_semicolons() {
        assert_eq!(contexts("var x = 1"), vec!["Expect ';' after variable declaration"]);
        assert_eq!(contexts("print 1"), vec!["Expect ';' after value"]);
        assert_eq!(contexts("1 + 2"), vec!["Expect ';' after expression"]);
    }

    #[test]
    fn test_var_requires_identifier() {
        assert_eq!(contexts("var 1 = 2;"), vec!["Expect variable name"]);
        assert_eq!(contexts("var print;"), vec!["Expect variable name"]);
    }

    #[test]
    fn test_broken_var_declaration_recovers() {
        let (tokens, _) = scan("var x = ; print 2;");
        let (statements, errors) = parse(tokens);
        assert_eq!(errors.len(), 1);
        assert_eq!(statements.len(), 1);
        assert_eq!(stmt_to_sexpr(&statements[0]), "(print 2)");
    }
}
