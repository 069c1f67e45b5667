//! S-expression rendering of the AST
//!
//! A diagnostic view only; nothing in evaluation depends on it.

use crate::ast::{Expr, Stmt};
use crate::value::Value;

/// Render an expression as an S-expression: `(+ 1 (* 2 3))`
pub fn expr_to_sexpr(expr: &Expr) -> String {
    let mut out = String::new();
    write_expr(&mut out, expr);
    out
}

/// Render a statement as an S-expression: `(print (+ a 2))`
pub fn stmt_to_sexpr(stmt: &Stmt) -> String {
    match stmt {
        Stmt::Expression(expr) => format!("(expr {})", expr_to_sexpr(expr)),
        Stmt::Print(expr) => format!("(print {})", expr_to_sexpr(expr)),
        Stmt::Var(decl) => match &decl.initializer {
            Some(init) => format!("(var {} {})", decl.name.lexeme, expr_to_sexpr(init)),
            None => format!("(var {})", decl.name.lexeme),
        },
    }
}

fn write_expr(out: &mut String, expr: &Expr) {
    match expr {
        Expr::Literal(value) => write_literal(out, value),
        Expr::Grouping(inner) => {
            out.push_str("(group ");
            write_expr(out, inner);
            out.push(')');
        }
        Expr::Unary(unary) => {
            out.push('(');
            out.push_str(&unary.operator.lexeme);
            out.push(' ');
            write_expr(out, &unary.operand);
            out.push(')');
        }
        Expr::Binary(binary) => {
            out.push('(');
            out.push_str(&binary.operator.lexeme);
            out.push(' ');
            write_expr(out, &binary.left);
            out.push(' ');
            write_expr(out, &binary.right);
            out.push(')');
        }
        Expr::Variable(name) => out.push_str(&name.lexeme),
        Expr::Assign(assign) => {
            out.push_str("(= ");
            out.push_str(&assign.name.lexeme);
            out.push(' ');
            write_expr(out, &assign.value);
            out.push(')');
        }
    }
}

fn write_literal(out: &mut String, value: &Value) {
    match value {
        Value::String(s) => {
            out.push('"');
            out.push_str(s);
            out.push('"');
        }
        other => out.push_str(&other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Span;
    use crate::token::{Token, TokenKind};

    fn op(kind: TokenKind, lexeme: &str) -> Token {
        Token::new(kind, lexeme, 1, Span::dummy())
    }

    #[test]
    fn test_nested_expression() {
        // -123 * (45.67)
        let expr = Expr::binary(
            Expr::unary(op(TokenKind::Minus, "-"), Expr::Literal(Value::Number(123.0))),
            op(TokenKind::Star, "*"),
            Expr::grouping(Expr::Literal(Value::Number(45.67))),
        );
        assert_eq!(expr_to_sexpr(&expr), "(* (- 123) (group 45.67))");
    }

    #[test]
    fn test_literals() {
        assert_eq!(expr_to_sexpr(&Expr::Literal(Value::string("x"))), "\"x\"");
        assert_eq!(expr_to_sexpr(&Expr::Literal(Value::Bool(true))), "true");
        assert_eq!(expr_to_sexpr(&Expr::Literal(Value::Nil)), "nil");
    }

    #[test]
    fn test_statements() {
        let name = op(TokenKind::Identifier, "a");
        let decl = Stmt::Var(crate::ast::VarDecl {
            name: name.clone(),
            initializer: None,
        });
        assert_eq!(stmt_to_sexpr(&decl), "(var a)");

        let assign = Stmt::Expression(Expr::assign(name, Expr::Literal(Value::Number(2.0))));
        assert_eq!(stmt_to_sexpr(&assign), "(expr (= a 2))");
    }
}
