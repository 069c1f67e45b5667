//! Abstract Syntax Tree (AST) definitions
//!
//! Expressions own their children outright: the tree has no sharing and no
//! cycles. Nodes keep the tokens they were parsed from so runtime errors can
//! report the operator's line.

pub mod printer;

use crate::token::Token;
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// AST schema version
///
/// Included in JSON dumps. Increment when making breaking changes to the
/// AST structure.
pub const AST_VERSION: u32 = 1;

/// Versioned AST wrapper for JSON serialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionedProgram {
    /// AST schema version
    pub ast_version: u32,
    /// Top-level statements in source order
    pub statements: Vec<Stmt>,
}

impl VersionedProgram {
    /// Create a new versioned program wrapper
    pub fn new(statements: Vec<Stmt>) -> Self {
        Self {
            ast_version: AST_VERSION,
            statements,
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    /// Expression evaluated for its effects: `a = 1;`
    Expression(Expr),
    /// `print expr;`
    Print(Expr),
    /// `var name;` or `var name = expr;`
    Var(VarDecl),
}

/// Variable declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarDecl {
    pub name: Token,
    pub initializer: Option<Expr>,
}

/// Expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// Literal value
    Literal(Value),
    /// Parenthesized expression
    Grouping(Box<Expr>),
    /// Prefix operator
    Unary(UnaryExpr),
    /// Infix operator
    Binary(BinaryExpr),
    /// Variable reference
    Variable(Token),
    /// Assignment to an existing variable
    Assign(AssignExpr),
}

/// Unary expression: `-x`, `!flag`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnaryExpr {
    pub operator: Token,
    pub operand: Box<Expr>,
}

/// Binary expression: `a + b`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
}

/// Assignment expression: `name = value`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignExpr {
    pub name: Token,
    pub value: Box<Expr>,
}

impl Expr {
    /// Build a binary node
    pub fn binary(left: Expr, operator: Token, right: Expr) -> Expr {
        Expr::Binary(BinaryExpr {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }

    /// Build a unary node
    pub fn unary(operator: Token, operand: Expr) -> Expr {
        Expr::Unary(UnaryExpr {
            operator,
            operand: Box::new(operand),
        })
    }

    /// Build a grouping node
    pub fn grouping(inner: Expr) -> Expr {
        Expr::Grouping(Box::new(inner))
    }

    /// Build an assignment node
    pub fn assign(name: Token, value: Expr) -> Expr {
        Expr::Assign(AssignExpr {
            name,
            value: Box::new(value),
        })
    }

    /// Line of the first token this expression was parsed from.
    ///
    /// `None` for bare literals, which keep no token.
    pub fn line(&self) -> Option<u32> {
        match self {
            Expr::Literal(_) => None,
            Expr::Grouping(inner) => inner.line(),
            Expr::Unary(unary) => Some(unary.operator.line),
            Expr::Binary(binary) => binary.left.line().or(Some(binary.operator.line)),
            Expr::Variable(name) => Some(name.line),
            Expr::Assign(assign) => Some(assign.name.line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Span;
    use crate::token::TokenKind;

    #[test]
    fn test_versioned_program_json_roundtrip() {
        let name = Token::new(TokenKind::Identifier, "x", 1, Span::new(4, 5));
        let program = VersionedProgram::new(vec![
            Stmt::Var(VarDecl {
                name,
                initializer: Some(Expr::Literal(Value::Number(1.0))),
            }),
            Stmt::Print(Expr::Literal(Value::string("hi"))),
        ]);

        let json = program.to_json().unwrap();
        assert!(json.contains("\"ast_version\": 1"));

        let restored = VersionedProgram::from_json(&json).unwrap();
        assert_eq!(restored, program);
    }
}
