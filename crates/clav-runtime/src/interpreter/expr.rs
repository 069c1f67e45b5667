//! Expression evaluation

use crate::ast::{BinaryExpr, Expr, UnaryExpr};
use crate::interpreter::Interpreter;
use crate::token::{Token, TokenKind};
use crate::value::{RuntimeError, Value};

impl Interpreter {
    /// Evaluate an expression
    pub fn evaluate(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Grouping(inner) => self.evaluate(inner),
            Expr::Unary(unary) => self.eval_unary(unary),
            Expr::Binary(binary) => self.eval_binary(binary),
            Expr::Variable(name) => self.environment.get(name),
            Expr::Assign(assign) => {
                let value = self.evaluate(&assign.value)?;
                self.environment.assign(&assign.name, value)
            }
        }
    }

    /// Evaluate a unary expression. No truthiness: `!` wants a boolean.
    fn eval_unary(&mut self, unary: &UnaryExpr) -> Result<Value, RuntimeError> {
        let operand = self.evaluate(&unary.operand)?;
        let op = &unary.operator;

        match (op.kind, operand) {
            (TokenKind::Minus, Value::Number(n)) => Ok(Value::Number(-n)),
            (TokenKind::Minus, other) => Err(type_error(
                op,
                format!("Cannot negate non-numeric type {}", other.type_name()),
            )),
            (TokenKind::Bang, Value::Bool(b)) => Ok(Value::Bool(!b)),
            (TokenKind::Bang, other) => Err(type_error(
                op,
                format!("Cannot apply '!' to non-boolean type {}", other.type_name()),
            )),
            (_, _) => Err(type_error(
                op,
                format!("Unknown unary operator '{}'", op.lexeme),
            )),
        }
    }

    /// Evaluate a binary expression, left operand first
    fn eval_binary(&mut self, binary: &BinaryExpr) -> Result<Value, RuntimeError> {
        let left = self.evaluate(&binary.left)?;
        let right = self.evaluate(&binary.right)?;
        let op = &binary.operator;

        match op.kind {
            TokenKind::Plus => add(op, left, right),
            TokenKind::Minus => {
                let (a, b) = numeric_operands(op, "subtract", &left, &right)?;
                Ok(Value::Number(a - b))
            }
            TokenKind::Star => {
                let (a, b) = numeric_operands(op, "multiply", &left, &right)?;
                Ok(Value::Number(a * b))
            }
            // IEEE division: x / 0 is ±inf or NaN, never an error
            TokenKind::Slash => {
                let (a, b) = numeric_operands(op, "divide", &left, &right)?;
                Ok(Value::Number(a / b))
            }
            TokenKind::Greater => numeric_comparison(op, &left, &right, |a, b| a > b),
            TokenKind::GreaterEqual => numeric_comparison(op, &left, &right, |a, b| a >= b),
            TokenKind::Less => numeric_comparison(op, &left, &right, |a, b| a < b),
            TokenKind::LessEqual => numeric_comparison(op, &left, &right, |a, b| a <= b),
            TokenKind::EqualEqual => Ok(Value::Bool(equality(op, &left, &right)?)),
            TokenKind::BangEqual => Ok(Value::Bool(!equality(op, &left, &right)?)),
            _ => Err(type_error(
                op,
                format!("Unknown binary operator '{}'", op.lexeme),
            )),
        }
    }
}

fn type_error(op: &Token, message: String) -> RuntimeError {
    RuntimeError::TypeError {
        message,
        line: op.line,
        span: op.span,
    }
}

/// Numeric addition or string concatenation; mixed operands are rejected
fn add(op: &Token, left: Value, right: Value) -> Result<Value, RuntimeError> {
    match (&left, &right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        (Value::String(a), Value::String(b)) => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(a);
            joined.push_str(b);
            Ok(Value::string(joined))
        }
        _ if is_addable(&left) || is_addable(&right) => Err(type_error(
            op,
            format!(
                "Cannot add {} and {}",
                left.type_name(),
                right.type_name()
            ),
        )),
        _ => Err(type_error(
            op,
            format!("Can only add numbers or strings, found {}", left.type_name()),
        )),
    }
}

fn is_addable(value: &Value) -> bool {
    matches!(value, Value::Number(_) | Value::String(_))
}

/// Both operands as numbers, or a type error naming the first offender
fn numeric_operands(
    op: &Token,
    verb: &str,
    left: &Value,
    right: &Value,
) -> Result<(f64, f64), RuntimeError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        (Value::Number(_), other) | (other, _) => Err(type_error(
            op,
            format!("Cannot {} non-numeric type {}", verb, other.type_name()),
        )),
    }
}

fn numeric_comparison<F>(
    op: &Token,
    left: &Value,
    right: &Value,
    cmp: F,
) -> Result<Value, RuntimeError>
where
    F: FnOnce(f64, f64) -> bool,
{
    let (a, b) = numeric_operands(op, "order", left, right)?;
    Ok(Value::Bool(cmp(a, b)))
}

fn equality(op: &Token, left: &Value, right: &Value) -> Result<bool, RuntimeError> {
    left.same_variant_eq(right).ok_or_else(|| {
        type_error(
            op,
            format!(
                "Cannot compare values of different types ({} and {})",
                left.type_name(),
                right.type_name()
            ),
        )
    })
}
