//! Statement execution

use crate::ast::printer::stmt_to_sexpr;
use crate::ast::{Stmt, VarDecl};
use crate::interpreter::Interpreter;
use crate::value::{RuntimeError, Value};

impl Interpreter {
    /// Execute a statement
    pub fn execute(&mut self, stmt: &Stmt) -> Result<(), RuntimeError> {
        tracing::trace!(statement = %stmt_to_sexpr(stmt), "execute");

        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
                Ok(())
            }
            Stmt::Print(expr) => {
                let value = self.evaluate(expr)?;
                writeln!(self.output, "{}", value).map_err(|e| RuntimeError::Io {
                    message: e.to_string(),
                    line: expr.line().unwrap_or(0),
                })
            }
            Stmt::Var(decl) => self.exec_var_decl(decl),
        }
    }

    /// Bind a declared variable, `nil` when there is no initializer
    fn exec_var_decl(&mut self, decl: &VarDecl) -> Result<(), RuntimeError> {
        let value = match &decl.initializer {
            Some(init) => self.evaluate(init)?,
            None => Value::Nil,
        };
        self.environment.define(decl.name.lexeme.clone(), value);
        Ok(())
    }
}
