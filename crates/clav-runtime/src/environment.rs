//! Variable storage
//!
//! An ordered stack of scopes. Index 0 is the global scope and is never
//! removed; lookups walk from the innermost scope outward.

use crate::token::Token;
use crate::value::{RuntimeError, Value};
use std::collections::HashMap;

/// Stack of name-to-value scopes
#[derive(Debug, Clone)]
pub struct Environment {
    scopes: Vec<HashMap<String, Value>>,
}

impl Environment {
    /// Create an environment holding only an empty global scope
    pub fn new() -> Self {
        Self {
            scopes: vec![HashMap::new()],
        }
    }

    /// Bind `name` in the innermost scope, replacing a binding of the same
    /// name in that scope only
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.into(), value);
        }
    }

    /// Look up a variable, innermost scope first
    pub fn get(&self, name: &Token) -> Result<Value, RuntimeError> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(&name.lexeme))
            .cloned()
            .ok_or_else(|| undefined(name))
    }

    /// Rebind an existing variable in the nearest scope that defines it.
    ///
    /// Never creates a binding; returns the assigned value.
    pub fn assign(&mut self, name: &Token, value: Value) -> Result<Value, RuntimeError> {
        for scope in self.scopes.iter_mut().rev() {
            if let Some(slot) = scope.get_mut(&name.lexeme) {
                *slot = value.clone();
                return Ok(value);
            }
        }

        Err(undefined(name))
    }

    /// Push a new innermost scope
    pub fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Pop the innermost scope. Returns `false` (and does nothing) when only
    /// the global scope is left.
    pub fn pop_scope(&mut self) -> bool {
        if self.scopes.len() > 1 {
            self.scopes.pop();
            true
        } else {
            false
        }
    }

    /// Number of scopes, globals included
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Check whether any scope binds `name`
    pub fn is_defined(&self, name: &str) -> bool {
        self.scopes.iter().any(|scope| scope.contains_key(name))
    }

    /// Global bindings sorted by name
    pub fn globals(&self) -> Vec<(String, Value)> {
        let mut vars: Vec<(String, Value)> = self
            .scopes
            .first()
            .map(|scope| {
                scope
                    .iter()
                    .map(|(name, value)| (name.clone(), value.clone()))
                    .collect()
            })
            .unwrap_or_default();
        vars.sort_by(|a, b| a.0.cmp(&b.0));
        vars
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

fn undefined(name: &Token) -> RuntimeError {
    RuntimeError::UndefinedVariable {
        name: name.lexeme.clone(),
        line: name.line,
        span: name.span,
    }
}
