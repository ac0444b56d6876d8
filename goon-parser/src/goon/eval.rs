//! Tree-walking evaluator
//!
//!     [Runtime] evaluates parse trees against a namespace that outlives any single parse,
//!     which is what a line-by-line REPL needs: `x = 2` on one line and `x * 3` on the
//!     next evaluate to 6.
//!
//!     Semantics:
//!
//!         Number, Boolean, Nil   evaluate to themselves
//!         Symbol                 namespace lookup, unbound names are nil
//!         Assign                 binds the symbol, yields the assigned value
//!         + - * /                integers only, checked for overflow and division by zero
//!         == !=                  equal when both type and value match

pub mod value;

pub use value::Value;

use crate::goon::ast::{AstNode, NodeType};
use crate::goon::error::ParseError;
use crate::goon::parsing::{GrammarEngine, ParseSession, ParseTree};
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("cannot apply {operator} to {left} and {right}")]
    TypeMismatch {
        operator: NodeType,
        left: &'static str,
        right: &'static str,
    },
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow in {0}")]
    Overflow(NodeType),
    #[error("malformed {node_type} node with {children} children")]
    Malformed { node_type: NodeType, children: usize },
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Evaluation state shared across parses.
#[derive(Debug, Clone, Default)]
pub struct Runtime {
    namespace: HashMap<String, Value>,
}

impl Runtime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.namespace.get(name).copied()
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.namespace.insert(name.into(), value);
    }

    /// Bound names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.namespace.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Parses `source` with `session` and evaluates the result.
    pub fn interpret<E: GrammarEngine>(
        &mut self,
        session: &mut ParseSession<E>,
        source: &str,
    ) -> Result<Value, EvalError> {
        let tree = session.parse_str(source)?;
        self.evaluate(&tree)
    }

    pub fn evaluate(&mut self, tree: &ParseTree) -> Result<Value, EvalError> {
        self.eval_node(tree, tree.root())
    }

    fn eval_node(&mut self, tree: &ParseTree, node: &AstNode) -> Result<Value, EvalError> {
        let node_type = node.node_type();
        match node_type {
            NodeType::Number => Ok(Value::Int(node.value())),
            NodeType::Boolean => Ok(Value::Bool(node.value() != 0)),
            NodeType::Nil => Ok(Value::Nil),
            NodeType::Symbol => Ok(self.get(tree.symbol_text(node)).unwrap_or_default()),
            NodeType::Assign => {
                let (target, expr) = operands(node)?;
                if target.node_type() != NodeType::Symbol {
                    return Err(EvalError::Malformed {
                        node_type,
                        children: node.child_count(),
                    });
                }
                let value = self.eval_node(tree, expr)?;
                let name = tree.symbol_text(target);
                debug!(name, %value, "assign");
                self.set(name, value);
                Ok(value)
            }
            NodeType::Compare | NodeType::InverseCompare => {
                let (left, right) = operands(node)?;
                let equal = self.eval_node(tree, left)? == self.eval_node(tree, right)?;
                Ok(Value::Bool(equal == (node_type == NodeType::Compare)))
            }
            NodeType::Add | NodeType::Subtract | NodeType::Multiply | NodeType::Divide => {
                let (left, right) = operands(node)?;
                let left = self.eval_node(tree, left)?;
                let right = self.eval_node(tree, right)?;
                arithmetic(node_type, left, right)
            }
        }
    }
}

fn operands(node: &AstNode) -> Result<(&AstNode, &AstNode), EvalError> {
    match node.children() {
        [left, right] => Ok((left, right)),
        children => Err(EvalError::Malformed {
            node_type: node.node_type(),
            children: children.len(),
        }),
    }
}

fn arithmetic(operator: NodeType, left: Value, right: Value) -> Result<Value, EvalError> {
    let (Value::Int(a), Value::Int(b)) = (left, right) else {
        return Err(EvalError::TypeMismatch {
            operator,
            left: left.type_name(),
            right: right.type_name(),
        });
    };
    let result = match operator {
        NodeType::Add => a.checked_add(b),
        NodeType::Subtract => a.checked_sub(b),
        NodeType::Multiply => a.checked_mul(b),
        NodeType::Divide if b == 0 => return Err(EvalError::DivisionByZero),
        NodeType::Divide => a.checked_div(b),
        _ => None,
    };
    result.map(Value::Int).ok_or(EvalError::Overflow(operator))
}
