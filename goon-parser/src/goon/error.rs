//! Error types for parsing
//!
//!     There are two disjoint classes of failure:
//!
//!         1. [ParseError::Syntax]: the source text does not match the grammar. The grammar
//!            engine reported it through `set_error`. No partial tree is exposed.
//!         2. [ParseError::Contract]: the grammar engine broke the build protocol (popped
//!            more than it pushed, left several roots behind, exceeded a configured cap).
//!            These are bugs in the engine wiring. They are fatal: never retry them.

use crate::goon::ast::NodeType;
use thiserror::Error;

/// A broken build protocol invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    #[error("stack underflow: reduce of {node_type} needs {needed} nodes, {available} available")]
    StackUnderflow {
        node_type: NodeType,
        needed: usize,
        available: usize,
    },

    #[error("stack overflow: capacity of {capacity} nodes exceeded")]
    StackOverflow { capacity: usize },

    #[error("symbol capacity of {capacity} entries exceeded")]
    SymbolCapacityExceeded { capacity: usize },

    #[error("{node_type} is not a leaf type and cannot be pushed as one")]
    NotALeaf { node_type: NodeType },

    #[error("leaf type {node_type} cannot be built from {arity} children")]
    LeafReduction { node_type: NodeType, arity: usize },

    #[error("grammar engine finished with {depth} nodes on the stack, expected exactly one")]
    InvalidFinalStack { depth: usize },
}

/// Why a parse produced no tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("syntax error")]
    Syntax,

    #[error("grammar engine contract violation: {0}")]
    Contract(#[from] ContractViolation),
}

impl ParseError {
    /// Contract violations are unrecoverable; syntax errors are ordinary user errors.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ParseError::Contract(_))
    }

    pub fn contract(&self) -> Option<&ContractViolation> {
        match self {
            ParseError::Contract(violation) => Some(violation),
            ParseError::Syntax => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_is_not_fatal() {
        assert!(!ParseError::Syntax.is_fatal());
        assert!(ParseError::Syntax.contract().is_none());
    }

    #[test]
    fn test_contract_violation_is_fatal() {
        let err = ParseError::from(ContractViolation::InvalidFinalStack { depth: 0 });
        assert!(err.is_fatal());
        assert_eq!(
            err.to_string(),
            "grammar engine contract violation: grammar engine finished with 0 nodes on the stack, expected exactly one"
        );
    }

    #[test]
    fn test_underflow_message() {
        let violation = ContractViolation::StackUnderflow {
            node_type: NodeType::Add,
            needed: 2,
            available: 1,
        };
        assert_eq!(
            violation.to_string(),
            "stack underflow: reduce of Add needs 2 nodes, 1 available"
        );
    }
}
