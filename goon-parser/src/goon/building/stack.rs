//! The build stack
//!
//!     Grammar engines emit build primitives in post-order: children before parents. The
//!     stack therefore always holds a forest of finished subtrees, and a reduction of arity
//!     k takes the k most recent ones as the children of a new node.
//!
//!     Popping returns the rightmost child first, so [BuildStack::reduce] must restore
//!     left-to-right order before attaching. It does so by splitting the tail of the
//!     backing vector off in one piece, which keeps the original order and never reads
//!     below the bottom of the stack.

use crate::goon::ast::{AstNode, NodeType};
use crate::goon::error::ContractViolation;
use tracing::trace;

/// Bounded LIFO of subtrees under construction.
#[derive(Debug, Clone, Default)]
pub struct BuildStack {
    nodes: Vec<AstNode>,
    capacity: Option<usize>,
}

impl BuildStack {
    /// An unbounded stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// A stack that refuses to grow past `capacity` nodes.
    pub fn with_capacity_limit(capacity: usize) -> Self {
        Self {
            nodes: Vec::new(),
            capacity: Some(capacity),
        }
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn set_capacity(&mut self, capacity: Option<usize>) {
        self.capacity = capacity;
    }

    /// Current depth.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn peek(&self) -> Option<&AstNode> {
        self.nodes.last()
    }

    /// Pushes a childless node of a leaf type.
    pub fn push_leaf(&mut self, node_type: NodeType, value: i64) -> Result<(), ContractViolation> {
        if !node_type.is_leaf() {
            return Err(ContractViolation::NotALeaf { node_type });
        }
        trace!(%node_type, value, depth = self.nodes.len(), "push leaf");
        self.push(AstNode::leaf(node_type, value))
    }

    /// Pushes the sentinel for an elided optional production.
    pub fn push_nil(&mut self) -> Result<(), ContractViolation> {
        trace!(depth = self.nodes.len(), "push nil");
        self.push(AstNode::nil())
    }

    /// Replaces the top `arity` nodes with one `node_type` node owning them in their
    /// original left-to-right order.
    ///
    /// On underflow the stack is left untouched.
    pub fn reduce(&mut self, node_type: NodeType, arity: usize) -> Result<(), ContractViolation> {
        if node_type.is_leaf() && arity > 0 {
            return Err(ContractViolation::LeafReduction { node_type, arity });
        }
        let available = self.nodes.len();
        if arity > available {
            return Err(ContractViolation::StackUnderflow {
                node_type,
                needed: arity,
                available,
            });
        }

        let children = self.nodes.split_off(available - arity);
        trace!(%node_type, arity, depth = self.nodes.len(), "reduce");
        // The new node takes the slot its children vacated, so this cannot overflow.
        self.nodes.push(AstNode::branch(node_type, children));
        Ok(())
    }

    /// Removes the top node. `None` on an empty stack.
    pub fn pop(&mut self) -> Option<AstNode> {
        self.nodes.pop()
    }

    /// Drops every node. Partially built subtrees are released here.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    fn push(&mut self, node: AstNode) -> Result<(), ContractViolation> {
        if let Some(capacity) = self.capacity {
            if self.nodes.len() >= capacity {
                return Err(ContractViolation::StackOverflow { capacity });
            }
        }
        self.nodes.push(node);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce_keeps_production_order() {
        let mut stack = BuildStack::new();
        stack.push_leaf(NodeType::Number, 1).unwrap();
        stack.push_leaf(NodeType::Number, 2).unwrap();
        stack.push_leaf(NodeType::Number, 3).unwrap();
        stack.reduce(NodeType::Add, 3).unwrap();

        assert_eq!(stack.len(), 1);
        let node = stack.pop().unwrap();
        let values: Vec<i64> = node.children().iter().map(AstNode::value).collect();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn test_reduce_only_consumes_top_entries() {
        let mut stack = BuildStack::new();
        stack.push_leaf(NodeType::Symbol, 0).unwrap();
        stack.push_leaf(NodeType::Number, 4).unwrap();
        stack.push_leaf(NodeType::Number, 5).unwrap();
        stack.reduce(NodeType::Multiply, 2).unwrap();

        assert_eq!(stack.len(), 2);
        assert_eq!(stack.peek().unwrap().node_type(), NodeType::Multiply);
        stack.reduce(NodeType::Assign, 2).unwrap();
        let root = stack.pop().unwrap();
        assert_eq!(root.child_at(0).node_type(), NodeType::Symbol);
        assert_eq!(root.child_at(1).node_type(), NodeType::Multiply);
    }

    #[test]
    fn test_reduce_underflow_leaves_stack_untouched() {
        let mut stack = BuildStack::new();
        stack.push_leaf(NodeType::Number, 7).unwrap();

        let err = stack.reduce(NodeType::Add, 2).unwrap_err();
        assert_eq!(
            err,
            ContractViolation::StackUnderflow {
                node_type: NodeType::Add,
                needed: 2,
                available: 1
            }
        );
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.peek().unwrap().value(), 7);
    }

    #[test]
    fn test_reduce_on_empty_stack_underflows() {
        let mut stack = BuildStack::new();
        assert!(matches!(
            stack.reduce(NodeType::Compare, 2),
            Err(ContractViolation::StackUnderflow { available: 0, .. })
        ));
    }

    #[test]
    fn test_zero_arity_reduce_pushes_childless_branch() {
        let mut stack = BuildStack::new();
        stack.reduce(NodeType::Add, 0).unwrap();
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.peek().unwrap().child_count(), 0);
    }

    #[test]
    fn test_leaf_type_checks() {
        let mut stack = BuildStack::new();
        assert_eq!(
            stack.push_leaf(NodeType::Add, 0),
            Err(ContractViolation::NotALeaf {
                node_type: NodeType::Add
            })
        );
        stack.push_nil().unwrap();
        assert_eq!(
            stack.reduce(NodeType::Number, 1),
            Err(ContractViolation::LeafReduction {
                node_type: NodeType::Number,
                arity: 1
            })
        );
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_capacity_limit() {
        let mut stack = BuildStack::with_capacity_limit(2);
        stack.push_leaf(NodeType::Number, 1).unwrap();
        stack.push_nil().unwrap();
        assert_eq!(
            stack.push_leaf(NodeType::Number, 3),
            Err(ContractViolation::StackOverflow { capacity: 2 })
        );
        // A full stack can still reduce: the result reuses a freed slot.
        stack.reduce(NodeType::Add, 2).unwrap();
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_pop_on_empty_is_none() {
        let mut stack = BuildStack::new();
        assert!(stack.pop().is_none());
        assert!(stack.peek().is_none());
    }
}
