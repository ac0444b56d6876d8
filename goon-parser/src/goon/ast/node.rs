//! Node types and the owned tree node

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of an AST node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    Number,
    Boolean,
    Symbol,
    Nil,
    Assign,
    Add,
    Subtract,
    Multiply,
    Divide,
    Compare,
    InverseCompare,
}

impl NodeType {
    pub const ALL: [NodeType; 11] = [
        NodeType::Number,
        NodeType::Boolean,
        NodeType::Symbol,
        NodeType::Nil,
        NodeType::Assign,
        NodeType::Add,
        NodeType::Subtract,
        NodeType::Multiply,
        NodeType::Divide,
        NodeType::Compare,
        NodeType::InverseCompare,
    ];

    /// Leaves never have children.
    pub fn is_leaf(self) -> bool {
        matches!(
            self,
            NodeType::Number | NodeType::Boolean | NodeType::Symbol | NodeType::Nil
        )
    }

    /// Number of children the grammar production for this type carries.
    pub fn arity(self) -> usize {
        if self.is_leaf() {
            0
        } else {
            2
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            NodeType::Number => "Number",
            NodeType::Boolean => "Boolean",
            NodeType::Symbol => "Symbol",
            NodeType::Nil => "Nil",
            NodeType::Assign => "Assign",
            NodeType::Add => "Add",
            NodeType::Subtract => "Subtract",
            NodeType::Multiply => "Multiply",
            NodeType::Divide => "Divide",
            NodeType::Compare => "Compare",
            NodeType::InverseCompare => "InverseCompare",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A node of the parse tree. Children are owned exclusively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstNode {
    node_type: NodeType,
    value: i64,
    children: Vec<AstNode>,
}

impl AstNode {
    /// Payload of nodes that carry no value.
    pub const UNUSED_VALUE: i64 = -1;

    /// Creates a childless node.
    pub fn leaf(node_type: NodeType, value: i64) -> Self {
        Self {
            node_type,
            value,
            children: Vec::new(),
        }
    }

    pub fn nil() -> Self {
        Self::leaf(NodeType::Nil, Self::UNUSED_VALUE)
    }

    /// Creates an internal node over `children`, kept in the given order.
    pub fn branch(node_type: NodeType, children: Vec<AstNode>) -> Self {
        Self {
            node_type,
            value: Self::UNUSED_VALUE,
            children,
        }
    }

    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn children(&self) -> &[AstNode] {
        &self.children
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Returns the child at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.child_count()`. Callers are expected to check the
    /// count first; an out of range index is a bug, not a recoverable condition.
    pub fn child_at(&self, index: usize) -> &AstNode {
        match self.children.get(index) {
            Some(child) => child,
            None => panic!(
                "child index {} out of range for {} node with {} children",
                index,
                self.node_type,
                self.children.len()
            ),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn size(&self) -> usize {
        self.walk().count()
    }

    /// Length of the longest root-to-leaf path, counting nodes.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 1)];
        while let Some((node, level)) = pending.pop() {
            deepest = deepest.max(level);
            pending.extend(node.children.iter().map(|child| (child, level + 1)));
        }
        deepest
    }

    /// Pre-order walk over this subtree.
    pub fn walk(&self) -> impl Iterator<Item = &AstNode> {
        let mut pending = vec![self];
        std::iter::from_fn(move || {
            let node = pending.pop()?;
            pending.extend(node.children.iter().rev());
            Some(node)
        })
    }
}

// Left-deep chains get arbitrarily deep; release them without recursing.
impl Drop for AstNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

pub fn node_type(node: &AstNode) -> NodeType {
    node.node_type()
}

pub fn node_value(node: &AstNode) -> i64 {
    node.value()
}

pub fn child_count(node: &AstNode) -> usize {
    node.child_count()
}

/// See [AstNode::child_at].
pub fn child_at(node: &AstNode, index: usize) -> &AstNode {
    node.child_at(index)
}
