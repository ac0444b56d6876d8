//! Fluent assertions over parse trees

use crate::goon::ast::{AstNode, NodeType};
use crate::goon::parsing::ParseTree;

/// Start asserting on the root of `tree`.
pub fn assert_tree(tree: &ParseTree) -> NodeAssertion<'_> {
    NodeAssertion {
        tree,
        node: tree.root(),
        context: "root".to_string(),
    }
}

pub struct NodeAssertion<'a> {
    tree: &'a ParseTree,
    node: &'a AstNode,
    context: String,
}

impl<'a> NodeAssertion<'a> {
    pub fn node_type(self, expected: NodeType) -> Self {
        assert_eq!(
            self.node.node_type(),
            expected,
            "{}: expected {} node, found {}",
            self.context,
            expected,
            self.node.node_type()
        );
        self
    }

    pub fn value(self, expected: i64) -> Self {
        assert_eq!(
            self.node.value(),
            expected,
            "{}: expected value {}, found {}",
            self.context,
            expected,
            self.node.value()
        );
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        assert_eq!(
            self.node.child_count(),
            expected,
            "{}: expected {} children, found {}",
            self.context,
            expected,
            self.node.child_count()
        );
        self
    }

    /// A Number leaf with `expected` as its value.
    pub fn number(self, expected: i64) -> Self {
        self.node_type(NodeType::Number).value(expected).child_count(0)
    }

    pub fn boolean(self, expected: bool) -> Self {
        self.node_type(NodeType::Boolean)
            .value(i64::from(expected))
            .child_count(0)
    }

    pub fn nil(self) -> Self {
        self.node_type(NodeType::Nil).child_count(0)
    }

    /// A Symbol leaf resolving to `expected`.
    pub fn symbol(self, expected: &str) -> Self {
        let this = self.node_type(NodeType::Symbol).child_count(0);
        let text = this.tree.symbol_text(this.node);
        assert_eq!(
            text, expected,
            "{}: expected symbol {:?}, found {:?}",
            this.context, expected, text
        );
        this
    }

    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        assert!(
            index < self.node.child_count(),
            "{}: child index {} out of bounds ({} children)",
            self.context,
            index,
            self.node.child_count()
        );
        assertion(NodeAssertion {
            tree: self.tree,
            node: self.node.child_at(index),
            context: format!("{}[{}]", self.context, index),
        });
        self
    }

    /// Checks the node types of all children, in order.
    pub fn child_types(self, expected: &[NodeType]) -> Self {
        let actual: Vec<NodeType> = self.node.children().iter().map(AstNode::node_type).collect();
        assert_eq!(
            actual, expected,
            "{}: unexpected child types",
            self.context
        );
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goon::parsing::ParseSession;

    #[test]
    fn test_passing_assertions() {
        let tree = ParseSession::new().parse_str("x = y == nil").unwrap();
        assert_tree(&tree)
            .node_type(NodeType::Assign)
            .child_types(&[NodeType::Symbol, NodeType::Compare])
            .child(0, |c| {
                c.symbol("x");
            })
            .child(1, |c| {
                c.child(0, |l| {
                    l.symbol("y");
                })
                .child(1, |r| {
                    r.nil();
                });
            });
    }

    #[test]
    #[should_panic(expected = "root[1]: expected value 6, found 5")]
    fn test_failure_message_carries_path() {
        let tree = ParseSession::new().parse_str("x = 5").unwrap();
        assert_tree(&tree).child(1, |c| {
            c.value(6);
        });
    }
}
