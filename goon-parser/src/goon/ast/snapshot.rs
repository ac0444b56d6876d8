//! Tree snapshots - a self-contained, serializable copy of a parse tree
//!
//! A snapshot resolves symbol indices to their text, so it can be rendered or shipped
//! without the symbol table. All serializers (json, yaml, treeviz, tag) consume snapshots
//! rather than walking [AstNode]s themselves.

use super::node::{AstNode, NodeType};
use crate::goon::building::SymbolTable;
use crate::goon::parsing::ParseTree;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeSnapshot {
    pub node_type: NodeType,
    pub value: i64,

    /// Resolved text, for Symbol nodes only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeSnapshot>,
}

impl TreeSnapshot {
    /// Human readable label, e.g. `Number 5`, `Symbol x`, `Add`.
    pub fn label(&self, show_values: bool) -> String {
        if !show_values {
            return self.node_type.name().to_string();
        }
        match self.node_type {
            NodeType::Number => format!("Number {}", self.value),
            NodeType::Boolean => format!("Boolean {}", self.value != 0),
            NodeType::Symbol => match &self.symbol {
                Some(text) => format!("Symbol {}", text),
                None => format!("Symbol #{}", self.value),
            },
            other => other.name().to_string(),
        }
    }
}

/// Snapshot of a whole parse tree.
pub fn snapshot_from_tree(tree: &ParseTree) -> TreeSnapshot {
    snapshot_node(tree.root(), tree.symbols())
}

/// Snapshot of `node`, resolving symbols through `symbols`.
pub fn snapshot_node(node: &AstNode, symbols: &SymbolTable) -> TreeSnapshot {
    let symbol = if node.node_type() == NodeType::Symbol {
        usize::try_from(node.value())
            .ok()
            .and_then(|index| symbols.lookup(index))
            .map(str::to_string)
    } else {
        None
    };

    TreeSnapshot {
        node_type: node.node_type(),
        value: node.value(),
        symbol,
        children: node
            .children()
            .iter()
            .map(|child| snapshot_node(child, symbols))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goon::parsing::ParseSession;

    #[test]
    fn test_snapshot_resolves_symbols() {
        let tree = ParseSession::new().parse_str("x = 5").unwrap();
        let snapshot = snapshot_from_tree(&tree);

        assert_eq!(snapshot.node_type, NodeType::Assign);
        assert_eq!(snapshot.children[0].symbol.as_deref(), Some("x"));
        assert_eq!(snapshot.children[1].symbol, None);
        assert_eq!(snapshot.children[1].value, 5);
    }

    #[test]
    fn test_labels() {
        let tree = ParseSession::new().parse_str("flag = true").unwrap();
        let snapshot = snapshot_from_tree(&tree);

        assert_eq!(snapshot.label(true), "Assign");
        assert_eq!(snapshot.children[0].label(true), "Symbol flag");
        assert_eq!(snapshot.children[1].label(true), "Boolean true");
        assert_eq!(snapshot.children[1].label(false), "Boolean");
    }

    #[test]
    fn test_json_shape() {
        let tree = ParseSession::new().parse_str("n = 1").unwrap();
        let json = serde_json::to_value(snapshot_from_tree(&tree)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "node_type": "Assign",
                "value": -1,
                "children": [
                    {"node_type": "Symbol", "value": 0, "symbol": "n"},
                    {"node_type": "Number", "value": 1}
                ]
            })
        );
        let back: TreeSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(back, snapshot_from_tree(&tree));
    }
}
