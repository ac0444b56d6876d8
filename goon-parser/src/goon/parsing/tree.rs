//! The result of a successful parse

use crate::goon::ast::{AstNode, NodeType};
use crate::goon::building::SymbolTable;

/// A root node plus the symbol table its Symbol nodes index into.
///
/// The session hands both over on success; the caller owns them from then on and they
/// stay valid across later parses on the same session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTree {
    root: AstNode,
    symbols: SymbolTable,
}

impl ParseTree {
    pub fn new(root: AstNode, symbols: SymbolTable) -> Self {
        Self { root, symbols }
    }

    pub fn root(&self) -> &AstNode {
        &self.root
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn into_root(self) -> AstNode {
        self.root
    }

    pub fn into_parts(self) -> (AstNode, SymbolTable) {
        (self.root, self.symbols)
    }

    /// Resolves the text of a Symbol node from this tree.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not a Symbol or its index was not interned by this parse.
    pub fn symbol_text(&self, node: &AstNode) -> &str {
        assert_eq!(
            node.node_type(),
            NodeType::Symbol,
            "symbol_text called on a {} node",
            node.node_type()
        );
        match self.try_symbol_text(node) {
            Some(text) => text,
            None => panic!(
                "symbol index {} was not interned by this parse ({} symbols)",
                node.value(),
                self.symbols.len()
            ),
        }
    }

    /// Like [symbol_text](Self::symbol_text), but `None` instead of panicking.
    pub fn try_symbol_text(&self, node: &AstNode) -> Option<&str> {
        if node.node_type() != NodeType::Symbol {
            return None;
        }
        let index = usize::try_from(node.value()).ok()?;
        self.symbols.lookup(index)
    }
}
