//! AST node model
//!
//!     The tree produced by a parse is made of [AstNode]s. Every node is tagged with a
//!     [NodeType], carries one integer payload and owns its children by value. Because
//!     children are owned (never shared, never borrowed), the structure is a tree by
//!     construction: no cycles, no aliasing, and dropping a node releases its whole
//!     subtree. A parse that fails half way simply drops whatever was left on the build
//!     stack.
//!
//!     The integer payload means different things per node type:
//!
//!         Number   the literal value
//!         Boolean  1 for true, 0 for false
//!         Symbol   an index into the symbol table of the parse that produced it
//!         others   the unused sentinel, -1
//!
//!     Symbol text is therefore not stored in the tree. Resolve it through
//!     [ParseTree::symbol_text](crate::goon::parsing::ParseTree::symbol_text).

pub mod node;
pub mod snapshot;

pub use node::{child_at, child_count, node_type, node_value, AstNode, NodeType};
pub use snapshot::{snapshot_from_tree, TreeSnapshot};
