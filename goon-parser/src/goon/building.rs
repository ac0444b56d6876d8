//! Tree building primitives
//!
//! This module holds the two working areas a grammar engine mutates while it builds a tree:
//!
//! 1. [BuildStack] - the LIFO of partially assembled subtrees. Leaves are pushed, and a
//!    reduction folds the top N entries into one new node.
//! 2. [SymbolTable] - interned identifier text, addressed by the index stored in Symbol
//!    nodes.
//!
//! Engines never touch these directly; they go through
//! [BuildContext](crate::goon::parsing::BuildContext).

pub mod stack;
pub mod symbols;

pub use stack::BuildStack;
pub use symbols::SymbolTable;
