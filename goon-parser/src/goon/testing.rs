//! Testing utilities
//!
//!     Two tools cover most of what parser tests need:
//!
//!         1. [ScriptedEngine] replays a fixed list of [BuildOp]s. It exercises the AST core
//!            without any grammar, which is how protocol properties (ordering, underflow,
//!            sticky errors) are tested in isolation from recognition.
//!         2. [assert_tree] is a fluent assertion API over a [ParseTree]. Tests describe the
//!            expected shape rather than walking nodes by hand.
//!
//!     Example:
//!
//!     ```rust,ignore
//!     use goon_parser::goon::testing::assert_tree;
//!
//!     let tree = ParseSession::new().parse_str("x = 1 + 2").unwrap();
//!     assert_tree(&tree)
//!         .node_type(NodeType::Assign)
//!         .child_count(2)
//!         .child(0, |c| { c.symbol("x"); })
//!         .child(1, |c| {
//!             c.node_type(NodeType::Add)
//!                 .child(0, |l| { l.number(1); })
//!                 .child(1, |r| { r.number(2); });
//!         });
//!     ```

pub mod scripted;
pub mod tree_assertions;

pub use scripted::{BuildOp, ScriptedEngine};
pub use tree_assertions::{assert_tree, NodeAssertion};
