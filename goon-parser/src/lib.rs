//! # goon
//!
//! Callback-driven AST assembly for the goon expression language.
//!
//! The parser is split in two halves that only meet through a narrow protocol:
//!
//!   - A grammar engine recognizes the source text. It pulls bytes from an
//!     [input channel](goon::input) and, for every production it matches,
//!     issues one build primitive (push a leaf, push a nil, or reduce).
//!   - The AST core ([session](goon::parsing::ParseSession) plus its
//!     [build stack](goon::building)) turns that post-order stream of
//!     primitives into a single rooted tree.
//!
//! Layout
//!
//! src/goon
//!   ├── ast          Node model, accessors and serializable snapshots
//!   ├── building     Build stack and symbol table
//!   ├── input        Pull-based byte source
//!   ├── parsing      Session, engine protocol and errors
//!   ├── grammar      The reference expression grammar engine
//!   ├── eval         Tree-walking evaluator used by the REPL
//!   ├── formats      Treeviz, tag, json and yaml renderers
//!   └── testing      Scripted engines and fluent tree assertions
//!
//! For the test helpers, see the [testing module](goon::testing).

pub mod goon;

pub use goon::ast::{child_at, child_count, node_type, node_value, AstNode, NodeType};
pub use goon::error::{ContractViolation, ParseError};
pub use goon::grammar::ExpressionGrammar;
pub use goon::parsing::{BuildContext, GrammarEngine, ParseSession, ParseTree, SessionLimits};
