//! Parsing
//!
//!     A [ParseSession] is the complete, isolated mutable state of one parse: the build
//!     stack, the symbol table, the input channel and a sticky error flag. A parse runs as
//!     follows:
//!
//!         1. The session resets itself and installs the input bytes in its channel.
//!         2. The [GrammarEngine] runs to completion. It sees the session only through a
//!            [BuildContext], which exposes the read/push/reduce/set_error protocol and
//!            nothing else.
//!         3. If the engine flagged a syntax error, the parse fails. Otherwise the stack
//!            must hold exactly one node, which becomes the root of the returned
//!            [ParseTree] together with the symbol table it indexes into.
//!
//!     Sessions are plain values. Use one per logical parse, or reuse one sequentially;
//!     `parse` takes `&mut self`, so nested or concurrent use of a single session does not
//!     compile.

pub mod engine;
pub mod session;
pub mod tree;

pub use engine::{BuildContext, GrammarEngine};
pub use session::{ParseSession, SessionLimits};
pub use tree::ParseTree;
