//! The reference expression grammar
//!
//!     [ExpressionGrammar] is the grammar engine the workspace ships with. It is an
//!     ordinary [GrammarEngine]: the AST core knows nothing about it beyond the build
//!     primitives it issues.
//!
//!     It pulls the whole source through the channel, tokenizes it with a logos lexer
//!     (see [token]) and runs a recursive-descent recognizer (see [recognizer]) over:
//!
//!         program    = TERM* statement TERM*
//!         statement  = IDENT "=" expression
//!                    / expression
//!         expression = sum (("==" | "!=") sum)*
//!         sum        = product (("+" | "-") product)*
//!         product    = value (("*" | "/") value)*
//!         value      = NUMBER / "true" / "false" / "nil" / IDENT / "(" expression ")"
//!
//!     TERM is a newline or `;`. All binary operators are left-associative.
//!
//!     Two bounds keep recognition and everything downstream of it off the call stack's
//!     edge: `max_nesting` caps parenthesis nesting (recursion in the recognizer) and
//!     `max_depth` caps the height of the built tree. A left-assoc chain like `1+1+...+1`
//!     never nests a parenthesis but grows the tree by one level per operator. Input past
//!     either bound is a syntax error.

pub mod recognizer;
pub mod token;

use crate::goon::error::ContractViolation;
use crate::goon::parsing::{BuildContext, GrammarEngine};
use recognizer::Recognizer;
use tracing::debug;

/// Default bound on parenthesis nesting.
pub const DEFAULT_MAX_NESTING: usize = 256;

/// Default bound on the height of a built tree, counted in nodes.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Recognizer for the goon expression/assignment grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpressionGrammar {
    max_nesting: usize,
    max_depth: usize,
}

impl ExpressionGrammar {
    pub fn new() -> Self {
        Self {
            max_nesting: DEFAULT_MAX_NESTING,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Deeper parenthesis nesting is reported as a syntax error.
    pub fn with_max_nesting(mut self, max_nesting: usize) -> Self {
        self.max_nesting = max_nesting;
        self
    }

    pub fn max_nesting(&self) -> usize {
        self.max_nesting
    }

    /// Statements whose tree would be taller than `max_depth` nodes are rejected.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for ExpressionGrammar {
    fn default() -> Self {
        Self::new()
    }
}

impl GrammarEngine for ExpressionGrammar {
    fn recognize(&mut self, ctx: &mut BuildContext<'_>) -> Result<(), ContractViolation> {
        let bytes = ctx.read_to_end();
        let Ok(source) = std::str::from_utf8(&bytes) else {
            debug!("source is not valid UTF-8");
            ctx.set_error();
            return Ok(());
        };
        let tokens = match token::tokenize(source) {
            Ok(tokens) => tokens,
            Err(err) => {
                debug!(%err, "lexing failed");
                ctx.set_error();
                return Ok(());
            }
        };
        Recognizer::new(&tokens, ctx, *self).program()
    }
}
