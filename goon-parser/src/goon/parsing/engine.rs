//! The grammar engine protocol
//!
//!     An engine recognizes the source text and, for every production it matches, issues
//!     exactly one build primitive, children before parents:
//!
//!         push_leaf / push_number / push_boolean / push_symbol   leaf productions
//!         push_nil                                               elided optional parts
//!         reduce(node_type, arity)                               everything else
//!
//!     On a failed match it calls [BuildContext::set_error] and stops building. The context
//!     enforces the second half: once the error flag is up, build primitives are accepted
//!     and ignored.
//!
//!     Primitives return a [ContractViolation] when the engine breaks the protocol. Engines
//!     should propagate it with `?`. The context also latches the first violation, so a
//!     session reports it even if an engine drops the result on the floor.

use crate::goon::ast::NodeType;
use crate::goon::error::ContractViolation;
use crate::goon::parsing::session::SessionState;
use tracing::debug;

/// A recognizer that drives tree construction through a [BuildContext].
pub trait GrammarEngine {
    fn recognize(&mut self, ctx: &mut BuildContext<'_>) -> Result<(), ContractViolation>;
}

impl<F> GrammarEngine for F
where
    F: FnMut(&mut BuildContext<'_>) -> Result<(), ContractViolation>,
{
    fn recognize(&mut self, ctx: &mut BuildContext<'_>) -> Result<(), ContractViolation> {
        self(ctx)
    }
}

/// The view of a session handed to a running engine.
pub struct BuildContext<'s> {
    state: &'s mut SessionState,
}

impl<'s> BuildContext<'s> {
    pub(crate) fn new(state: &'s mut SessionState) -> Self {
        Self { state }
    }

    /// Pulls up to `buf.len()` bytes of source. Zero means end of input.
    pub fn read(&mut self, buf: &mut [u8]) -> usize {
        self.state.input.read(buf)
    }

    /// Pulls the rest of the source.
    pub fn read_to_end(&mut self) -> Vec<u8> {
        self.state.input.read_to_end()
    }

    pub fn push_leaf(&mut self, node_type: NodeType, value: i64) -> Result<(), ContractViolation> {
        if self.state.error {
            return Ok(());
        }
        let result = self.state.stack.push_leaf(node_type, value);
        self.latch(result)
    }

    pub fn push_number(&mut self, value: i64) -> Result<(), ContractViolation> {
        self.push_leaf(NodeType::Number, value)
    }

    pub fn push_boolean(&mut self, value: bool) -> Result<(), ContractViolation> {
        self.push_leaf(NodeType::Boolean, i64::from(value))
    }

    /// Interns `text` and pushes a Symbol leaf pointing at the new entry.
    pub fn push_symbol(&mut self, text: &str) -> Result<(), ContractViolation> {
        let Some(index) = self.intern(text)? else {
            return Ok(());
        };
        // Symbol tables are capped well below i64::MAX.
        self.push_leaf(NodeType::Symbol, index as i64)
    }

    pub fn push_nil(&mut self) -> Result<(), ContractViolation> {
        if self.state.error {
            return Ok(());
        }
        let result = self.state.stack.push_nil();
        self.latch(result)
    }

    pub fn reduce(&mut self, node_type: NodeType, arity: usize) -> Result<(), ContractViolation> {
        if self.state.error {
            return Ok(());
        }
        let result = self.state.stack.reduce(node_type, arity);
        self.latch(result)
    }

    /// Stores `text` in the symbol table without pushing anything. `None` once the error
    /// flag is up: nothing is stored then.
    pub fn intern(&mut self, text: &str) -> Result<Option<usize>, ContractViolation> {
        if self.state.error {
            return Ok(None);
        }
        let result = self.state.symbols.intern(text);
        self.latch(result).map(Some)
    }

    /// Flags the parse as failed. Sticky: later calls change nothing.
    pub fn set_error(&mut self) {
        if !self.state.error {
            debug!(
                position = self.state.input.position(),
                depth = self.state.stack.len(),
                "grammar engine reported a syntax error"
            );
            self.state.error = true;
        }
    }

    pub fn has_error(&self) -> bool {
        self.state.error
    }

    /// Current build stack depth.
    pub fn depth(&self) -> usize {
        self.state.stack.len()
    }

    fn latch<T>(&mut self, result: Result<T, ContractViolation>) -> Result<T, ContractViolation> {
        if let Err(violation) = &result {
            if self.state.violation.is_none() {
                self.state.violation = Some(violation.clone());
            }
        }
        result
    }
}
