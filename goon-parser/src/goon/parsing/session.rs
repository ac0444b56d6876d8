//! Parse sessions

use crate::goon::building::{BuildStack, SymbolTable};
use crate::goon::error::{ContractViolation, ParseError};
use crate::goon::grammar::ExpressionGrammar;
use crate::goon::input::InputChannel;
use crate::goon::parsing::engine::{BuildContext, GrammarEngine};
use crate::goon::parsing::tree::ParseTree;
use tracing::{debug, warn};

/// Default cap for both the stack depth and the symbol count.
pub const DEFAULT_LIMIT: usize = 1024;

/// Optional caps on the working areas of a session. `None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionLimits {
    pub max_stack_depth: Option<usize>,
    pub max_symbols: Option<usize>,
}

impl SessionLimits {
    pub fn unbounded() -> Self {
        Self {
            max_stack_depth: None,
            max_symbols: None,
        }
    }

    pub fn with_max_stack_depth(mut self, depth: usize) -> Self {
        self.max_stack_depth = Some(depth);
        self
    }

    pub fn with_max_symbols(mut self, symbols: usize) -> Self {
        self.max_symbols = Some(symbols);
        self
    }
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            max_stack_depth: Some(DEFAULT_LIMIT),
            max_symbols: Some(DEFAULT_LIMIT),
        }
    }
}

/// Everything a running engine may mutate.
#[derive(Debug, Default)]
pub(crate) struct SessionState {
    pub(crate) stack: BuildStack,
    pub(crate) symbols: SymbolTable,
    pub(crate) input: InputChannel,
    pub(crate) error: bool,
    pub(crate) violation: Option<ContractViolation>,
}

impl SessionState {
    fn with_limits(limits: SessionLimits) -> Self {
        let mut stack = BuildStack::new();
        stack.set_capacity(limits.max_stack_depth);
        let symbols = match limits.max_symbols {
            Some(capacity) => SymbolTable::with_capacity_limit(capacity),
            None => SymbolTable::new(),
        };
        Self {
            stack,
            symbols,
            ..Self::default()
        }
    }

    fn reset(&mut self) {
        self.stack.clear();
        self.symbols.clear();
        self.input.clear();
        self.error = false;
        self.violation = None;
    }
}

/// The isolated state of one parse, reusable for later, non-overlapping parses.
///
/// ```rust,ignore
/// let mut session = ParseSession::new();
/// let tree = session.parse(b"x = 5")?;
/// assert_eq!(tree.root().node_type(), NodeType::Assign);
/// ```
#[derive(Debug)]
pub struct ParseSession<E = ExpressionGrammar> {
    state: SessionState,
    engine: E,
    limits: SessionLimits,
}

impl ParseSession<ExpressionGrammar> {
    /// A session running the reference expression grammar with default limits.
    pub fn new() -> Self {
        Self::with_engine(ExpressionGrammar::new())
    }

    pub fn with_limits(limits: SessionLimits) -> Self {
        Self::with_engine_and_limits(ExpressionGrammar::new(), limits)
    }
}

impl Default for ParseSession<ExpressionGrammar> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: GrammarEngine> ParseSession<E> {
    pub fn with_engine(engine: E) -> Self {
        Self::with_engine_and_limits(engine, SessionLimits::default())
    }

    pub fn with_engine_and_limits(engine: E, limits: SessionLimits) -> Self {
        Self {
            state: SessionState::with_limits(limits),
            engine,
            limits,
        }
    }

    pub fn limits(&self) -> SessionLimits {
        self.limits
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Returns the session to its initial state: empty stack, symbol counter at zero,
    /// error flag down, no input installed.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Parses `input` with the session's own engine.
    pub fn parse(&mut self, input: &[u8]) -> Result<ParseTree, ParseError> {
        run(&mut self.state, &mut self.engine, input)
    }

    pub fn parse_str(&mut self, source: &str) -> Result<ParseTree, ParseError> {
        self.parse(source.as_bytes())
    }

    /// Parses `input` with a one-off engine instead of the session's own.
    pub fn parse_with<G>(&mut self, engine: &mut G, input: &[u8]) -> Result<ParseTree, ParseError>
    where
        G: GrammarEngine + ?Sized,
    {
        run(&mut self.state, engine, input)
    }

    /// Whether the last parse was flagged as a syntax error.
    pub fn has_error(&self) -> bool {
        self.state.error
    }

    /// Nodes left on the build stack.
    pub fn depth(&self) -> usize {
        self.state.stack.len()
    }

    /// Entries in the symbol table. Zero after a successful parse, whose table moved out
    /// with the tree.
    pub fn symbol_count(&self) -> usize {
        self.state.symbols.len()
    }
}

fn run<G>(state: &mut SessionState, engine: &mut G, input: &[u8]) -> Result<ParseTree, ParseError>
where
    G: GrammarEngine + ?Sized,
{
    state.reset();
    state.input.install(input);
    debug!(bytes = input.len(), "parse started");

    let outcome = engine.recognize(&mut BuildContext::new(state));

    // A syntax error wins over anything the engine did afterwards.
    if state.error {
        state.stack.clear();
        return Err(ParseError::Syntax);
    }

    if let Some(violation) = state.violation.take().or(outcome.err()) {
        warn!(%violation, "grammar engine broke the build protocol");
        state.stack.clear();
        return Err(violation.into());
    }

    let depth = state.stack.len();
    let root = match state.stack.pop() {
        Some(root) if depth == 1 => root,
        _ => {
            let violation = ContractViolation::InvalidFinalStack { depth };
            warn!(%violation, "grammar engine broke the build protocol");
            state.stack.clear();
            return Err(violation.into());
        }
    };

    debug!(nodes = root.size(), symbols = state.symbols.len(), "parse finished");
    Ok(ParseTree::new(root, state.symbols.take()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goon::ast::NodeType;

    fn assign_x_5(ctx: &mut BuildContext<'_>) -> Result<(), ContractViolation> {
        ctx.read_to_end();
        ctx.push_symbol("x")?;
        ctx.push_number(5)?;
        ctx.reduce(NodeType::Assign, 2)
    }

    #[test]
    fn test_parse_returns_single_root() {
        let mut session = ParseSession::with_engine(assign_x_5);
        let tree = session.parse(b"x = 5").unwrap();

        assert_eq!(tree.root().node_type(), NodeType::Assign);
        assert_eq!(tree.symbol_text(tree.root().child_at(0)), "x");
        assert_eq!(session.depth(), 0);
        assert_eq!(session.symbol_count(), 0);
    }

    #[test]
    fn test_empty_stack_is_contract_violation() {
        let mut session =
            ParseSession::with_engine(|_: &mut BuildContext<'_>| -> Result<(), ContractViolation> { Ok(()) });
        let err = session.parse(b"").unwrap_err();
        assert_eq!(
            err,
            ParseError::Contract(ContractViolation::InvalidFinalStack { depth: 0 })
        );
        assert!(err.is_fatal());
    }

    #[test]
    fn test_two_roots_is_contract_violation() {
        let mut session = ParseSession::with_engine(
            |ctx: &mut BuildContext<'_>| -> Result<(), ContractViolation> {
                ctx.push_number(1)?;
                ctx.push_number(2)
            },
        );
        let err = session.parse(b"1 2").unwrap_err();
        assert_eq!(
            err,
            ParseError::Contract(ContractViolation::InvalidFinalStack { depth: 2 })
        );
        assert_eq!(session.depth(), 0);
    }

    #[test]
    fn test_error_flag_wins_over_well_formed_stack() {
        let mut session = ParseSession::with_engine(
            |ctx: &mut BuildContext<'_>| -> Result<(), ContractViolation> {
                ctx.push_number(1)?;
                ctx.set_error();
                ctx.set_error();
                Ok(())
            },
        );
        assert_eq!(session.parse(b"1").unwrap_err(), ParseError::Syntax);
        assert!(session.has_error());
    }

    #[test]
    fn test_swallowed_violation_is_still_reported() {
        let mut session = ParseSession::with_engine(
            |ctx: &mut BuildContext<'_>| -> Result<(), ContractViolation> {
                let _ = ctx.reduce(NodeType::Add, 2);
                ctx.push_number(1)
            },
        );
        assert!(matches!(
            session.parse(b"+").unwrap_err(),
            ParseError::Contract(ContractViolation::StackUnderflow { needed: 2, .. })
        ));
    }

    #[test]
    fn test_reset_clears_state() {
        let mut session = ParseSession::with_engine(
            |ctx: &mut BuildContext<'_>| -> Result<(), ContractViolation> {
                ctx.push_symbol("a")?;
                ctx.push_symbol("b")?;
                ctx.set_error();
                Ok(())
            },
        );
        assert!(session.parse(b"a b").is_err());
        assert!(session.has_error());
        assert_eq!(session.symbol_count(), 2);

        session.reset();
        assert!(!session.has_error());
        assert_eq!(session.symbol_count(), 0);
        assert_eq!(session.depth(), 0);
    }

    #[test]
    fn test_intern_after_set_error_stores_nothing() {
        let limits = SessionLimits::unbounded().with_max_symbols(1);
        let mut session = ParseSession::with_engine_and_limits(
            |ctx: &mut BuildContext<'_>| -> Result<(), ContractViolation> {
                assert_eq!(ctx.intern("kept")?, Some(0));
                ctx.set_error();
                assert_eq!(ctx.intern("dropped")?, None);
                assert_eq!(ctx.intern("past the cap")?, None);
                ctx.push_symbol("also dropped")
            },
            limits,
        );
        assert_eq!(session.parse(b"").unwrap_err(), ParseError::Syntax);
        assert_eq!(session.symbol_count(), 1);
    }

    #[test]
    fn test_limits_apply_to_working_areas() {
        let limits = SessionLimits::unbounded().with_max_stack_depth(1);
        let mut session = ParseSession::with_engine_and_limits(
            |ctx: &mut BuildContext<'_>| -> Result<(), ContractViolation> {
                ctx.push_number(1)?;
                ctx.push_number(2)?;
                ctx.reduce(NodeType::Add, 2)
            },
            limits,
        );
        assert_eq!(
            session.parse(b"1 + 2").unwrap_err(),
            ParseError::Contract(ContractViolation::StackOverflow { capacity: 1 })
        );
        assert_eq!(session.limits().max_symbols, None);
    }
}
