//! A grammar engine that replays a recorded callback stream

use crate::goon::ast::NodeType;
use crate::goon::error::ContractViolation;
use crate::goon::parsing::{BuildContext, GrammarEngine};

/// One build call, as an engine would issue it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOp {
    PushLeaf(NodeType, i64),
    PushNumber(i64),
    PushBoolean(bool),
    PushSymbol(String),
    PushNil,
    Reduce(NodeType, usize),
    SetError,
}

impl BuildOp {
    pub fn symbol(text: &str) -> Self {
        BuildOp::PushSymbol(text.to_string())
    }

    fn apply(&self, ctx: &mut BuildContext<'_>) -> Result<(), ContractViolation> {
        match self {
            BuildOp::PushLeaf(node_type, value) => ctx.push_leaf(*node_type, *value),
            BuildOp::PushNumber(value) => ctx.push_number(*value),
            BuildOp::PushBoolean(value) => ctx.push_boolean(*value),
            BuildOp::PushSymbol(text) => ctx.push_symbol(text),
            BuildOp::PushNil => ctx.push_nil(),
            BuildOp::Reduce(node_type, arity) => ctx.reduce(*node_type, *arity),
            BuildOp::SetError => {
                ctx.set_error();
                Ok(())
            }
        }
    }
}

/// Drains the input, then issues its ops in order, stopping at the first violation.
#[derive(Debug, Clone, Default)]
pub struct ScriptedEngine {
    ops: Vec<BuildOp>,
    consumed: Vec<u8>,
    runs: usize,
}

impl ScriptedEngine {
    pub fn new(ops: impl IntoIterator<Item = BuildOp>) -> Self {
        Self {
            ops: ops.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Replaces the script for the next run.
    pub fn set_ops(&mut self, ops: impl IntoIterator<Item = BuildOp>) {
        self.ops = ops.into_iter().collect();
    }

    /// Bytes read from the channel during the last run.
    pub fn consumed(&self) -> &[u8] {
        &self.consumed
    }

    /// How many times the engine has run.
    pub fn runs(&self) -> usize {
        self.runs
    }
}

impl GrammarEngine for ScriptedEngine {
    fn recognize(&mut self, ctx: &mut BuildContext<'_>) -> Result<(), ContractViolation> {
        self.runs += 1;
        self.consumed = ctx.read_to_end();
        for op in &self.ops {
            op.apply(ctx)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goon::error::ParseError;
    use crate::goon::parsing::ParseSession;

    #[test]
    fn test_replays_ops() {
        let engine = ScriptedEngine::new([
            BuildOp::PushNumber(1),
            BuildOp::PushBoolean(true),
            BuildOp::Reduce(NodeType::Compare, 2),
        ]);
        let mut session = ParseSession::with_engine(engine);
        let tree = session.parse(b"1 == true").unwrap();

        assert_eq!(tree.root().node_type(), NodeType::Compare);
        assert_eq!(tree.root().child_at(1).value(), 1);
        assert_eq!(session.engine().consumed(), b"1 == true");
        assert_eq!(session.engine().runs(), 1);
    }

    #[test]
    fn test_stops_at_first_violation() {
        let engine = ScriptedEngine::new([
            BuildOp::Reduce(NodeType::Add, 2),
            BuildOp::PushNumber(1),
        ]);
        let mut session = ParseSession::with_engine(engine);
        let err = session.parse(b"").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Contract(ContractViolation::StackUnderflow { .. })
        ));
    }
}
