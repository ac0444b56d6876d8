//! Recursive-descent recognizer
//!
//! Each rule recognizes its production and leaves exactly one subtree on the build stack.
//! Binary rules push their left operand, then for every operator push the right operand and
//! reduce the pair, which yields left-associative trees.
//!
//! The recognizer mirrors the build stack with the height of each subtree it has left
//! there, so a reduction that would exceed the grammar's depth bound is refused before it
//! is issued.

use super::token::Token;
use super::ExpressionGrammar;
use crate::goon::ast::NodeType;
use crate::goon::error::ContractViolation;
use crate::goon::parsing::BuildContext;
use tracing::debug;

/// Why a rule stopped early.
enum Halt {
    /// The tokens do not match the grammar.
    Mismatch,
    /// A build primitive broke the protocol.
    Violation(ContractViolation),
}

impl From<ContractViolation> for Halt {
    fn from(violation: ContractViolation) -> Self {
        Halt::Violation(violation)
    }
}

type Step = Result<(), Halt>;

pub struct Recognizer<'t, 'src, 'c, 's> {
    tokens: &'t [Token<'src>],
    pos: usize,
    ctx: &'c mut BuildContext<'s>,
    nesting: usize,
    /// Heights of the subtrees this recognizer has pushed, bottom to top.
    heights: Vec<usize>,
    limits: ExpressionGrammar,
}

impl<'t, 'src, 'c, 's> Recognizer<'t, 'src, 'c, 's> {
    pub fn new(tokens: &'t [Token<'src>], ctx: &'c mut BuildContext<'s>, limits: ExpressionGrammar) -> Self {
        Self {
            tokens,
            pos: 0,
            ctx,
            nesting: 0,
            heights: Vec::new(),
            limits,
        }
    }

    /// Recognizes a whole program, flagging a syntax error on mismatch.
    pub fn program(mut self) -> Result<(), ContractViolation> {
        match self.statement_line() {
            Ok(()) => Ok(()),
            Err(Halt::Mismatch) => {
                debug!(position = self.pos, found = ?self.peek(), "no match");
                self.ctx.set_error();
                Ok(())
            }
            Err(Halt::Violation(violation)) => Err(violation),
        }
    }

    fn statement_line(&mut self) -> Step {
        self.skip_terminators();
        self.statement()?;
        self.skip_terminators();
        if self.peek().is_some() {
            return Err(Halt::Mismatch);
        }
        Ok(())
    }

    fn statement(&mut self) -> Step {
        if let (Some(Token::Ident(name)), Some(Token::Assign)) = (self.peek(), self.peek_at(1)) {
            self.pos += 2;
            self.ctx.push_symbol(name)?;
            self.heights.push(1);
            self.expression()?;
            return self.reduce_pair(NodeType::Assign);
        }
        self.expression()
    }

    fn expression(&mut self) -> Step {
        self.binary(Self::sum, |token| match token {
            Token::Equals => Some(NodeType::Compare),
            Token::NotEquals => Some(NodeType::InverseCompare),
            _ => None,
        })
    }

    fn sum(&mut self) -> Step {
        self.binary(Self::product, |token| match token {
            Token::Plus => Some(NodeType::Add),
            Token::Minus => Some(NodeType::Subtract),
            _ => None,
        })
    }

    fn product(&mut self) -> Step {
        self.binary(Self::value, |token| match token {
            Token::Star => Some(NodeType::Multiply),
            Token::Slash => Some(NodeType::Divide),
            _ => None,
        })
    }

    fn binary(
        &mut self,
        operand: fn(&mut Self) -> Step,
        operator: fn(Token<'src>) -> Option<NodeType>,
    ) -> Step {
        operand(self)?;
        while let Some(node_type) = self.peek().and_then(operator) {
            self.pos += 1;
            operand(self)?;
            self.reduce_pair(node_type)?;
        }
        Ok(())
    }

    fn value(&mut self) -> Step {
        let Some(token) = self.peek() else {
            return Err(Halt::Mismatch);
        };
        self.pos += 1;
        match token {
            Token::Number(value) => self.ctx.push_number(value)?,
            Token::True => self.ctx.push_boolean(true)?,
            Token::False => self.ctx.push_boolean(false)?,
            Token::Nil => self.ctx.push_nil()?,
            Token::Ident(name) => self.ctx.push_symbol(name)?,
            Token::LeftParen => {
                self.nesting += 1;
                if self.nesting > self.limits.max_nesting() {
                    return Err(Halt::Mismatch);
                }
                self.expression()?;
                if self.peek() != Some(Token::RightParen) {
                    return Err(Halt::Mismatch);
                }
                self.pos += 1;
                self.nesting -= 1;
                return Ok(());
            }
            _ => return Err(Halt::Mismatch),
        }
        self.heights.push(1);
        Ok(())
    }

    /// Reduces the top two subtrees into a `node_type` node, unless the result would be
    /// taller than the depth bound.
    fn reduce_pair(&mut self, node_type: NodeType) -> Step {
        let start = self.heights.len().saturating_sub(2);
        let height = 1 + self.heights.drain(start..).max().unwrap_or(0);
        if height > self.limits.max_depth() {
            debug!(%node_type, height, "tree depth bound exceeded");
            return Err(Halt::Mismatch);
        }
        self.ctx.reduce(node_type, 2)?;
        self.heights.push(height);
        Ok(())
    }

    fn skip_terminators(&mut self) {
        while self.peek() == Some(Token::Terminator) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<Token<'src>> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Option<Token<'src>> {
        self.tokens.get(self.pos + offset).copied()
    }
}
