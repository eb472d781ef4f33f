//! Executable statement and conditional trees.
//!
//! A program body is an ordered sequence of [`Node`]s. A node is either a
//! primitive [`Statement`] dispatched on its [`StatementKind`], or a
//! [`Conditional`] holding a condition operand and two branch sequences.
//! Nodes are immutable once built and remember only the template they were
//! authored in, never a frame: frames do not exist until call time, and the
//! same template may be live in several frames at once under recursion.

use crate::{Operand, TemplateId};

/// A frozen, ordered sequence of nodes.
pub type NodeSeq = Box<[Node]>;

/// The closed statement vocabulary.
///
/// Each variant maps to exactly one handler in the execution engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StatementKind {
    /// Resolve the operand and emit it to the printer with a line terminator.
    Print,
    /// Open a variable declaration in the pending buffer.
    BeginVar,
    /// Assign the resolved operand to the pending variable.
    SetValue,
    /// Commit the pending variable into the current frame's locals.
    CommitVar,
    /// Halt the current frame, optionally setting its return value.
    Return,
    /// Open a result slot for a subsequent call's return value.
    DeclareResultSlot,
    /// Invoke a function: first operand is the callee, the rest are arguments.
    Call,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    /// Logical OR of the pending value and the operand; stores 1 or 0.
    Or,
    /// Logical AND of the pending value and the operand; stores 1 or 0.
    And,
    /// Stores 1 if the pending value is greater than the operand, else 0.
    GreaterThan,
    /// Stores 1 if the pending value equals the operand, else 0. Function
    /// values compare by identity.
    Equals,
}

/// A primitive executable statement.
#[derive(Clone, Debug)]
pub struct Statement {
    pub kind: StatementKind,
    pub operands: Vec<Operand>,
    /// The template whose lexical body this statement was authored in.
    /// Used at execution time to recover the function's *name* for the
    /// dynamic frame search, not to reach a frame directly.
    pub owner: TemplateId,
}

impl Statement {
    pub fn new(kind: StatementKind, operands: Vec<Operand>, owner: TemplateId) -> Self {
        Statement {
            kind,
            operands,
            owner,
        }
    }

    /// Operand at `index`, if present.
    #[inline]
    pub fn operand(&self, index: usize) -> Option<Operand> {
        self.operands.get(index).copied()
    }
}

/// An if/else conditional.
///
/// Exactly one branch executes per evaluation. Branch sequences are frozen
/// at construction time from the builder's working buffer.
#[derive(Clone, Debug)]
pub struct Conditional {
    pub condition: Operand,
    pub if_body: NodeSeq,
    pub else_body: NodeSeq,
    /// See [`Statement::owner`].
    pub owner: TemplateId,
}

/// One entry in a node sequence.
#[derive(Clone, Debug)]
pub enum Node {
    Statement(Statement),
    Conditional(Conditional),
}
