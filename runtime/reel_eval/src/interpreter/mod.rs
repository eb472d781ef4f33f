//! Tree-walking interpreter for Reel programs.
//!
//! # Dynamic, name-indexed frame resolution
//!
//! Statements and conditionals remember the *template* they were authored
//! in, never a frame: frames do not exist until call time, and under
//! recursion one template is live in several frames at once. To evaluate a
//! node, the engine finds the frame currently executing the node's owning
//! template, defined as the topmost stack frame whose template name matches.
//! Because the search runs from the top, a statement inside a recursive
//! function resolves against the innermost activation, which is what makes
//! recursion correct. This name-based search is a deliberate part of the
//! language's semantics; do not replace it with captured frame references.
//!
//! # Execution outline
//!
//! 1. Push the program frame and run its body (top-level scope holds only
//!    function declarations, so this is typically empty).
//! 2. Look up the entry-point template; fail with `UndeclaredFunction` if
//!    the program never declared one.
//! 3. Push an activation frame for the entry point with zero arguments and
//!    run it.
//!
//! A return statement halts its frame; the frame's body loop checks the
//! flag between nodes. A conditional's branch loop deliberately does not:
//! halting inside a branch never truncates the branch itself, only the
//! enclosing frame's remaining body.

mod builder;
mod statements;

pub use builder::InterpreterBuilder;

use crate::diagnostics::RunCounters;
use crate::print_handler::SharedPrintHandler;
use crate::{ActivationFrame, ActivationStack, Value, Variable};
use reel_ir::errors;
use reel_ir::{
    Conditional, Node, Operand, Program, RunError, RunResult, Statement, StatementKind, TemplateId,
};

/// Default activation-depth limit.
///
/// Deep enough for any reasonable program; shallow enough that runaway
/// recursion surfaces as a `StackOverflow` error instead of exhausting
/// host resources.
pub const DEFAULT_MAX_DEPTH: usize = 10_000;

/// The execution engine.
///
/// One interpreter owns all process-wide mutable state of a run: the
/// activation stack, the pending-variable buffer, and the run counters.
/// Each call to [`run`](Interpreter::run) rebuilds that state, so runs
/// never leak into each other.
pub struct Interpreter<'a> {
    program: &'a Program,
    stack: ActivationStack,
    /// Single-slot staging area for the variable currently being declared.
    pending: Option<Variable>,
    printer: SharedPrintHandler,
    counters: RunCounters,
    max_depth: Option<usize>,
}

impl<'a> Interpreter<'a> {
    /// Start configuring an interpreter for `program`.
    pub fn builder(program: &'a Program) -> InterpreterBuilder<'a> {
        InterpreterBuilder::new(program)
    }

    /// Statistics from the most recent run.
    pub fn counters(&self) -> &RunCounters {
        &self.counters
    }

    /// Execute the program from the top.
    ///
    /// Any error aborts the run immediately; output already printed stays
    /// valid. Running again starts from fresh state.
    pub fn run(&mut self) -> RunResult<()> {
        self.stack = ActivationStack::new(self.max_depth);
        self.pending = None;
        self.counters = RunCounters::default();

        let program = self.program;
        let program_frame = ActivationFrame::instantiate(
            program.templates().get(TemplateId::PROGRAM),
            TemplateId::PROGRAM,
            &[],
        );
        let program_idx = self.stack.push(program_frame)?;
        self.counters.observe_depth(self.stack.depth());
        self.execute_frame(program_idx)?;

        let entry = program.entry().ok_or_else(|| {
            errors::undeclared_function(program.interner().lookup(program.entry_name()))
        })?;
        let entry_frame =
            ActivationFrame::instantiate(program.templates().get(entry), entry, &[]);
        let entry_idx = self.stack.push(entry_frame)?;
        self.counters.observe_depth(self.stack.depth());
        self.execute_frame(entry_idx)?;

        self.stack.pop();
        self.stack.pop();
        Ok(())
    }

    /// Run the body of the frame at `frame_idx`, honoring its halt flag
    /// between nodes.
    fn execute_frame(&mut self, frame_idx: usize) -> RunResult<()> {
        let program = self.program;
        let template = self.stack.frame(frame_idx).template;
        let body = &program.templates().get(template).body;
        for node in body.iter() {
            if self.stack.frame(frame_idx).halted {
                break;
            }
            self.eval_node(node)?;
        }
        Ok(())
    }

    fn eval_node(&mut self, node: &Node) -> RunResult<()> {
        match node {
            Node::Statement(stmt) => self.eval_statement(stmt),
            Node::Conditional(cond) => self.eval_conditional(cond),
        }
    }

    /// Evaluate exactly one branch of a conditional, fully and in order.
    fn eval_conditional(&mut self, cond: &Conditional) -> RunResult<()> {
        let frame_idx = self.active_frame_named(cond.owner)?;
        let condition = self.resolve(cond.condition, frame_idx)?;
        let truthy = condition
            .truthy()
            .ok_or_else(|| errors::type_mismatch("int", condition.type_name()))?;
        let branch = if truthy { &cond.if_body } else { &cond.else_body };
        // A branch runs to completion even if a statement halts the owning
        // frame; only the frame's own body loop honors `halted`.
        for node in branch.iter() {
            self.eval_node(node)?;
        }
        Ok(())
    }

    /// Dispatch a statement to its handler.
    fn eval_statement(&mut self, stmt: &Statement) -> RunResult<()> {
        self.counters.count_statement();
        match stmt.kind {
            StatementKind::Print => self.eval_print(stmt),
            StatementKind::BeginVar => self.eval_begin_var(stmt),
            StatementKind::SetValue => self.eval_set_value(stmt),
            StatementKind::CommitVar => self.eval_commit_var(stmt),
            StatementKind::Return => self.eval_return(stmt),
            StatementKind::DeclareResultSlot => self.eval_declare_result_slot(stmt),
            StatementKind::Call => self.eval_call(stmt),
            StatementKind::Add => self.eval_add(stmt),
            StatementKind::Sub => self.eval_sub(stmt),
            StatementKind::Mul => self.eval_mul(stmt),
            StatementKind::Div => self.eval_div(stmt),
            StatementKind::Mod => self.eval_mod(stmt),
            StatementKind::Or => self.eval_or(stmt),
            StatementKind::And => self.eval_and(stmt),
            StatementKind::GreaterThan => self.eval_greater_than(stmt),
            StatementKind::Equals => self.eval_equals(stmt),
        }
    }

    /// Resolve an operand to a value in the frame at `frame_idx`.
    ///
    /// Identifier resolution order: function names (lexical two-step
    /// search), then parameter bindings, then locals.
    fn resolve(&self, operand: Operand, frame_idx: usize) -> RunResult<Value> {
        match operand {
            Operand::Int(value) => Ok(Value::Int(value)),
            Operand::Name(name) => {
                let frame = self.stack.frame(frame_idx);
                if let Some(id) = self.program.templates().resolve_name(frame.template, name) {
                    return Ok(Value::Function(id));
                }
                match frame.lookup(name) {
                    Some(variable) => variable.value.ok_or_else(|| {
                        errors::uninitialized_variable(self.program.interner().lookup(name))
                    }),
                    None => Err(errors::undeclared_variable(
                        self.program.interner().lookup(name),
                    )),
                }
            }
        }
    }

    /// The frame currently executing the statement's owning template.
    fn statement_frame(&self, stmt: &Statement) -> RunResult<usize> {
        self.active_frame_named(stmt.owner)
    }

    /// Topmost frame whose template name matches `owner`'s name.
    fn active_frame_named(&self, owner: TemplateId) -> RunResult<usize> {
        let name = self.program.templates().get(owner).name;
        self.stack.top_index_named(name).ok_or_else(|| {
            RunError::new(format!(
                "no active frame for function '{}'",
                self.program.interner().lookup(name)
            ))
        })
    }

    /// Operand at `index`; the builder guarantees arity, so a miss is an
    /// internal defect, reported rather than unwrapped.
    fn operand(&self, stmt: &Statement, index: usize) -> RunResult<Operand> {
        stmt.operand(index)
            .ok_or_else(|| RunError::new("statement is missing an operand"))
    }
}
