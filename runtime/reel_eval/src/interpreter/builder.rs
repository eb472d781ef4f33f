//! `InterpreterBuilder` for creating interpreter instances.

use super::{Interpreter, DEFAULT_MAX_DEPTH};
use crate::diagnostics::RunCounters;
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::ActivationStack;
use reel_ir::Program;

/// Builder for [`Interpreter`] instances.
///
/// The printer defaults to stdout and the activation-depth limit to
/// [`DEFAULT_MAX_DEPTH`]; hosts embedding the runtime override both.
pub struct InterpreterBuilder<'a> {
    program: &'a Program,
    print_handler: Option<SharedPrintHandler>,
    max_depth: Option<usize>,
}

impl<'a> InterpreterBuilder<'a> {
    /// Create a new builder for `program`.
    pub fn new(program: &'a Program) -> Self {
        Self {
            program,
            print_handler: None,
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }

    /// Set the print handler receiving the program's output.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Set the activation-depth limit; `None` removes the bound entirely.
    #[must_use]
    pub fn max_depth(mut self, limit: Option<usize>) -> Self {
        self.max_depth = limit;
        self
    }

    /// Build the interpreter.
    pub fn build(self) -> Interpreter<'a> {
        Interpreter {
            program: self.program,
            stack: ActivationStack::new(self.max_depth),
            pending: None,
            printer: self.print_handler.unwrap_or_else(stdout_handler),
            counters: RunCounters::default(),
            max_depth: self.max_depth,
        }
    }
}
