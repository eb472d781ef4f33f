#![deny(clippy::arithmetic_side_effects)]
//! Reel Eval - execution engine for the Reel runtime.
//!
//! This crate runs the statement/conditional trees built by `reel_ir`:
//!
//! - `Value`: runtime values (integers and first-class functions)
//! - `ActivationFrame` / `ActivationStack`: per-call state and the dynamic
//!   call stack with name-indexed frame resolution
//! - `Interpreter` / `InterpreterBuilder`: the engine itself
//! - print handlers: the injected output capability (stdout, buffer, silent)
//! - `RunCounters`: statistics hosts can read after a run
//!
//! # Re-exports
//!
//! The `reel_ir` surface needed to build and run a program is re-exported
//! for convenience: `ProgramBuilder`, `Program`, `Operand`, and the error
//! types.

mod diagnostics;
mod frame;
mod interpreter;
mod print_handler;
mod stack;
mod value;

#[cfg(test)]
mod tests;

// Re-export the program-construction surface from reel_ir
pub use reel_ir::{
    errors, Operand, Program, ProgramBuilder, RunError, RunErrorKind, RunResult,
};

pub use diagnostics::RunCounters;
pub use frame::{ActivationFrame, Variable};
pub use interpreter::{Interpreter, InterpreterBuilder, DEFAULT_MAX_DEPTH};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use stack::ActivationStack;
pub use value::Value;
