//! Scenario tests: programs built through `ProgramBuilder` and executed
//! against a buffer print handler.

#![allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]

mod conditional_tests;
mod statement_tests;

use crate::{buffer_handler, Interpreter, Program, RunResult};

/// Run `program` and return everything it printed.
fn run_captured(program: &Program) -> RunResult<String> {
    let handler = buffer_handler();
    let mut interpreter = Interpreter::builder(program)
        .print_handler(handler.clone())
        .build();
    interpreter.run()?;
    Ok(handler.get_output())
}
