//! Printing, variable declaration, and buffer arithmetic.

use super::run_captured;
use crate::{buffer_handler, Interpreter, ProgramBuilder, RunResult};
use pretty_assertions::assert_eq;

#[test]
fn prints_integer_literals() -> RunResult<()> {
    let mut b = ProgramBuilder::new();
    b.begin_main()?;
    b.print(42)?;
    b.print(33)?;
    b.end_main()?;
    let program = b.finish()?;
    assert_eq!(run_captured(&program)?, "42\n33\n");
    Ok(())
}

#[test]
fn assigns_values_to_variables() -> RunResult<()> {
    let mut b = ProgramBuilder::new();
    let var = b.ident("_var");
    b.begin_main()?;
    b.begin_var("_var")?;
    b.set_value(42)?;
    b.commit_var()?;
    b.print(var)?;
    b.end_main()?;
    let program = b.finish()?;
    assert_eq!(run_captured(&program)?, "42\n");
    Ok(())
}

#[test]
fn supports_addition() -> RunResult<()> {
    let mut b = ProgramBuilder::new();
    let var = b.ident("_var");
    b.begin_main()?;
    b.begin_var("_var")?;
    b.set_value(20)?;
    b.add(2)?;
    b.commit_var()?;
    b.print(var)?;
    b.end_main()?;
    let program = b.finish()?;
    assert_eq!(run_captured(&program)?, "22\n");
    Ok(())
}

#[test]
fn supports_subtraction() -> RunResult<()> {
    let mut b = ProgramBuilder::new();
    let var = b.ident("_var");
    b.begin_main()?;
    b.begin_var("_var")?;
    b.set_value(20)?;
    b.sub(2)?;
    b.commit_var()?;
    b.print(var)?;
    b.end_main()?;
    let program = b.finish()?;
    assert_eq!(run_captured(&program)?, "18\n");
    Ok(())
}

#[test]
fn supports_multiplication() -> RunResult<()> {
    let mut b = ProgramBuilder::new();
    let var = b.ident("_var");
    b.begin_main()?;
    b.begin_var("_var")?;
    b.set_value(20)?;
    b.mul(2)?;
    b.commit_var()?;
    b.print(var)?;
    b.end_main()?;
    let program = b.finish()?;
    assert_eq!(run_captured(&program)?, "40\n");
    Ok(())
}

#[test]
fn supports_division() -> RunResult<()> {
    let mut b = ProgramBuilder::new();
    let var = b.ident("_var");
    b.begin_main()?;
    b.begin_var("_var")?;
    b.set_value(20)?;
    b.div(2)?;
    b.commit_var()?;
    b.print(var)?;
    b.end_main()?;
    let program = b.finish()?;
    assert_eq!(run_captured(&program)?, "10\n");
    Ok(())
}

#[test]
fn supports_modulo() -> RunResult<()> {
    let mut b = ProgramBuilder::new();
    let var = b.ident("_var");
    b.begin_main()?;
    b.begin_var("_var")?;
    b.set_value(21)?;
    b.modulo(2)?;
    b.commit_var()?;
    b.print(var)?;
    b.end_main()?;
    let program = b.finish()?;
    assert_eq!(run_captured(&program)?, "1\n");
    Ok(())
}

#[test]
fn division_rounds_toward_negative_infinity() -> RunResult<()> {
    let mut b = ProgramBuilder::new();
    let var = b.ident("_var");
    b.begin_main()?;
    b.begin_var("_var")?;
    b.set_value(-7)?;
    b.div(2)?;
    b.commit_var()?;
    b.print(var)?;
    b.end_main()?;
    let program = b.finish()?;
    assert_eq!(run_captured(&program)?, "-4\n");
    Ok(())
}

#[test]
fn modulo_takes_the_divisor_sign() -> RunResult<()> {
    let mut b = ProgramBuilder::new();
    let var = b.ident("_var");
    b.begin_main()?;
    b.begin_var("_var")?;
    b.set_value(-7)?;
    b.modulo(2)?;
    b.commit_var()?;
    b.print(var)?;
    b.end_main()?;
    let program = b.finish()?;
    assert_eq!(run_captured(&program)?, "1\n");
    Ok(())
}

#[test]
fn uses_variables_in_calculations() -> RunResult<()> {
    let mut b = ProgramBuilder::new();
    let var = b.ident("_var");
    let other = b.ident("_other");
    let result = b.ident("_result");
    b.begin_main()?;
    b.begin_var("_var")?;
    b.set_value(2)?;
    b.commit_var()?;
    b.begin_var("_other")?;
    b.set_value(10)?;
    b.commit_var()?;
    b.begin_var("_result")?;
    b.set_value(var)?;
    b.mul(other)?;
    b.commit_var()?;
    b.print(result)?;
    b.end_main()?;
    let program = b.finish()?;
    assert_eq!(run_captured(&program)?, "20\n");
    Ok(())
}

#[test]
fn multiple_mutations_apply_in_order() -> RunResult<()> {
    let mut b = ProgramBuilder::new();
    let var = b.ident("_var");
    b.begin_main()?;
    b.begin_var("_var")?;
    b.set_value(20)?;
    b.add(4)?;
    b.div(2)?;
    b.sub(2)?;
    b.commit_var()?;
    b.print(var)?;
    b.end_main()?;
    let program = b.finish()?;
    assert_eq!(run_captured(&program)?, "10\n");
    Ok(())
}

#[test]
fn reassigning_a_variable_shadows_the_old_value() -> RunResult<()> {
    let mut b = ProgramBuilder::new();
    let var = b.ident("_var");
    b.begin_main()?;
    b.begin_var("_var")?;
    b.set_value(1)?;
    b.commit_var()?;
    b.begin_var("_var")?;
    b.set_value(2)?;
    b.commit_var()?;
    b.print(var)?;
    b.end_main()?;
    let program = b.finish()?;
    assert_eq!(run_captured(&program)?, "2\n");
    Ok(())
}

#[test]
fn repeated_runs_are_idempotent() -> RunResult<()> {
    let mut b = ProgramBuilder::new();
    let var = b.ident("_var");
    b.begin_main()?;
    b.begin_var("_var")?;
    b.set_value(20)?;
    b.add(22)?;
    b.commit_var()?;
    b.print(var)?;
    b.end_main()?;
    let program = b.finish()?;

    let handler = buffer_handler();
    let mut interpreter = Interpreter::builder(&program)
        .print_handler(handler.clone())
        .build();
    interpreter.run()?;
    assert_eq!(handler.get_output(), "42\n");
    handler.clear();
    interpreter.run()?;
    assert_eq!(handler.get_output(), "42\n");
    Ok(())
}
