//! Conditional evaluation: branch selection, nesting, and the halt quirk.

use super::run_captured;
use crate::{Operand, ProgramBuilder, RunResult};
use pretty_assertions::assert_eq;

#[test]
fn true_condition_executes_the_if_branch() -> RunResult<()> {
    let mut b = ProgramBuilder::new();
    let condition = b.ident("_condition");
    b.begin_main()?;
    b.begin_var("_condition")?;
    b.set_value(Operand::TRUTH)?;
    b.or(Operand::LIE)?;
    b.commit_var()?;
    b.begin_if(condition)?;
    b.print(Operand::TRUTH)?;
    b.end_if()?;
    b.end_main()?;
    let program = b.finish()?;
    assert_eq!(run_captured(&program)?, "1\n");
    Ok(())
}

#[test]
fn false_condition_executes_the_else_branch() -> RunResult<()> {
    let mut b = ProgramBuilder::new();
    let condition = b.ident("_condition");
    b.begin_main()?;
    b.begin_var("_condition")?;
    b.set_value(Operand::TRUTH)?;
    b.and(Operand::LIE)?;
    b.commit_var()?;
    b.begin_if(condition)?;
    b.print(Operand::TRUTH)?;
    b.otherwise()?;
    b.print(Operand::LIE)?;
    b.end_if()?;
    b.end_main()?;
    let program = b.finish()?;
    assert_eq!(run_captured(&program)?, "0\n");
    Ok(())
}

#[test]
fn false_condition_without_else_executes_nothing() -> RunResult<()> {
    let mut b = ProgramBuilder::new();
    b.begin_main()?;
    b.begin_if(Operand::LIE)?;
    b.print(1)?;
    b.end_if()?;
    b.print(9)?;
    b.end_main()?;
    let program = b.finish()?;
    assert_eq!(run_captured(&program)?, "9\n");
    Ok(())
}

#[test]
fn nonzero_condition_counts_as_true() -> RunResult<()> {
    let mut b = ProgramBuilder::new();
    b.begin_main()?;
    b.begin_if(-5)?;
    b.print(1)?;
    b.end_if()?;
    b.end_main()?;
    let program = b.finish()?;
    assert_eq!(run_captured(&program)?, "1\n");
    Ok(())
}

#[test]
fn nested_conditionals_execute_exactly_one_leaf() -> RunResult<()> {
    // Outer true, inner false: only the inner else branch runs.
    let mut b = ProgramBuilder::new();
    let condition = b.ident("_condition");
    let other = b.ident("_other_condition");
    b.begin_main()?;
    b.begin_var("_condition")?;
    b.set_value(Operand::TRUTH)?;
    b.and(42)?;
    b.commit_var()?;
    b.begin_var("_other_condition")?;
    b.set_value(44)?;
    b.equals(33)?;
    b.commit_var()?;
    b.begin_if(condition)?;
    b.begin_if(other)?;
    b.print(42)?;
    b.otherwise()?;
    b.print(22)?;
    b.end_if()?;
    b.otherwise()?;
    b.print(Operand::LIE)?;
    b.end_if()?;
    b.end_main()?;
    let program = b.finish()?;
    assert_eq!(run_captured(&program)?, "22\n");
    Ok(())
}

#[test]
fn empty_if_branch_after_switch_receives_the_buffered_statements() -> RunResult<()> {
    // Nothing precedes the switch, so the if branch is still empty at close
    // and the buffered statements freeze into it.
    let mut b = ProgramBuilder::new();
    b.begin_main()?;
    b.begin_if(Operand::TRUTH)?;
    b.otherwise()?;
    b.print(7)?;
    b.end_if()?;
    b.end_main()?;
    let program = b.finish()?;
    assert_eq!(run_captured(&program)?, "7\n");
    Ok(())
}

#[test]
fn halting_inside_a_branch_does_not_truncate_the_branch() -> RunResult<()> {
    // The return halts main, but the branch still runs to completion;
    // only main's own body loop stops early afterwards.
    let mut b = ProgramBuilder::new();
    b.begin_main()?;
    b.begin_if(Operand::TRUTH)?;
    b.ret()?;
    b.print(5)?;
    b.end_if()?;
    b.print(9)?;
    b.end_main()?;
    let program = b.finish()?;
    assert_eq!(run_captured(&program)?, "5\n");
    Ok(())
}

#[test]
fn statements_after_a_taken_conditional_still_run() -> RunResult<()> {
    let mut b = ProgramBuilder::new();
    b.begin_main()?;
    b.begin_if(Operand::TRUTH)?;
    b.print(1)?;
    b.end_if()?;
    b.print(2)?;
    b.end_main()?;
    let program = b.finish()?;
    assert_eq!(run_captured(&program)?, "1\n2\n");
    Ok(())
}
