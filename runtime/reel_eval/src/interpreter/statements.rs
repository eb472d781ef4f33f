//! Statement handlers, one per [`StatementKind`] variant.
//!
//! Buffer-mutating statements (assignment, arithmetic, logic, comparison)
//! share a shape: resolve the operand in the frame executing the
//! statement's template, combine it with the pending variable's current
//! value, store the result back into the buffer.

use super::Interpreter;
use crate::{ActivationFrame, Value, Variable};
use reel_ir::errors;
use reel_ir::{Operand, RunErrorKind, RunResult, Statement};
use reel_stack::ensure_sufficient_stack;

impl Interpreter<'_> {
    // Output

    pub(super) fn eval_print(&mut self, stmt: &Statement) -> RunResult<()> {
        let frame_idx = self.statement_frame(stmt)?;
        let value = self.resolve(self.operand(stmt, 0)?, frame_idx)?;
        self.printer.println(&value.to_string());
        Ok(())
    }

    // Variable declaration

    pub(super) fn eval_begin_var(&mut self, stmt: &Statement) -> RunResult<()> {
        self.open_declaration(stmt)
    }

    pub(super) fn eval_declare_result_slot(&mut self, stmt: &Statement) -> RunResult<()> {
        self.open_declaration(stmt)
    }

    pub(super) fn eval_set_value(&mut self, stmt: &Statement) -> RunResult<()> {
        let value = self.value_operand(stmt)?;
        self.store_pending(value)
    }

    pub(super) fn eval_commit_var(&mut self, stmt: &Statement) -> RunResult<()> {
        let frame_idx = self.statement_frame(stmt)?;
        let variable = self
            .pending
            .take()
            .ok_or_else(errors::no_open_declaration)?;
        if variable.value.is_none() {
            return Err(errors::uninitialized_variable(
                self.program.interner().lookup(variable.name),
            ));
        }
        self.stack.frame_mut(frame_idx).commit(variable);
        Ok(())
    }

    // Control

    pub(super) fn eval_return(&mut self, stmt: &Statement) -> RunResult<()> {
        let frame_idx = self.statement_frame(stmt)?;
        self.stack.frame_mut(frame_idx).halted = true;
        let template = self.stack.frame(frame_idx).template;
        if self.program.templates().get(template).returns {
            let operand = stmt.operand(0).unwrap_or(Operand::Int(0));
            let value = self.resolve(operand, frame_idx)?;
            self.stack.frame_mut(frame_idx).ret = Some(value);
        }
        Ok(())
    }

    pub(super) fn eval_call(&mut self, stmt: &Statement) -> RunResult<()> {
        self.counters.count_call();
        let program = self.program;
        // The invoking frame must be found before the callee frame exists:
        // a name-based search afterwards could land on the new, not yet
        // initialized frame.
        let invoker_idx = self.statement_frame(stmt)?;
        let callee = match self.resolve(self.operand(stmt, 0)?, invoker_idx) {
            Ok(value) => value,
            // The call syntax only accepts names that denote functions.
            Err(err) => {
                return Err(match err.kind {
                    RunErrorKind::UndeclaredVariable { name } => errors::undeclared_function(&name),
                    _ => err,
                });
            }
        };
        let Value::Function(callee_id) = callee else {
            return Err(errors::type_mismatch("function", callee.type_name()));
        };
        let mut arguments = Vec::with_capacity(stmt.operands.len().saturating_sub(1));
        for &operand in stmt.operands.iter().skip(1) {
            arguments.push(self.resolve(operand, invoker_idx)?);
        }
        let template = program.templates().get(callee_id);
        // Claim the result slot before the callee runs; the callee's own
        // declarations reuse the pending buffer.
        let result_slot = if template.returns {
            let slot = self.pending.take().ok_or_else(|| {
                errors::no_result_slot(program.interner().lookup(template.name))
            })?;
            Some(slot)
        } else {
            None
        };
        let callee_idx = self
            .stack
            .push(ActivationFrame::instantiate(template, callee_id, &arguments))?;
        self.counters.observe_depth(self.stack.depth());
        ensure_sufficient_stack(|| self.execute_frame(callee_idx))?;
        let returned = self.stack.frame(callee_idx).ret;
        self.stack.pop();
        if let Some(mut slot) = result_slot {
            let value = returned.ok_or_else(|| {
                errors::function_does_not_return(program.interner().lookup(template.name))
            })?;
            slot.value = Some(value);
            self.stack.frame_mut(invoker_idx).commit(slot);
            // The buffer is cleared after a returning call, even if the
            // callee left a declaration open.
            self.pending = None;
        }
        Ok(())
    }

    // Buffer arithmetic

    pub(super) fn eval_add(&mut self, stmt: &Statement) -> RunResult<()> {
        let rhs = self.int_operand(stmt)?;
        let lhs = self.pending_int()?;
        let value = lhs
            .checked_add(rhs)
            .ok_or_else(|| errors::integer_overflow("addition"))?;
        self.store_pending(Value::Int(value))
    }

    pub(super) fn eval_sub(&mut self, stmt: &Statement) -> RunResult<()> {
        let rhs = self.int_operand(stmt)?;
        let lhs = self.pending_int()?;
        let value = lhs
            .checked_sub(rhs)
            .ok_or_else(|| errors::integer_overflow("subtraction"))?;
        self.store_pending(Value::Int(value))
    }

    pub(super) fn eval_mul(&mut self, stmt: &Statement) -> RunResult<()> {
        let rhs = self.int_operand(stmt)?;
        let lhs = self.pending_int()?;
        let value = lhs
            .checked_mul(rhs)
            .ok_or_else(|| errors::integer_overflow("multiplication"))?;
        self.store_pending(Value::Int(value))
    }

    pub(super) fn eval_div(&mut self, stmt: &Statement) -> RunResult<()> {
        let rhs = self.int_operand(stmt)?;
        let lhs = self.pending_int()?;
        self.store_pending(Value::Int(floored_div(lhs, rhs)?))
    }

    pub(super) fn eval_mod(&mut self, stmt: &Statement) -> RunResult<()> {
        let rhs = self.int_operand(stmt)?;
        let lhs = self.pending_int()?;
        self.store_pending(Value::Int(floored_mod(lhs, rhs)?))
    }

    // Buffer logic and comparison

    pub(super) fn eval_or(&mut self, stmt: &Statement) -> RunResult<()> {
        let rhs = self.bool_operand(stmt)?;
        let lhs = self.pending_bool()?;
        self.store_pending(Value::Int(i64::from(lhs || rhs)))
    }

    pub(super) fn eval_and(&mut self, stmt: &Statement) -> RunResult<()> {
        let rhs = self.bool_operand(stmt)?;
        let lhs = self.pending_bool()?;
        self.store_pending(Value::Int(i64::from(lhs && rhs)))
    }

    pub(super) fn eval_greater_than(&mut self, stmt: &Statement) -> RunResult<()> {
        let rhs = self.int_operand(stmt)?;
        let lhs = self.pending_int()?;
        self.store_pending(Value::Int(i64::from(lhs > rhs)))
    }

    pub(super) fn eval_equals(&mut self, stmt: &Statement) -> RunResult<()> {
        // Equality never type-errors: an integer and a function value are
        // simply unequal, and function values compare by identity.
        let rhs = self.value_operand(stmt)?;
        let lhs = self.pending_value()?;
        self.store_pending(Value::Int(i64::from(lhs == rhs)))
    }

    // Shared pieces

    fn open_declaration(&mut self, stmt: &Statement) -> RunResult<()> {
        let Operand::Name(name) = self.operand(stmt, 0)? else {
            return Err(reel_ir::RunError::new(
                "declaration requires an identifier operand",
            ));
        };
        self.pending = Some(Variable::new(name));
        Ok(())
    }

    /// Resolve the statement's first operand in its executing frame.
    fn value_operand(&self, stmt: &Statement) -> RunResult<Value> {
        let frame_idx = self.statement_frame(stmt)?;
        self.resolve(self.operand(stmt, 0)?, frame_idx)
    }

    fn int_operand(&self, stmt: &Statement) -> RunResult<i64> {
        match self.value_operand(stmt)? {
            Value::Int(value) => Ok(value),
            value => Err(errors::type_mismatch("int", value.type_name())),
        }
    }

    fn bool_operand(&self, stmt: &Statement) -> RunResult<bool> {
        let value = self.value_operand(stmt)?;
        value
            .truthy()
            .ok_or_else(|| errors::type_mismatch("int", value.type_name()))
    }

    /// The pending variable's value; it must be initialized.
    fn pending_value(&self) -> RunResult<Value> {
        let variable = self
            .pending
            .as_ref()
            .ok_or_else(errors::no_open_declaration)?;
        variable.value.ok_or_else(|| {
            errors::uninitialized_variable(self.program.interner().lookup(variable.name))
        })
    }

    fn pending_int(&self) -> RunResult<i64> {
        match self.pending_value()? {
            Value::Int(value) => Ok(value),
            value => Err(errors::type_mismatch("int", value.type_name())),
        }
    }

    fn pending_bool(&self) -> RunResult<bool> {
        let value = self.pending_value()?;
        value
            .truthy()
            .ok_or_else(|| errors::type_mismatch("int", value.type_name()))
    }

    fn store_pending(&mut self, value: Value) -> RunResult<()> {
        let variable = self
            .pending
            .as_mut()
            .ok_or_else(errors::no_open_declaration)?;
        variable.value = Some(value);
        Ok(())
    }
}

/// Floored integer division: the quotient rounds toward negative infinity.
fn floored_div(lhs: i64, rhs: i64) -> RunResult<i64> {
    if rhs == 0 {
        return Err(errors::division_by_zero());
    }
    let quotient = lhs
        .checked_div(rhs)
        .ok_or_else(|| errors::integer_overflow("division"))?;
    let remainder = lhs
        .checked_rem(rhs)
        .ok_or_else(|| errors::integer_overflow("division"))?;
    if remainder != 0 && (lhs < 0) != (rhs < 0) {
        quotient
            .checked_sub(1)
            .ok_or_else(|| errors::integer_overflow("division"))
    } else {
        Ok(quotient)
    }
}

/// Floored modulo: the remainder takes the divisor's sign.
fn floored_mod(lhs: i64, rhs: i64) -> RunResult<i64> {
    if rhs == 0 {
        return Err(errors::modulo_by_zero());
    }
    let remainder = lhs
        .checked_rem(rhs)
        .ok_or_else(|| errors::integer_overflow("modulo"))?;
    if remainder != 0 && (remainder < 0) != (rhs < 0) {
        remainder
            .checked_add(rhs)
            .ok_or_else(|| errors::integer_overflow("modulo"))
    } else {
        Ok(remainder)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests {
    use super::*;
    use reel_ir::RunErrorKind;

    #[test]
    fn floored_div_truncates_exact_quotients() {
        assert_eq!(floored_div(20, 2).unwrap(), 10);
        assert_eq!(floored_div(-20, 2).unwrap(), -10);
    }

    #[test]
    fn floored_div_rounds_toward_negative_infinity() {
        assert_eq!(floored_div(-7, 2).unwrap(), -4);
        assert_eq!(floored_div(7, -2).unwrap(), -4);
        assert_eq!(floored_div(-7, -2).unwrap(), 3);
    }

    #[test]
    fn floored_div_by_zero_errors() {
        let err = floored_div(1, 0).unwrap_err();
        assert_eq!(err.kind, RunErrorKind::DivisionByZero);
    }

    #[test]
    fn floored_div_overflow_errors() {
        let err = floored_div(i64::MIN, -1).unwrap_err();
        assert_eq!(
            err.kind,
            RunErrorKind::IntegerOverflow {
                operation: "division".to_string()
            }
        );
    }

    #[test]
    fn floored_mod_takes_the_divisor_sign() {
        assert_eq!(floored_mod(21, 2).unwrap(), 1);
        assert_eq!(floored_mod(-7, 2).unwrap(), 1);
        assert_eq!(floored_mod(7, -2).unwrap(), -1);
        assert_eq!(floored_mod(-7, -2).unwrap(), -1);
    }

    #[test]
    fn floored_mod_by_zero_errors() {
        let err = floored_mod(1, 0).unwrap_err();
        assert_eq!(err.kind, RunErrorKind::ModuloByZero);
    }
}
