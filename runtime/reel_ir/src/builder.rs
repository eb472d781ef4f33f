//! Program construction.
//!
//! A program arrives as an ordered sequence of statement-construction
//! operations (a front-end parser is assumed upstream and is not part of
//! this crate). [`ProgramBuilder`] records those operations into templates
//! and node sequences, validates scope placement as it goes, and freezes
//! everything into an immutable [`Program`].
//!
//! # Scope discipline
//!
//! The builder keeps a stack of open scopes. The bottom entry is always the
//! program template; `begin_main`/`declare_function` push a template,
//! `begin_if` pushes a conditional. Statements append to the innermost open
//! scope. Appending while only the program scope is open is an
//! `OutOfBounds` error: top-level code can only declare functions.

use crate::errors::{out_of_bounds, unbalanced_scopes};
use crate::{
    Conditional, FunctionTemplate, Name, Node, Operand, RunError, RunResult, SharedInterner,
    Statement, StatementKind, StringInterner, TemplateArena, TemplateId,
};
use rustc_hash::FxHashMap;
use std::mem;
use std::sync::Arc;

/// Names every program uses, interned once at builder construction.
#[derive(Clone, Copy, Debug)]
pub struct WellKnownNames {
    /// Root program template name.
    pub program: Name,
    /// Entry-point template name.
    pub main: Name,
}

impl WellKnownNames {
    fn new(interner: &StringInterner) -> Self {
        Self {
            program: interner.intern("__program__"),
            main: interner.intern("__main__"),
        }
    }
}

/// A template while it is still being declared.
struct TemplateDraft {
    name: Name,
    parameters: Vec<Name>,
    body: Vec<Node>,
    returns: bool,
    defined_within: Option<TemplateId>,
    nested: FxHashMap<Name, TemplateId>,
}

impl TemplateDraft {
    fn new(name: Name, defined_within: Option<TemplateId>) -> Self {
        TemplateDraft {
            name,
            parameters: Vec::new(),
            body: Vec::new(),
            returns: false,
            defined_within,
            nested: FxHashMap::default(),
        }
    }

    fn freeze(self) -> FunctionTemplate {
        FunctionTemplate {
            name: self.name,
            parameters: self.parameters,
            body: self.body.into_boxed_slice(),
            returns: self.returns,
            defined_within: self.defined_within,
            nested: self.nested,
        }
    }
}

/// A conditional under construction.
///
/// Statements accumulate into `buffer`; `switch_to_else` freezes the buffer
/// as the if branch, and `finish` freezes the remaining buffer into
/// whichever branch is still empty, preferring the if branch when no switch
/// occurred.
struct ConditionalDraft {
    condition: Operand,
    owner: TemplateId,
    buffer: Vec<Node>,
    if_body: Vec<Node>,
}

impl ConditionalDraft {
    fn new(condition: Operand, owner: TemplateId) -> Self {
        ConditionalDraft {
            condition,
            owner,
            buffer: Vec::new(),
            if_body: Vec::new(),
        }
    }

    fn switch_to_else(&mut self) {
        self.if_body = mem::take(&mut self.buffer);
    }

    fn finish(mut self) -> Conditional {
        let mut else_body = Vec::new();
        if self.if_body.is_empty() {
            self.if_body = self.buffer;
        } else {
            else_body = self.buffer;
        }
        Conditional {
            condition: self.condition,
            if_body: self.if_body.into_boxed_slice(),
            else_body: else_body.into_boxed_slice(),
            owner: self.owner,
        }
    }
}

enum ScopeEntry {
    Template(TemplateId),
    Conditional(ConditionalDraft),
}

/// Builder for the statement-construction vocabulary.
pub struct ProgramBuilder {
    interner: SharedInterner,
    names: WellKnownNames,
    drafts: Vec<TemplateDraft>,
    scope: Vec<ScopeEntry>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        let interner: SharedInterner = Arc::new(StringInterner::new());
        let names = WellKnownNames::new(&interner);
        let drafts = vec![TemplateDraft::new(names.program, None)];
        ProgramBuilder {
            interner,
            names,
            drafts,
            scope: vec![ScopeEntry::Template(TemplateId::PROGRAM)],
        }
    }

    /// Intern an identifier and wrap it as an operand.
    pub fn ident(&self, text: &str) -> Operand {
        Operand::Name(self.interner.intern(text))
    }

    // Function declarations

    /// Open the entry-point function template.
    pub fn begin_main(&mut self) -> RunResult<()> {
        self.open_declaration(self.names.main)
    }

    /// Close the entry-point function template.
    pub fn end_main(&mut self) -> RunResult<()> {
        self.close_declaration()
    }

    /// Open a function template nested in the innermost open one.
    pub fn declare_function(&mut self, name: &str) -> RunResult<()> {
        let name = self.interner.intern(name);
        self.open_declaration(name)
    }

    /// Close the innermost open function template and register it in its
    /// enclosing template, overwriting any prior declaration of the same
    /// name in that scope.
    pub fn close_function(&mut self) -> RunResult<()> {
        self.close_declaration()
    }

    /// Append a parameter to the innermost open function template.
    pub fn add_parameter(&mut self, name: &str) -> RunResult<()> {
        let name = self.interner.intern(name);
        let id = self.open_template()?;
        let draft = &mut self.drafts[id.index()];
        if draft.parameters.contains(&name) {
            return Err(RunError::new(format!(
                "duplicate parameter '{}'",
                self.interner.lookup(name)
            )));
        }
        draft.parameters.push(name);
        Ok(())
    }

    /// Mark the innermost open function template as value-returning.
    pub fn mark_returning(&mut self) -> RunResult<()> {
        let id = self.open_template()?;
        self.drafts[id.index()].returns = true;
        Ok(())
    }

    // Statements

    /// Print the resolved operand, followed by a line terminator.
    pub fn print(&mut self, value: impl Into<Operand>) -> RunResult<()> {
        self.push_statement(StatementKind::Print, vec![value.into()])
    }

    /// Open a variable declaration.
    pub fn begin_var(&mut self, name: &str) -> RunResult<()> {
        let name = self.interner.intern(name);
        self.push_statement(StatementKind::BeginVar, vec![Operand::Name(name)])
    }

    /// Assign the resolved operand to the pending variable.
    pub fn set_value(&mut self, value: impl Into<Operand>) -> RunResult<()> {
        self.push_statement(StatementKind::SetValue, vec![value.into()])
    }

    /// Commit the pending variable into the current frame's locals.
    pub fn commit_var(&mut self) -> RunResult<()> {
        self.push_statement(StatementKind::CommitVar, Vec::new())
    }

    /// Halt the current frame. In a returning function the return value
    /// defaults to integer 0.
    pub fn ret(&mut self) -> RunResult<()> {
        self.push_statement(StatementKind::Return, Vec::new())
    }

    /// Halt the current frame, returning the resolved operand.
    pub fn ret_value(&mut self, value: impl Into<Operand>) -> RunResult<()> {
        self.push_statement(StatementKind::Return, vec![value.into()])
    }

    /// Open a result slot to receive the next call's return value.
    pub fn declare_result_slot(&mut self, name: &str) -> RunResult<()> {
        let name = self.interner.intern(name);
        self.push_statement(StatementKind::DeclareResultSlot, vec![Operand::Name(name)])
    }

    /// Invoke `callee` with the given argument operands.
    pub fn call(&mut self, callee: &str, args: &[Operand]) -> RunResult<()> {
        let callee = self.interner.intern(callee);
        let mut operands = Vec::with_capacity(args.len().saturating_add(1));
        operands.push(Operand::Name(callee));
        operands.extend_from_slice(args);
        self.push_statement(StatementKind::Call, operands)
    }

    // Buffer arithmetic

    /// Add the resolved operand to the pending value.
    pub fn add(&mut self, value: impl Into<Operand>) -> RunResult<()> {
        self.push_statement(StatementKind::Add, vec![value.into()])
    }

    /// Subtract the resolved operand from the pending value.
    pub fn sub(&mut self, value: impl Into<Operand>) -> RunResult<()> {
        self.push_statement(StatementKind::Sub, vec![value.into()])
    }

    /// Multiply the pending value by the resolved operand.
    pub fn mul(&mut self, value: impl Into<Operand>) -> RunResult<()> {
        self.push_statement(StatementKind::Mul, vec![value.into()])
    }

    /// Divide the pending value by the resolved operand (floored quotient).
    pub fn div(&mut self, value: impl Into<Operand>) -> RunResult<()> {
        self.push_statement(StatementKind::Div, vec![value.into()])
    }

    /// Reduce the pending value modulo the resolved operand.
    pub fn modulo(&mut self, value: impl Into<Operand>) -> RunResult<()> {
        self.push_statement(StatementKind::Mod, vec![value.into()])
    }

    // Buffer logic and comparison

    /// Logical OR of the pending value and the resolved operand.
    pub fn or(&mut self, value: impl Into<Operand>) -> RunResult<()> {
        self.push_statement(StatementKind::Or, vec![value.into()])
    }

    /// Logical AND of the pending value and the resolved operand.
    pub fn and(&mut self, value: impl Into<Operand>) -> RunResult<()> {
        self.push_statement(StatementKind::And, vec![value.into()])
    }

    /// Greater-than comparison of the pending value and the resolved operand.
    pub fn greater_than(&mut self, value: impl Into<Operand>) -> RunResult<()> {
        self.push_statement(StatementKind::GreaterThan, vec![value.into()])
    }

    /// Equality comparison of the pending value and the resolved operand.
    pub fn equals(&mut self, value: impl Into<Operand>) -> RunResult<()> {
        self.push_statement(StatementKind::Equals, vec![value.into()])
    }

    // Conditionals

    /// Open a conditional on the given condition operand.
    pub fn begin_if(&mut self, condition: impl Into<Operand>) -> RunResult<()> {
        let owner = self.current_owner();
        if owner == TemplateId::PROGRAM {
            return Err(out_of_bounds());
        }
        self.scope
            .push(ScopeEntry::Conditional(ConditionalDraft::new(
                condition.into(),
                owner,
            )));
        Ok(())
    }

    /// Switch the open conditional from its if branch to its else branch.
    pub fn otherwise(&mut self) -> RunResult<()> {
        match self.scope.last_mut() {
            Some(ScopeEntry::Conditional(draft)) => {
                draft.switch_to_else();
                Ok(())
            }
            _ => Err(unbalanced_scopes()),
        }
    }

    /// Close the open conditional and append it to the enclosing scope.
    pub fn end_if(&mut self) -> RunResult<()> {
        match self.scope.pop() {
            Some(ScopeEntry::Conditional(draft)) => self.append(Node::Conditional(draft.finish())),
            Some(entry) => {
                // Not ours to close; restore and report.
                self.scope.push(entry);
                Err(unbalanced_scopes())
            }
            None => Err(unbalanced_scopes()),
        }
    }

    /// Validate balance and freeze the program.
    pub fn finish(self) -> RunResult<Program> {
        if self.scope.len() != 1 {
            return Err(unbalanced_scopes());
        }
        let templates = self.drafts.into_iter().map(TemplateDraft::freeze).collect();
        Ok(Program {
            templates: TemplateArena::new(templates),
            interner: self.interner,
            names: self.names,
        })
    }

    // Internals

    /// The innermost open function template (skipping open conditionals).
    fn current_owner(&self) -> TemplateId {
        self.scope
            .iter()
            .rev()
            .find_map(|entry| match entry {
                ScopeEntry::Template(id) => Some(*id),
                ScopeEntry::Conditional(_) => None,
            })
            .unwrap_or(TemplateId::PROGRAM)
    }

    /// The innermost open function template, or `OutOfBounds` when only the
    /// program scope is open.
    fn open_template(&self) -> RunResult<TemplateId> {
        let id = self.current_owner();
        if id == TemplateId::PROGRAM {
            return Err(out_of_bounds());
        }
        Ok(id)
    }

    fn open_declaration(&mut self, name: Name) -> RunResult<()> {
        let defined_within = Some(self.current_owner());
        let id = TemplateId::new(
            u32::try_from(self.drafts.len())
                .map_err(|_| RunError::new("function template capacity exceeded"))?,
        );
        self.drafts.push(TemplateDraft::new(name, defined_within));
        self.scope.push(ScopeEntry::Template(id));
        Ok(())
    }

    fn close_declaration(&mut self) -> RunResult<()> {
        if self.scope.len() <= 1 {
            return Err(unbalanced_scopes());
        }
        match self.scope.pop() {
            Some(ScopeEntry::Template(id)) => {
                let draft = &self.drafts[id.index()];
                let name = draft.name;
                // The program template is the outermost defined_within.
                let parent = draft.defined_within.unwrap_or(TemplateId::PROGRAM);
                self.drafts[parent.index()].nested.insert(name, id);
                Ok(())
            }
            Some(entry) => {
                self.scope.push(entry);
                Err(unbalanced_scopes())
            }
            None => Err(unbalanced_scopes()),
        }
    }

    fn push_statement(&mut self, kind: StatementKind, operands: Vec<Operand>) -> RunResult<()> {
        let owner = self.current_owner();
        self.append(Node::Statement(Statement::new(kind, operands, owner)))
    }

    /// Append a node to the innermost open scope. Appending while only the
    /// program scope is open is out of bounds.
    fn append(&mut self, node: Node) -> RunResult<()> {
        match self.scope.last_mut() {
            Some(ScopeEntry::Conditional(draft)) => {
                draft.buffer.push(node);
                Ok(())
            }
            Some(ScopeEntry::Template(id)) if *id != TemplateId::PROGRAM => {
                let index = id.index();
                self.drafts[index].body.push(node);
                Ok(())
            }
            _ => Err(out_of_bounds()),
        }
    }
}

impl Default for ProgramBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A finished, immutable program.
#[derive(Debug)]
pub struct Program {
    templates: TemplateArena,
    interner: SharedInterner,
    names: WellKnownNames,
}

impl Program {
    /// The template arena.
    pub fn templates(&self) -> &TemplateArena {
        &self.templates
    }

    /// The interner shared with the builder that produced this program.
    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    /// The entry-point template, if the program declared one.
    pub fn entry(&self) -> Option<TemplateId> {
        self.templates
            .get(TemplateId::PROGRAM)
            .nested
            .get(&self.names.main)
            .copied()
    }

    /// The entry-point name.
    pub fn entry_name(&self) -> Name {
        self.names.main
    }
}
