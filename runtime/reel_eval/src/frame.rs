//! Activation frames: the per-call mutable state of one invocation.

use crate::Value;
use reel_ir::{FunctionTemplate, Name, TemplateId};
use rustc_hash::FxHashMap;

/// A named variable owned by exactly one activation frame.
///
/// `value` is `None` until the variable is first assigned; reading an
/// unassigned variable is the `UninitializedVariable` error.
#[derive(Clone, Debug)]
pub struct Variable {
    pub name: Name,
    pub value: Option<Value>,
}

impl Variable {
    /// A freshly declared, uninitialized variable.
    pub fn new(name: Name) -> Self {
        Variable { name, value: None }
    }
}

/// The dynamic state of one in-flight invocation of a template.
///
/// Frames are created at call time and destroyed on return; under
/// recursion several frames of the same template coexist on the stack and
/// each keeps its own bindings.
#[derive(Debug)]
pub struct ActivationFrame {
    /// The template this frame is executing.
    pub template: TemplateId,
    /// The template's name, denormalized for the name-indexed stack search.
    pub name: Name,
    parameters: FxHashMap<Name, Variable>,
    locals: FxHashMap<Name, Variable>,
    /// Return value, set by a return statement in a returning function.
    pub ret: Option<Value>,
    /// Set by a return statement; checked by the frame's body loop.
    pub halted: bool,
}

impl ActivationFrame {
    /// Instantiate a frame for `template`, binding `args` positionally.
    ///
    /// A parameter without a matching argument is bound uninitialized, so
    /// the error surfaces at first use; excess arguments are ignored.
    pub fn instantiate(template: &FunctionTemplate, id: TemplateId, args: &[Value]) -> Self {
        let mut parameters = FxHashMap::default();
        for (index, &name) in template.parameters.iter().enumerate() {
            parameters.insert(
                name,
                Variable {
                    name,
                    value: args.get(index).copied(),
                },
            );
        }
        ActivationFrame {
            template: id,
            name: template.name,
            parameters,
            locals: FxHashMap::default(),
            ret: None,
            halted: false,
        }
    }

    /// Look up a variable; parameter bindings are consulted before locals.
    pub fn lookup(&self, name: Name) -> Option<&Variable> {
        self.parameters.get(&name).or_else(|| self.locals.get(&name))
    }

    /// Commit a variable into this frame's locals.
    pub fn commit(&mut self, variable: Variable) {
        self.locals.insert(variable.name, variable);
    }
}
