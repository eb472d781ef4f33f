//! Reel IR - program representation for the Reel runtime.
//!
//! Reel is a small imperative, movie-quote-themed language: integer
//! arithmetic, boolean-as-integer logic, named variables, user-defined
//! (possibly nested, possibly recursive) functions, and if/else
//! conditionals. This crate owns the static side of the system:
//!
//! - `Name` / `StringInterner`: compact interned identifiers
//! - `Operand`, `Statement`, `Conditional`, `Node`: the executable tree
//! - `FunctionTemplate` / `TemplateArena`: static function descriptors with
//!   lexical nesting, referred to by identity-bearing `TemplateId`s
//! - `ProgramBuilder` / `Program`: the statement-construction API and its
//!   frozen result
//! - `errors`: the error taxonomy shared with the execution engine

mod builder;
pub mod errors;
mod interner;
mod name;
mod node;
mod operand;
mod template;

pub use builder::{Program, ProgramBuilder, WellKnownNames};
pub use interner::{InternError, SharedInterner, StringInterner};
pub use name::Name;
pub use node::{Conditional, Node, NodeSeq, Statement, StatementKind};
pub use operand::Operand;
pub use template::{FunctionTemplate, TemplateArena, TemplateId};

// Re-export the error surface at the crate root for convenience
// (canonical path is reel_ir::errors::*).
pub use errors::{RunError, RunErrorKind, RunResult};
