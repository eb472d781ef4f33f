//! Error types for program construction and execution.
//!
//! The runtime reports every failure through [`RunError`]: a typed
//! [`RunErrorKind`] for programmatic matching plus a precomputed message
//! string. Factory functions (e.g. [`undeclared_variable`]) are the public
//! construction surface; each populates both fields.
//!
//! All errors are fatal to the current run. Nothing is caught or retried
//! internally; errors bubble unmodified from the point of detection.

use std::fmt;

/// Result of a builder operation or a program run.
pub type RunResult<T> = Result<T, RunError>;

/// Typed error category.
///
/// The language-level kinds (`OutOfBounds` through `FunctionDoesNotReturn`)
/// are the closed taxonomy a conforming front-end can provoke. The
/// remaining kinds are host-level: arithmetic faults, type misuse of
/// first-class function values, and resource exhaustion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunErrorKind {
    /// A statement or conditional was appended outside any function scope.
    OutOfBounds,
    /// An identifier resolved to neither a function, a parameter, nor a local.
    UndeclaredVariable { name: String },
    /// An identifier resolved to a variable whose value was never set.
    UninitializedVariable { name: String },
    /// A call-site name does not denote any function template.
    UndeclaredFunction { name: String },
    /// A returning function completed without producing a value.
    FunctionDoesNotReturn { name: String },

    // Host-level kinds
    DivisionByZero,
    ModuloByZero,
    IntegerOverflow { operation: String },
    /// A function value appeared where an integer was required (or vice versa).
    TypeMismatch {
        expected: String,
        got: String,
    },
    /// The activation-depth limit was exceeded.
    StackOverflow { depth: usize },

    /// Catch-all for internal misuse guards at undefined-behavior
    /// boundaries of the builder protocol.
    Custom { message: String },
}

impl fmt::Display for RunErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds => {
                write!(f, "statement defined outside the bounds of a function")
            }
            Self::UndeclaredVariable { name } => {
                write!(f, "undeclared variable '{name}' referenced")
            }
            Self::UninitializedVariable { name } => {
                write!(f, "uninitialized variable '{name}' used")
            }
            Self::UndeclaredFunction { name } => {
                write!(f, "undeclared function '{name}' invoked")
            }
            Self::FunctionDoesNotReturn { name } => {
                write!(f, "non-void function '{name}' does not return a result")
            }
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::ModuloByZero => write!(f, "modulo by zero"),
            Self::IntegerOverflow { operation } => {
                write!(f, "integer overflow in {operation}")
            }
            Self::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {expected}, got {got}")
            }
            Self::StackOverflow { depth } => {
                write!(f, "maximum activation depth exceeded (limit: {depth})")
            }
            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// Error raised during program construction or execution.
#[derive(Clone, Debug)]
pub struct RunError {
    /// Structured error category.
    pub kind: RunErrorKind,
    /// Human-readable message; equals `kind.to_string()` for factory-created
    /// errors.
    pub message: String,
}

impl RunError {
    /// Create an error with just a message, using the `Custom` kind.
    ///
    /// Prefer the specific factory functions when a structured kind exists.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: RunErrorKind::Custom {
                message: message.clone(),
            },
            message,
        }
    }

    fn from_kind(kind: RunErrorKind) -> Self {
        let message = kind.to_string();
        Self { kind, message }
    }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for RunError {}

/// Statement or conditional appended outside any function scope.
#[cold]
pub fn out_of_bounds() -> RunError {
    RunError::from_kind(RunErrorKind::OutOfBounds)
}

/// Identifier did not resolve to a function, parameter, or local.
#[cold]
pub fn undeclared_variable(name: &str) -> RunError {
    RunError::from_kind(RunErrorKind::UndeclaredVariable {
        name: name.to_string(),
    })
}

/// Variable read before any value was assigned.
#[cold]
pub fn uninitialized_variable(name: &str) -> RunError {
    RunError::from_kind(RunErrorKind::UninitializedVariable {
        name: name.to_string(),
    })
}

/// Call-site name without a matching function template.
#[cold]
pub fn undeclared_function(name: &str) -> RunError {
    RunError::from_kind(RunErrorKind::UndeclaredFunction {
        name: name.to_string(),
    })
}

/// Returning function finished without setting a return value.
#[cold]
pub fn function_does_not_return(name: &str) -> RunError {
    RunError::from_kind(RunErrorKind::FunctionDoesNotReturn {
        name: name.to_string(),
    })
}

/// Division by zero.
#[cold]
pub fn division_by_zero() -> RunError {
    RunError::from_kind(RunErrorKind::DivisionByZero)
}

/// Modulo by zero.
#[cold]
pub fn modulo_by_zero() -> RunError {
    RunError::from_kind(RunErrorKind::ModuloByZero)
}

/// Integer overflow in the named operation.
#[cold]
pub fn integer_overflow(operation: &str) -> RunError {
    RunError::from_kind(RunErrorKind::IntegerOverflow {
        operation: operation.to_string(),
    })
}

/// Operand of the wrong value shape.
#[cold]
pub fn type_mismatch(expected: &str, got: &str) -> RunError {
    RunError::from_kind(RunErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

/// Activation-depth limit exceeded.
#[cold]
pub fn activation_limit_exceeded(depth: usize) -> RunError {
    RunError::from_kind(RunErrorKind::StackOverflow { depth })
}

/// Open/close operations on function or conditional scopes do not balance.
#[cold]
pub fn unbalanced_scopes() -> RunError {
    RunError::new("function and conditional scopes are not balanced")
}

/// Buffer-mutating statement executed while no variable declaration is open.
#[cold]
pub fn no_open_declaration() -> RunError {
    RunError::new("no variable declaration is open")
}

/// Returning function invoked without a pending result slot.
#[cold]
pub fn no_result_slot(name: &str) -> RunError {
    RunError::new(format!(
        "call to returning function '{name}' without a result slot"
    ))
}
