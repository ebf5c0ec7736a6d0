//! Error types for Ripple evaluation

use thiserror::Error;

use crate::ast::Span;
use crate::Value;

/// Errors raised by the binding layer ([`Environment`](crate::Environment)).
///
/// These carry no source location; the evaluator attaches one with
/// [`EnvironmentError::at`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnvironmentError {
    /// A name was declared twice in the same scope
    #[error("`{name}` has already been declared in this scope")]
    DuplicateDeclaration {
        /// The name
        name: String,
    },

    /// Assignment to a name that was never declared
    #[error("assignment to undeclared variable `{name}`")]
    UndefinedVariable {
        /// The name
        name: String,
    },

    /// Assignment to an immutable binding
    #[error("assignment to constant `{name}`")]
    ImmutableBinding {
        /// The name
        name: String,
    },

    /// Observer registration for a name that is not bound
    #[error("cannot observe undeclared variable `{name}`")]
    UndeclaredObserveTarget {
        /// The name
        name: String,
    },

    /// Call depth limit exceeded
    #[error("stack overflow: call depth {depth} exceeds limit {max}")]
    StackOverflow {
        /// Depth reached
        depth: usize,
        /// Configured limit
        max: usize,
    },
}

impl EnvironmentError {
    /// Attach a source location, producing an evaluation error.
    pub fn at(self, span: Span) -> EvalError {
        EvalError::from(self).with_span(span)
    }
}

/// Evaluation errors.
///
/// Every variant except [`Interrupted`](EvalError::Interrupted) is a thrown
/// signal that `try`/`catch` can intercept.
#[derive(Error, Debug, Clone)]
pub enum EvalError {
    /// A name was declared twice in the same scope
    #[error("`{name}` has already been declared in this scope")]
    DuplicateDeclaration {
        /// The name
        name: String,
        /// Source location
        span: Option<Span>,
    },

    /// Assignment to a name that was never declared
    #[error("assignment to undeclared variable `{name}`")]
    UndeclaredAssignment {
        /// The name
        name: String,
        /// Source location
        span: Option<Span>,
    },

    /// Assignment to an immutable binding
    #[error("assignment to constant `{name}`")]
    ConstAssignment {
        /// The name
        name: String,
        /// Source location
        span: Option<Span>,
    },

    /// Reference to a name that is neither bound nor a host global
    #[error("`{name}` is not defined")]
    UnknownIdentifier {
        /// The name
        name: String,
        /// Source location
        span: Option<Span>,
    },

    /// Property read or write on `null`
    #[error("cannot access property `{property}` of null")]
    NullPropertyAccess {
        /// The property
        property: String,
        /// Source location
        span: Option<Span>,
    },

    /// `for-of` over something that cannot be iterated
    #[error("{type_name} is not iterable")]
    NotIterable {
        /// Type of the operand
        type_name: String,
        /// Source location
        span: Option<Span>,
    },

    /// Call of a non-callable value
    #[error("`{callee}` is not a function")]
    NotCallable {
        /// Description of the callee
        callee: String,
        /// Source location
        span: Option<Span>,
    },

    /// Operator applied to operands it does not support
    #[error("operator `{op}` is not supported for {operands}")]
    UnsupportedOperator {
        /// The operator
        op: String,
        /// Description of the operand types
        operands: String,
        /// Source location
        span: Option<Span>,
    },

    /// Operand of the wrong type
    #[error("type mismatch: {message}")]
    TypeMismatch {
        /// What went wrong
        message: String,
        /// Source location
        span: Option<Span>,
    },

    /// Wrong number of arguments to a fixed-arity builtin
    #[error("`{name}` expects {expected} argument(s), got {got}")]
    ArityMismatch {
        /// Builtin name
        name: String,
        /// Expected count
        expected: usize,
        /// Supplied count
        got: usize,
        /// Source location
        span: Option<Span>,
    },

    /// Value thrown by a `throw` statement
    #[error("uncaught {message}")]
    UserThrown {
        /// The thrown value
        value: Value,
        /// Its string form
        message: String,
        /// Source location
        span: Option<Span>,
    },

    /// A variable observer failed (logged, never propagated)
    #[error("observer of `{name}` failed: {message}")]
    ObserverError {
        /// Observed variable
        name: String,
        /// Failure description
        message: String,
        /// Source location
        span: Option<Span>,
    },

    /// Observer registration for a name that is not bound
    #[error("cannot observe undeclared variable `{name}`")]
    UndeclaredObserveTarget {
        /// The name
        name: String,
        /// Source location
        span: Option<Span>,
    },

    /// Call depth limit exceeded
    #[error("stack overflow: call depth {depth} exceeds limit {max}")]
    StackOverflow {
        /// Depth reached
        depth: usize,
        /// Configured limit
        max: usize,
        /// Source location
        span: Option<Span>,
    },

    /// Module loader failure
    #[error("cannot load module `{path}`: {message}")]
    ModuleLoad {
        /// Requested path
        path: String,
        /// Loader error
        message: String,
        /// Source location
        span: Option<Span>,
    },

    /// A builtin or host method reported an error
    #[error("{name}: {message}")]
    HostError {
        /// Builtin or method name
        name: String,
        /// Error message
        message: String,
        /// Source location
        span: Option<Span>,
    },

    /// `break` reached a function or program boundary
    #[error("`break` outside of a loop or switch")]
    BreakOutsideLoop {
        /// Source location
        span: Option<Span>,
    },

    /// `continue` reached a function or program boundary
    #[error("`continue` outside of a loop")]
    ContinueOutsideLoop {
        /// Source location
        span: Option<Span>,
    },

    /// `return` at the top level of a program
    #[error("`return` outside of a function")]
    ReturnOutsideFunction {
        /// Source location
        span: Option<Span>,
    },

    /// Evaluation was interrupted by the host
    #[error("evaluation interrupted")]
    Interrupted,
}

impl From<EnvironmentError> for EvalError {
    fn from(err: EnvironmentError) -> Self {
        match err {
            EnvironmentError::DuplicateDeclaration { name } => {
                EvalError::DuplicateDeclaration { name, span: None }
            }
            EnvironmentError::UndefinedVariable { name } => {
                EvalError::UndeclaredAssignment { name, span: None }
            }
            EnvironmentError::ImmutableBinding { name } => {
                EvalError::ConstAssignment { name, span: None }
            }
            EnvironmentError::UndeclaredObserveTarget { name } => {
                EvalError::UndeclaredObserveTarget { name, span: None }
            }
            EnvironmentError::StackOverflow { depth, max } => EvalError::StackOverflow {
                depth,
                max,
                span: None,
            },
        }
    }
}

impl EvalError {
    /// Source location of the error, if known.
    pub fn span(&self) -> Option<Span> {
        match self {
            EvalError::DuplicateDeclaration { span, .. }
            | EvalError::UndeclaredAssignment { span, .. }
            | EvalError::ConstAssignment { span, .. }
            | EvalError::UnknownIdentifier { span, .. }
            | EvalError::NullPropertyAccess { span, .. }
            | EvalError::NotIterable { span, .. }
            | EvalError::NotCallable { span, .. }
            | EvalError::UnsupportedOperator { span, .. }
            | EvalError::TypeMismatch { span, .. }
            | EvalError::ArityMismatch { span, .. }
            | EvalError::UserThrown { span, .. }
            | EvalError::ObserverError { span, .. }
            | EvalError::UndeclaredObserveTarget { span, .. }
            | EvalError::StackOverflow { span, .. }
            | EvalError::ModuleLoad { span, .. }
            | EvalError::HostError { span, .. }
            | EvalError::BreakOutsideLoop { span }
            | EvalError::ContinueOutsideLoop { span }
            | EvalError::ReturnOutsideFunction { span } => *span,
            EvalError::Interrupted => None,
        }
    }

    /// Fill in the source location if the error does not have one yet.
    pub fn with_span(mut self, at: Span) -> Self {
        let slot = match &mut self {
            EvalError::DuplicateDeclaration { span, .. }
            | EvalError::UndeclaredAssignment { span, .. }
            | EvalError::ConstAssignment { span, .. }
            | EvalError::UnknownIdentifier { span, .. }
            | EvalError::NullPropertyAccess { span, .. }
            | EvalError::NotIterable { span, .. }
            | EvalError::NotCallable { span, .. }
            | EvalError::UnsupportedOperator { span, .. }
            | EvalError::TypeMismatch { span, .. }
            | EvalError::ArityMismatch { span, .. }
            | EvalError::UserThrown { span, .. }
            | EvalError::ObserverError { span, .. }
            | EvalError::UndeclaredObserveTarget { span, .. }
            | EvalError::StackOverflow { span, .. }
            | EvalError::ModuleLoad { span, .. }
            | EvalError::HostError { span, .. }
            | EvalError::BreakOutsideLoop { span }
            | EvalError::ContinueOutsideLoop { span }
            | EvalError::ReturnOutsideFunction { span } => span,
            EvalError::Interrupted => return self,
        };
        if slot.is_none() {
            *slot = Some(at);
        }
        self
    }

    /// Whether `try`/`catch` may intercept this error.
    pub fn is_catchable(&self) -> bool {
        !matches!(self, EvalError::Interrupted)
    }

    /// Value bound to a `catch` parameter.
    ///
    /// A `throw` hands over the thrown value itself; internal errors are
    /// caught as their message string.
    pub fn thrown_value(&self) -> Value {
        match self {
            EvalError::UserThrown { value, .. } => value.clone(),
            other => Value::string(other.to_string()),
        }
    }

    /// Location-annotated diagnostic for top-level reporting.
    pub fn diagnostic(&self) -> String {
        match self.span() {
            Some(span) if span.is_known() => format!("error at {}: {}", span, self),
            _ => format!("error: {}", self),
        }
    }
}

/// Result type alias for Ripple evaluation
pub type Result<T> = std::result::Result<T, EvalError>;

/// Get a human-readable type name for a value, used in error messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::List(_) => "list",
        Value::Record(_) => "record",
        Value::Function(_) | Value::Builtin(_) | Value::BoundMethod(_) => "function",
        Value::Host(_) => "host object",
    }
}
