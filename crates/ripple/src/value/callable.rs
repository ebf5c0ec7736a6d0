//! Callable value types: functions, builtins, and bound host methods

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use super::{HostObject, Value};
use crate::ast::{FunctionDef, Stmt};
use crate::environment::BindingMode;

/// Type alias for builtin function pointers to reduce complexity
pub type BuiltinFnPtr = Rc<dyn Fn(&[Value]) -> Result<Value, String>>;

/// One captured binding of a closure snapshot.
#[derive(Debug, Clone)]
pub struct Captured {
    /// Value at capture time
    pub value: Value,
    /// Declaration mode, re-applied when the snapshot is installed
    pub mode: BindingMode,
}

/// Snapshot of every binding visible where a function was created.
///
/// The snapshot is taken once and copied into fresh bindings on every call,
/// so a function never shares live storage with the scope that declared it.
pub type Closure = IndexMap<String, Captured>;

/// A user-defined function.
///
/// Stores the body AST directly for interpretation.
#[derive(Clone)]
pub struct FunctionValue {
    /// Function name (`None` for anonymous functions)
    pub name: Option<String>,

    /// Parameter names
    pub params: Vec<String>,

    /// The function body
    pub body: Rc<[Stmt]>,

    /// Captured bindings (name -> value)
    /// Uses Rc to allow sharing between copies of the function value
    pub closure: Rc<Closure>,
}

impl FunctionValue {
    /// Create a function value from its definition and a closure snapshot.
    pub fn new(def: &FunctionDef, closure: Closure) -> Self {
        Self {
            name: def.name.clone(),
            params: def.params.clone(),
            body: Rc::clone(&def.body),
            closure: Rc::new(closure),
        }
    }

    /// Name used in diagnostics.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<anonymous>")
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionValue")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("captured", &self.closure.len())
            .finish()
    }
}

/// A built-in native function.
///
/// These are Rust functions exposed to scripts.
#[derive(Clone)]
pub struct BuiltinFn {
    /// Function name (for display/debugging)
    pub name: String,

    /// Arity (-1 for variadic)
    pub arity: i32,

    /// The actual function pointer
    pub func: BuiltinFnPtr,
}

impl BuiltinFn {
    /// Create a builtin from a closure.
    pub fn new(
        name: impl Into<String>,
        arity: i32,
        func: impl Fn(&[Value]) -> Result<Value, String> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            arity,
            func: Rc::new(func),
        }
    }
}

impl fmt::Debug for BuiltinFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BuiltinFn({})", self.name)
    }
}

/// A host object's method bound to its receiver.
///
/// Calling it short-circuits body execution and dispatches straight to
/// [`HostObject::invoke`].
#[derive(Clone)]
pub struct BoundMethod {
    /// Object the method belongs to
    pub receiver: Rc<dyn HostObject>,

    /// Method name
    pub method: String,
}

impl BoundMethod {
    /// Invoke the method with the given arguments.
    pub fn invoke(&self, args: &[Value]) -> Result<Value, String> {
        self.receiver.invoke(&self.method, args)
    }
}

impl fmt::Debug for BoundMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BoundMethod({}.{})", self.receiver.type_name(), self.method)
    }
}
