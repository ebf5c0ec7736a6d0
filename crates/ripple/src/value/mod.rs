//! Value representation for runtime values

mod callable;
pub(crate) mod coerce;
mod display;
mod host;
mod impls;
mod json;

pub use callable::{BoundMethod, BuiltinFn, BuiltinFnPtr, Captured, Closure, FunctionValue};
pub use coerce::{format_number, parse_number};
pub use host::HostObject;

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

/// Shared, mutable list storage.
pub type ListRef = Rc<RefCell<Vec<Value>>>;

/// Shared, mutable record storage (insertion order preserved).
pub type RecordRef = Rc<RefCell<IndexMap<String, Value>>>;

/// Runtime value representation for the Ripple evaluator.
///
/// Values are organized into three tiers:
/// - Tier 1: Inline primitives (null, booleans, numbers, strings)
/// - Tier 2: Shared compound types (lists and records have reference
///   semantics; every copy of the value sees the same storage)
/// - Tier 3: Callables and host objects
#[derive(Clone)]
pub enum Value {
    // ═══════════════════════════════════════════════════════════════════
    // Tier 1: Primitives
    // ═══════════════════════════════════════════════════════════════════
    /// `null`, which also stands in for `undefined`
    Null,

    /// Boolean: `true` or `false`
    Bool(bool),

    /// Double-precision number
    Number(f64),

    /// Immutable UTF-8 string
    String(Rc<str>),

    // ═══════════════════════════════════════════════════════════════════
    // Tier 2: Compound Types
    // ═══════════════════════════════════════════════════════════════════
    /// Ordered list of values
    List(ListRef),

    /// String-keyed record
    Record(RecordRef),

    // ═══════════════════════════════════════════════════════════════════
    // Tier 3: Callables and Host Objects
    // ═══════════════════════════════════════════════════════════════════
    /// User-defined function or lambda with its captured closure
    Function(Rc<FunctionValue>),

    /// Built-in native function
    Builtin(BuiltinFn),

    /// Method of a host object, bound to its receiver
    BoundMethod(BoundMethod),

    /// Host ("foreign") object such as the console handle
    Host(Rc<dyn HostObject>),
}
