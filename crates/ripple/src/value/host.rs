//! Capability trait for host ("foreign") objects

use super::Value;

/// An object provided by the embedding host.
///
/// The evaluator never inspects host objects directly: member access goes
/// through [`get_property`](HostObject::get_property) and
/// [`has_method`](HostObject::has_method), and calls through
/// [`invoke`](HostObject::invoke). New host object kinds plug in by
/// implementing this trait.
pub trait HostObject {
    /// Name shown in diagnostics and by `console.log`.
    fn type_name(&self) -> &str;

    /// Read a plain property. `None` falls through to method lookup.
    fn get_property(&self, _name: &str) -> Option<Value> {
        None
    }

    /// Write a property.
    fn set_property(&self, name: &str, _value: Value) -> Result<(), String> {
        Err(format!(
            "cannot set property `{}` on {}",
            name,
            self.type_name()
        ))
    }

    /// Whether `name` is an invocable method.
    fn has_method(&self, name: &str) -> bool;

    /// Invoke a method.
    fn invoke(&self, method: &str, args: &[Value]) -> Result<Value, String>;

    /// Values produced when the object is iterated with `for-of`.
    ///
    /// `None` means the object is not iterable.
    fn enumerate(&self) -> Option<Vec<Value>> {
        None
    }
}
