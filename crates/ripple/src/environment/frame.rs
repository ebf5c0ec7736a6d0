//! RAII guards for automatic scope cleanup

use std::rc::Rc;

use super::Environment;
use crate::error::EnvironmentError;
use crate::value::FunctionValue;

/// RAII guard that pops a block scope when dropped.
///
/// # Example
///
/// ```
/// use ripple::{BindingMode, Environment, Value};
///
/// let mut env = Environment::new();
/// env.declare(BindingMode::BlockMutable, "x", Value::Number(1.0)).unwrap();
///
/// {
///     let mut guard = env.scope_guard();
///     guard.declare(BindingMode::BlockMutable, "y", Value::Number(2.0)).unwrap();
/// }
/// assert!(!env.contains("y"));
/// assert!(env.contains("x"));
/// ```
pub struct ScopeGuard<'a> {
    env: &'a mut Environment,
}

/// RAII guard for a function call: both call scopes and one unit of call
/// depth are released on drop.
pub struct CallGuard<'a> {
    env: &'a mut Environment,
}

impl Environment {
    /// Create a scope guard that pushes a frame now and pops it on drop.
    pub fn scope_guard(&mut self) -> ScopeGuard<'_> {
        self.push_frame();
        ScopeGuard { env: self }
    }

    /// Enter a call of `func`.
    ///
    /// # Errors
    ///
    /// `StackOverflow` if the call depth limit is reached; no scope is
    /// pushed in that case.
    pub fn call_guard(
        &mut self,
        func: &Rc<FunctionValue>,
    ) -> Result<CallGuard<'_>, EnvironmentError> {
        self.enter_call()?;
        self.push_call_frame(func);
        Ok(CallGuard { env: self })
    }
}

impl<'a> Drop for ScopeGuard<'a> {
    fn drop(&mut self) {
        self.env.pop_frame();
    }
}

impl<'a> std::ops::Deref for ScopeGuard<'a> {
    type Target = Environment;

    fn deref(&self) -> &Self::Target {
        self.env
    }
}

impl<'a> std::ops::DerefMut for ScopeGuard<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.env
    }
}

impl<'a> Drop for CallGuard<'a> {
    fn drop(&mut self) {
        self.env.pop_call_frame();
        self.env.exit_call();
    }
}

impl<'a> std::ops::Deref for CallGuard<'a> {
    type Target = Environment;

    fn deref(&self) -> &Self::Target {
        self.env
    }
}

impl<'a> std::ops::DerefMut for CallGuard<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.env
    }
}
