//! Runtime environment managing variable bindings and their observers

mod frame;

pub use frame::{CallGuard, ScopeGuard};

use std::rc::Rc;

use indexmap::IndexMap;

use crate::ast::{DeclKind, Span};
use crate::error::EnvironmentError;
use crate::value::{Captured, Closure, FunctionValue, Value};

/// Declaration kind of a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingMode {
    /// Function-scoped mutable binding: `var x`
    Mutable,

    /// Block-scoped mutable binding: `let x`
    BlockMutable,

    /// Immutable binding: `const x`, imports
    Immutable,

    /// Function declaration: `function f() {}`
    Function,
}

impl BindingMode {
    /// Whether assignment to a binding of this kind is allowed.
    pub fn is_mutable(self) -> bool {
        !matches!(self, BindingMode::Immutable)
    }
}

impl From<DeclKind> for BindingMode {
    fn from(kind: DeclKind) -> Self {
        match kind {
            DeclKind::Var => BindingMode::Mutable,
            DeclKind::Let => BindingMode::BlockMutable,
            DeclKind::Const => BindingMode::Immutable,
        }
    }
}

/// A multi-variable observer registration.
///
/// The same registration is attached to every watched binding.
#[derive(Debug)]
pub struct MultiObserver {
    /// Watched variable names, in registration order
    pub names: Vec<String>,

    /// Handler receiving the change-info record
    pub handler: Value,
}

/// A single variable binding.
#[derive(Debug, Clone)]
pub struct Binding {
    /// Declaration kind
    pub mode: BindingMode,

    /// The bound value
    pub value: Value,

    /// Single-variable observers, in registration order
    pub observers: Vec<Value>,

    /// Multi-variable observers watching this binding
    pub multi_observers: Vec<Rc<MultiObserver>>,

    /// Where this binding was declared (for error messages)
    pub span: Option<Span>,
}

impl Binding {
    fn new(mode: BindingMode, value: Value, span: Option<Span>) -> Self {
        Self {
            mode,
            value,
            observers: Vec::new(),
            multi_observers: Vec::new(),
            span,
        }
    }

    /// Whether anything is watching this binding.
    pub fn is_observed(&self) -> bool {
        !self.observers.is_empty() || !self.multi_observers.is_empty()
    }
}

/// Record of an assignment that changed a binding's value.
///
/// Carries the observers registered at assignment time so the caller can
/// schedule them after the write.
#[derive(Debug, Clone)]
pub struct Mutation {
    /// Assigned name
    pub name: String,

    /// Value before the assignment
    pub old: Value,

    /// Value after the assignment
    pub new: Value,

    /// Single-variable observers to notify
    pub observers: Vec<Value>,

    /// Multi-variable observers to notify
    pub multi_observers: Vec<Rc<MultiObserver>>,
}

/// Role of a scope in the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// The bottom scope, alive for the whole run
    Global,

    /// Block, loop, or catch scope
    Block,

    /// Re-installed closure snapshot of a call
    Closure,

    /// Parameters and `var` declarations of a call
    Function,
}

#[derive(Debug, Clone)]
struct Scope {
    kind: ScopeKind,
    parent: Option<usize>,
    bindings: IndexMap<String, Binding>,
}

impl Scope {
    fn new(kind: ScopeKind, parent: Option<usize>) -> Self {
        Self {
            kind,
            parent,
            bindings: IndexMap::new(),
        }
    }
}

/// The runtime environment: an arena of scopes linked to their lexical parent.
///
/// Scopes are pushed and popped in strict stack order, so the current scope
/// is always the last one in the arena. A call scope links straight to the
/// global scope, which keeps the caller's locals out of reach of the callee.
///
/// # Example
///
/// ```
/// use ripple::{BindingMode, Environment, Value};
///
/// let mut env = Environment::new();
/// env.declare(BindingMode::BlockMutable, "x", Value::Number(1.0)).unwrap();
///
/// env.push_frame();
/// env.declare(BindingMode::BlockMutable, "x", Value::Number(10.0)).unwrap();
/// assert_eq!(env.get("x"), Some(&Value::Number(10.0)));
/// env.pop_frame();
///
/// assert_eq!(env.get("x"), Some(&Value::Number(1.0)));
/// ```
#[derive(Debug, Clone)]
pub struct Environment {
    /// Scope arena; index 0 is the global scope
    scopes: Vec<Scope>,

    /// Current call depth (for recursion limiting)
    call_depth: usize,

    /// Maximum allowed call depth
    max_call_depth: usize,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Create a new environment holding only the global scope.
    pub fn new() -> Self {
        Self::with_max_call_depth(1000)
    }

    /// Create an environment with a custom call depth limit.
    pub fn with_max_call_depth(max_depth: usize) -> Self {
        Self {
            scopes: vec![Scope::new(ScopeKind::Global, None)],
            call_depth: 0,
            max_call_depth: max_depth,
        }
    }

    fn current(&self) -> usize {
        self.scopes.len() - 1
    }

    // ═══════════════════════════════════════════════════════════════════
    // Scope Entry/Exit
    // ═══════════════════════════════════════════════════════════════════

    /// Enter a block scope nested in the current one.
    pub fn push_frame(&mut self) {
        let parent = self.current();
        self.scopes.push(Scope::new(ScopeKind::Block, Some(parent)));
    }

    /// Enter a call of `func`: a closure scope linked to the global scope,
    /// and a function scope on top of it for parameters.
    ///
    /// The closure scope holds a fresh copy of every captured binding. A
    /// named function that did not capture its own name gets it bound
    /// there, so it can recurse.
    pub fn push_call_frame(&mut self, func: &Rc<FunctionValue>) {
        let mut closure_scope = Scope::new(ScopeKind::Closure, Some(0));
        for (name, captured) in func.closure.iter() {
            closure_scope.bindings.insert(
                name.clone(),
                Binding::new(captured.mode, captured.value.clone(), None),
            );
        }
        if let Some(name) = &func.name {
            if !closure_scope.bindings.contains_key(name) {
                closure_scope.bindings.insert(
                    name.clone(),
                    Binding::new(BindingMode::Function, Value::Function(Rc::clone(func)), None),
                );
            }
        }
        self.scopes.push(closure_scope);
        let parent = self.current();
        self.scopes.push(Scope::new(ScopeKind::Function, Some(parent)));
    }

    /// Exit the current scope.
    ///
    /// Never pops the global scope.
    pub fn pop_frame(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Exit a call entered with [`push_call_frame`](Self::push_call_frame).
    pub fn pop_call_frame(&mut self) {
        self.pop_frame();
        self.pop_frame();
    }

    /// Number of live scopes, the global scope included.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Check if we're at global scope.
    pub fn is_global_scope(&self) -> bool {
        self.scopes.len() == 1
    }

    // ═══════════════════════════════════════════════════════════════════
    // Call Depth Tracking (Stack Overflow Protection)
    // ═══════════════════════════════════════════════════════════════════

    /// Enter a function call. Returns error if max depth exceeded.
    pub fn enter_call(&mut self) -> Result<(), EnvironmentError> {
        if self.call_depth >= self.max_call_depth {
            return Err(EnvironmentError::StackOverflow {
                depth: self.call_depth,
                max: self.max_call_depth,
            });
        }
        self.call_depth += 1;
        Ok(())
    }

    /// Exit a function call.
    pub fn exit_call(&mut self) {
        self.call_depth = self.call_depth.saturating_sub(1);
    }

    /// Get current call depth.
    pub fn call_depth(&self) -> usize {
        self.call_depth
    }

    // ═══════════════════════════════════════════════════════════════════
    // Declaration
    // ═══════════════════════════════════════════════════════════════════

    /// Declare a name.
    ///
    /// `var` declarations land in the nearest function or global scope;
    /// everything else lands in the current scope.
    ///
    /// # Errors
    ///
    /// `DuplicateDeclaration` if the target scope already holds `name`,
    /// whatever its kind.
    pub fn declare(
        &mut self,
        mode: BindingMode,
        name: impl Into<String>,
        value: Value,
    ) -> Result<(), EnvironmentError> {
        self.declare_at(mode, name, value, None)
    }

    /// Declare a name, recording where it was declared.
    pub fn declare_at(
        &mut self,
        mode: BindingMode,
        name: impl Into<String>,
        value: Value,
        span: Option<Span>,
    ) -> Result<(), EnvironmentError> {
        let name = name.into();
        let target = match mode {
            BindingMode::Mutable => self.var_scope(),
            _ => self.current(),
        };
        let scope = &mut self.scopes[target];
        if scope.bindings.contains_key(&name) {
            return Err(EnvironmentError::DuplicateDeclaration { name });
        }
        scope.bindings.insert(name, Binding::new(mode, value, span));
        Ok(())
    }

    /// Bind `name` in the current scope, replacing any binding of the same
    /// name there. Used for parameters, `this`, and loop variables.
    pub fn define(&mut self, name: impl Into<String>, value: Value, mode: BindingMode) {
        let current = self.current();
        self.scopes[current]
            .bindings
            .insert(name.into(), Binding::new(mode, value, None));
    }

    /// Overwrite the value of a binding in the current scope without
    /// mutability checks or observer dispatch.
    ///
    /// Loop statements use this to advance their loop variable.
    pub fn set_local(&mut self, name: &str, value: Value) -> bool {
        let current = self.current();
        match self.scopes[current].bindings.get_mut(name) {
            Some(binding) => {
                binding.value = value;
                true
            }
            None => false,
        }
    }

    fn var_scope(&self) -> usize {
        let mut idx = self.current();
        loop {
            let scope = &self.scopes[idx];
            match (scope.kind, scope.parent) {
                (ScopeKind::Function | ScopeKind::Global, _) | (_, None) => return idx,
                (_, Some(parent)) => idx = parent,
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Lookup
    // ═══════════════════════════════════════════════════════════════════

    fn position(&self, name: &str) -> Option<usize> {
        let mut idx = Some(self.current());
        while let Some(i) = idx {
            let scope = &self.scopes[i];
            if scope.bindings.contains_key(name) {
                return Some(i);
            }
            idx = scope.parent;
        }
        None
    }

    /// Resolve a name from the innermost scope outward.
    pub fn resolve(&self, name: &str) -> Option<&Binding> {
        self.position(name)
            .and_then(|i| self.scopes[i].bindings.get(name))
    }

    fn resolve_mut(&mut self, name: &str) -> Option<&mut Binding> {
        let idx = self.position(name)?;
        self.scopes[idx].bindings.get_mut(name)
    }

    /// Look up the value bound to a name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.resolve(name).map(|b| &b.value)
    }

    /// Check if a name resolves from the current scope.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Check if a binding exists in the current (innermost) scope only.
    pub fn contains_in_current_scope(&self, name: &str) -> bool {
        self.scopes[self.current()].bindings.contains_key(name)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Assignment (Mutation)
    // ═══════════════════════════════════════════════════════════════════

    /// Assign a new value to an existing binding.
    ///
    /// Returns the [`Mutation`] when the value changed, so the caller can
    /// notify observers; same-value assignment returns `None`.
    ///
    /// # Errors
    ///
    /// - `UndefinedVariable` if the binding doesn't exist
    /// - `ImmutableBinding` if the binding is `const`
    pub fn assign(
        &mut self,
        name: &str,
        value: Value,
    ) -> Result<Option<Mutation>, EnvironmentError> {
        let binding = self
            .resolve_mut(name)
            .ok_or_else(|| EnvironmentError::UndefinedVariable {
                name: name.to_string(),
            })?;

        if !binding.mode.is_mutable() {
            return Err(EnvironmentError::ImmutableBinding {
                name: name.to_string(),
            });
        }

        if binding.value.same_value(&value) {
            return Ok(None);
        }

        let old = std::mem::replace(&mut binding.value, value.clone());
        Ok(Some(Mutation {
            name: name.to_string(),
            old,
            new: value,
            observers: binding.observers.clone(),
            multi_observers: binding.multi_observers.clone(),
        }))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Observers
    // ═══════════════════════════════════════════════════════════════════

    /// Attach a single-variable observer to the binding `name` resolves to.
    pub fn observe(&mut self, name: &str, handler: Value) -> Result<(), EnvironmentError> {
        let binding =
            self.resolve_mut(name)
                .ok_or_else(|| EnvironmentError::UndeclaredObserveTarget {
                    name: name.to_string(),
                })?;
        binding.observers.push(handler);
        Ok(())
    }

    /// Attach one multi-variable observer to every named binding.
    ///
    /// Nothing is registered unless every name resolves.
    pub fn observe_many(&mut self, names: &[String], handler: Value) -> Result<(), EnvironmentError> {
        if let Some(missing) = names.iter().find(|n| !self.contains(n)) {
            return Err(EnvironmentError::UndeclaredObserveTarget {
                name: missing.clone(),
            });
        }
        let registration = Rc::new(MultiObserver {
            names: names.to_vec(),
            handler,
        });
        for name in names {
            if let Some(binding) = self.resolve_mut(name) {
                binding.multi_observers.push(Rc::clone(&registration));
            }
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Closure Capture
    // ═══════════════════════════════════════════════════════════════════

    /// Snapshot every binding visible from the current scope.
    ///
    /// Innermost bindings win over outer ones of the same name.
    pub fn capture(&self) -> Closure {
        let mut closure = Closure::new();
        let mut idx = Some(self.current());
        while let Some(i) = idx {
            let scope = &self.scopes[i];
            for (name, binding) in scope.bindings.iter() {
                if !closure.contains_key(name) {
                    closure.insert(
                        name.clone(),
                        Captured {
                            value: binding.value.clone(),
                            mode: binding.mode,
                        },
                    );
                }
            }
            idx = scope.parent;
        }
        closure
    }

    // ═══════════════════════════════════════════════════════════════════
    // Iteration and Inspection
    // ═══════════════════════════════════════════════════════════════════

    /// Get all binding names in the current scope, in declaration order.
    pub fn names_in_current_scope(&self) -> Vec<&str> {
        self.scopes[self.current()]
            .bindings
            .keys()
            .map(String::as_str)
            .collect()
    }

    /// Get every name visible from the current scope (for completion).
    pub fn all_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        let mut idx = Some(self.current());
        while let Some(i) = idx {
            let scope = &self.scopes[i];
            for name in scope.bindings.keys() {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
            idx = scope.parent;
        }
        names
    }

    /// Clear all bindings and scopes (reset to initial state).
    pub fn clear(&mut self) {
        self.scopes = vec![Scope::new(ScopeKind::Global, None)];
        self.call_depth = 0;
    }
}
