//! # Ripple
//!
//! A tree-walking evaluator for a small JavaScript-like scripting language
//! with reactive variables.
//!
//! Ripple executes an already-parsed AST ([`ast`]) directly. Beyond the
//! usual statements and expressions, the language has two features of its
//! own:
//!
//! - **Guarded blocks**: `when (cond) { ... }` sub-blocks inside any
//!   statement list act as first-match-wins branches, with `otherwise { ... }`
//!   running when no guard fired.
//! - **Observation**: `observe x handler` registers a callback that is
//!   scheduled whenever `x` changes value; `observe (a, b) handler` watches
//!   several variables with one callback.
//!
//! ## Architecture
//!
//! - **Environment**: arena of lexical scopes holding bindings and their
//!   observers
//! - **Evaluator**: the [`Evaluate`] / [`Execute`] traits over the AST, with
//!   `break`/`continue`/`return` carried as [`ControlFlow`] values and thrown
//!   errors as [`EvalError`]
//! - **Host services**: globals such as `console`, a [`Scheduler`] for
//!   observer callbacks, and a [`ModuleLoader`] for imports
//!
//! ## Example
//!
//! ```
//! use ripple::ast::build::*;
//! use ripple::{Console, EvalContext, Interpreter};
//!
//! let console = Console::buffered();
//! let lines = console.lines();
//! let mut interp = Interpreter::with_context(EvalContext::new().with_console(console));
//!
//! let script = program(vec![
//!     let_("n", num(1.0)),
//!     observe(&["n"], arrow(&["old", "new"], ident("new"))),
//!     when(lt(ident("n"), num(5.0)), vec![log(vec![string("small")])]),
//!     otherwise(vec![log(vec![string("large")])]),
//! ]);
//! interp.run(&script).unwrap();
//! assert_eq!(lines.borrow().as_slice(), ["small"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod context;
pub mod environment;
pub mod error;
pub mod eval;
pub mod host;
pub mod interpreter;
pub mod module;
pub mod scheduler;
mod stack;
pub mod value;

// Re-export main types
pub use context::EvalContext;
pub use environment::{
    Binding, BindingMode, CallGuard, Environment, MultiObserver, Mutation, ScopeGuard,
};
pub use error::{EnvironmentError, EvalError, Result};
pub use eval::{call_value, eval_expr, ControlFlow, Evaluate, Execute};
pub use host::{Console, HostGlobals};
pub use interpreter::Interpreter;
pub use module::{Exports, ModuleLoader, StaticModuleLoader};
pub use scheduler::{run_pending, Scheduler, TaskHandle, TaskQueue};
pub use value::{BuiltinFn, FunctionValue, HostObject, Value};

/// Ripple version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
