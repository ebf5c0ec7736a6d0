//! Evaluation context configuration

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::host::{Console, HostGlobals};
use crate::module::ModuleLoader;
use crate::scheduler::{Scheduler, Task, TaskHandle, TaskQueue};
use crate::Value;

/// Configuration and host services for evaluation.
///
/// This is passed through all evaluation calls and controls
/// behavior like recursion limits and interruption. It also carries the
/// collaborators the evaluator talks to: host globals, the scheduler that
/// runs observers, and the module loader.
#[derive(Clone)]
pub struct EvalContext {
    /// Maximum call depth (stack overflow protection)
    pub max_call_depth: usize,

    /// Interrupt flag - set to true to abort evaluation
    pub interrupt: Arc<AtomicBool>,

    /// Whether to trace evaluation (for debugging)
    pub trace: bool,

    /// Values consulted after environment lookup fails
    pub globals: Rc<HostGlobals>,

    /// Receives observer callbacks
    pub scheduler: Rc<RefCell<dyn Scheduler>>,

    /// Resolves `import` sources
    pub loader: Option<Rc<dyn ModuleLoader>>,

    /// Names recorded by `export` statements
    pub exports: Rc<RefCell<Vec<String>>>,
}

impl Default for EvalContext {
    fn default() -> Self {
        Self {
            max_call_depth: 1000,
            interrupt: Arc::new(AtomicBool::new(false)),
            trace: false,
            globals: Rc::new(HostGlobals::standard(Console::stdout())),
            scheduler: Rc::new(RefCell::new(TaskQueue::new())),
            loader: None,
            exports: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl fmt::Debug for EvalContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvalContext")
            .field("max_call_depth", &self.max_call_depth)
            .field("interrupted", &self.is_interrupted())
            .field("trace", &self.trace)
            .field("globals", &self.globals.names())
            .field("pending_tasks", &self.scheduler.borrow().pending())
            .field("has_loader", &self.loader.is_some())
            .finish()
    }
}

impl EvalContext {
    /// Create a new context with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context with a custom call depth limit.
    pub fn with_max_call_depth(max_depth: usize) -> Self {
        Self {
            max_call_depth: max_depth,
            ..Default::default()
        }
    }

    /// Turn statement tracing on or off.
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Replace the console global.
    pub fn with_console(mut self, console: Console) -> Self {
        Rc::make_mut(&mut self.globals).register("console", Value::host(console));
        self
    }

    /// Register an extra host global.
    pub fn with_global(mut self, name: impl Into<String>, value: Value) -> Self {
        Rc::make_mut(&mut self.globals).register(name, value);
        self
    }

    /// Use a custom scheduler.
    pub fn with_scheduler(mut self, scheduler: Rc<RefCell<dyn Scheduler>>) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Install a module loader.
    pub fn with_loader(mut self, loader: Rc<dyn ModuleLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Queue a task on the scheduler.
    pub fn run_later(&self, task: Task) -> TaskHandle {
        self.scheduler.borrow_mut().run_later(task)
    }

    /// Check if evaluation has been interrupted.
    pub fn is_interrupted(&self) -> bool {
        self.interrupt.load(Ordering::Relaxed)
    }

    /// Request interruption of evaluation.
    pub fn interrupt(&self) {
        self.interrupt.store(true, Ordering::Relaxed);
    }

    /// Reset the interrupt flag.
    pub fn reset_interrupt(&self) {
        self.interrupt.store(false, Ordering::Relaxed);
    }
}
