//! "Run later" scheduling used by reactive observers
//!
//! The evaluator never runs observer callbacks inline. It hands them to a
//! [`Scheduler`] as tasks, and the host drains the queue between turns
//! (see [`run_pending`]).

use std::collections::VecDeque;
use std::fmt;

use crate::{Environment, EvalContext, EvalError};

/// A deferred unit of work.
pub type Task = Box<dyn FnOnce(&mut Environment, &EvalContext)>;

/// Opaque handle identifying a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

/// The "run later" contract.
pub trait Scheduler {
    /// Queue a task for a future turn.
    fn run_later(&mut self, task: Task) -> TaskHandle;

    /// Drop a task that has not run yet. Returns whether it was found.
    fn cancel(&mut self, handle: TaskHandle) -> bool;

    /// Take the next task due to run.
    fn next_task(&mut self) -> Option<Task>;

    /// Number of queued tasks.
    fn pending(&self) -> usize;
}

/// FIFO task queue.
#[derive(Default)]
pub struct TaskQueue {
    next_id: u64,
    queue: VecDeque<(TaskHandle, Task)>,
}

impl TaskQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }
}

impl fmt::Debug for TaskQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskQueue")
            .field("pending", &self.queue.len())
            .finish()
    }
}

impl Scheduler for TaskQueue {
    fn run_later(&mut self, task: Task) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.queue.push_back((handle, task));
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.queue.len();
        self.queue.retain(|(h, _)| *h != handle);
        self.queue.len() != before
    }

    fn next_task(&mut self) -> Option<Task> {
        self.queue.pop_front().map(|(_, task)| task)
    }

    fn pending(&self) -> usize {
        self.queue.len()
    }
}

/// Run queued tasks until the scheduler is empty.
///
/// Tasks scheduled while draining run in the same call, after the ones
/// already queued. Returns the number of tasks run.
///
/// # Errors
///
/// `Interrupted` if the interrupt flag is raised between tasks.
pub fn run_pending(env: &mut Environment, ctx: &EvalContext) -> Result<usize, EvalError> {
    let mut ran = 0;
    loop {
        if ctx.is_interrupted() {
            return Err(EvalError::Interrupted);
        }
        // The borrow must end before the task runs: tasks schedule more tasks.
        let next = ctx.scheduler.borrow_mut().next_task();
        match next {
            Some(task) => {
                task(env, ctx);
                ran += 1;
            }
            None => break,
        }
    }
    if ran > 0 {
        tracing::debug!(tasks = ran, "drained scheduler");
    }
    Ok(ran)
}
