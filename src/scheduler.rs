//! The scheduling indirection.
//!
//! Stream logic never spawns threads itself; it hands units of work to a
//! [`Scheduler`]. The trait promises nothing beyond eventual execution;
//! pool sizing, thread identity and ordering are properties of the concrete
//! flavor. Schedulers are long-lived resources constructed (and shut down)
//! by the hosting application, not hidden singletons.

use std::sync::Arc;

mod new_thread;
mod single_thread;
mod thread_pool;

pub use new_thread::NewThreadScheduler;
pub use single_thread::SingleThreadScheduler;
pub use thread_pool::ThreadPoolScheduler;

/// One unit of work handed to a scheduler.
pub type Task = Box<dyn FnOnce() + Send>;

/// An object that can order tasks and schedule their execution, possibly on
/// another thread.
pub trait Scheduler {
  fn schedule(&self, task: Task);
}

impl<S: Scheduler + ?Sized> Scheduler for Arc<S> {
  #[inline]
  fn schedule(&self, task: Task) { (**self).schedule(task) }
}

/// Shared handle to any scheduler flavor.
pub type SharedScheduler = Arc<dyn Scheduler + Send + Sync>;
