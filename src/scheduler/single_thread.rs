use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{unbounded, Sender};

use crate::scheduler::{Scheduler, Task};

/// One dedicated worker thread draining a FIFO queue.
///
/// Tasks execute strictly in submission order, which makes this the flavor
/// `observe_on` needs when event order must be preserved. Clones share the
/// worker; when the last handle is dropped the queue is drained and the
/// worker joined.
#[derive(Clone)]
pub struct SingleThreadScheduler {
  tx: Sender<Task>,
  _worker: Arc<Worker>,
}

struct Worker {
  thread: Mutex<Option<JoinHandle<()>>>,
}

impl SingleThreadScheduler {
  pub fn new() -> Self {
    let (tx, rx) = unbounded::<Task>();
    let thread = thread::Builder::new()
      .name("rxflow-single".into())
      .spawn(move || {
        for task in rx.iter() {
          task();
        }
      })
      .expect("failed to spawn scheduler worker thread");
    Self {
      tx,
      _worker: Arc::new(Worker { thread: Mutex::new(Some(thread)) }),
    }
  }
}

impl Default for SingleThreadScheduler {
  fn default() -> Self { Self::new() }
}

impl Scheduler for SingleThreadScheduler {
  fn schedule(&self, task: Task) {
    if self.tx.send(task).is_err() {
      tracing::warn!("scheduler worker is gone; task dropped");
    }
  }
}

impl Drop for Worker {
  fn drop(&mut self) {
    if let Some(handle) = self.thread.lock().unwrap().take() {
      // the worker itself may hold the last handle; joining would deadlock
      if handle.thread().id() != thread::current().id() {
        let _ = handle.join();
      }
    }
  }
}
