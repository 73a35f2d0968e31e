use std::thread;

use crate::scheduler::{Scheduler, Task};

/// Creates a new OS thread for each unit of work: the unbounded flavor
/// suited to blocking, I/O-style tasks.
#[derive(Clone, Copy, Default)]
pub struct NewThreadScheduler;

impl NewThreadScheduler {
  pub fn new() -> Self { Self }
}

impl Scheduler for NewThreadScheduler {
  fn schedule(&self, task: Task) {
    thread::spawn(task);
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use std::sync::mpsc::channel;
  use std::time::Duration;

  #[test]
  fn runs_off_the_calling_thread() {
    let scheduler = NewThreadScheduler::new();
    let (tx, rx) = channel();
    scheduler.schedule(Box::new(move || {
      tx.send(std::thread::current().id()).unwrap();
    }));
    let worker = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_ne!(worker, std::thread::current().id());
  }
}
