use std::io;

use futures::executor::ThreadPool;

use crate::scheduler::{Scheduler, Task};

/// Fixed-size worker pool, the "computation" flavor.
///
/// Tasks may run on any worker, so this scheduler does not preserve
/// submission order across tasks; use [`SingleThreadScheduler`] where
/// `observe_on` must keep event order.
///
/// [`SingleThreadScheduler`]: crate::scheduler::SingleThreadScheduler
#[derive(Clone)]
pub struct ThreadPoolScheduler {
  pool: ThreadPool,
}

impl ThreadPoolScheduler {
  /// A pool sized to the number of CPUs.
  pub fn new() -> io::Result<Self> { Ok(Self { pool: ThreadPool::new()? }) }

  pub fn with_pool_size(size: usize) -> io::Result<Self> {
    Ok(Self { pool: ThreadPool::builder().pool_size(size).create()? })
  }
}

impl Scheduler for ThreadPoolScheduler {
  fn schedule(&self, task: Task) { self.pool.spawn_ok(async move { task() }); }
}

#[cfg(test)]
mod test {
  use super::*;
  use std::sync::mpsc::channel;
  use std::time::Duration;

  #[test]
  fn every_task_eventually_runs() {
    let scheduler = ThreadPoolScheduler::with_pool_size(2).unwrap();
    let (tx, rx) = channel();
    for i in 0..8 {
      let tx = tx.clone();
      scheduler.schedule(Box::new(move || {
        tx.send(i).unwrap();
      }));
    }
    drop(tx);
    let mut got: Vec<i32> = rx.iter().collect();
    got.sort_unstable();
    assert_eq!(got, (0..8).collect::<Vec<_>>());
  }

  #[test]
  fn runs_off_the_calling_thread() {
    let scheduler = ThreadPoolScheduler::new().unwrap();
    let (tx, rx) = channel();
    scheduler.schedule(Box::new(move || {
      tx.send(std::thread::current().id()).unwrap();
    }));
    let worker = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_ne!(worker, std::thread::current().id());
  }
}
