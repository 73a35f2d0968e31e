use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::RxError;
use crate::observer::Observer;

/// Shared mutable cell: the one place a single observer is handed to several
/// owners (scheduled tasks, fan-in sources) behind a lock.
#[derive(Default, Debug)]
pub struct MutArc<T>(Arc<Mutex<T>>);

impl<T> MutArc<T> {
  pub fn own(t: T) -> Self { Self(Arc::new(Mutex::new(t))) }

  #[inline]
  pub fn rc_deref(&self) -> MutexGuard<'_, T> { self.0.lock().unwrap() }

  #[inline]
  pub fn rc_deref_mut(&self) -> MutexGuard<'_, T> { self.0.lock().unwrap() }
}

impl<T> Clone for MutArc<T> {
  #[inline]
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

/// Shared-ownership observer. Terminal events take the inner observer out of
/// the cell, so only the first of several sharers delivers one.
impl<O, Item> Observer<Item> for MutArc<Option<O>>
where
  O: Observer<Item>,
{
  fn next(&mut self, value: Item) { self.rc_deref_mut().next(value); }

  fn error(&mut self, err: RxError) { self.rc_deref_mut().error(err); }

  fn complete(&mut self) { self.rc_deref_mut().complete(); }

  fn is_closed(&self) -> bool { self.rc_deref().is_closed() }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::observer::ObserverAll;

  #[test]
  fn sharers_deliver_terminal_once() {
    let mut completions = 0;
    {
      let cell = MutArc::own(Some(ObserverAll::new(|_: i32| {}, |_| {}, || completions += 1)));
      let mut a = cell.clone();
      let mut b = cell.clone();
      a.complete();
      b.complete();
      assert!(a.is_closed());
    }
    assert_eq!(completions, 1);
  }
}
