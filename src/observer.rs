//! Observer trait and implementations
//!
//! The Observer is the consumer side of a stream: it receives values, at most
//! one terminal event (an error or a completion), and nothing after that.

use crate::error::RxError;

/// The three-callback sink every stage of a subscription chain implements.
///
/// `is_closed` lets producers stop emitting early once the downstream has no
/// further interest (cancelled, or already terminated).
pub trait Observer<Item> {
  /// Receive the next value from the stream.
  fn next(&mut self, value: Item);

  /// Receive a terminal error. No event may follow it on the same
  /// subscription.
  fn error(&mut self, err: RxError);

  /// Receive the completion signal. No event may follow it on the same
  /// subscription.
  fn complete(&mut self);

  /// Whether this observer will accept more events.
  fn is_closed(&self) -> bool;
}

/// Boxed observer handed across operator and scheduler boundaries.
pub type BoxedObserver<Item> = Box<dyn Observer<Item> + Send>;

impl<Item> Observer<Item> for BoxedObserver<Item> {
  #[inline]
  fn next(&mut self, value: Item) { (**self).next(value) }

  #[inline]
  fn error(&mut self, err: RxError) { (**self).error(err) }

  #[inline]
  fn complete(&mut self) { (**self).complete() }

  #[inline]
  fn is_closed(&self) -> bool { (**self).is_closed() }
}

/// `None` ignores all events; `Some` delegates to the inner observer and is
/// taken on the first terminal event, so repeated terminals are naturally
/// silenced.
impl<O, Item> Observer<Item> for Option<O>
where
  O: Observer<Item>,
{
  fn next(&mut self, value: Item) {
    if let Some(inner) = self {
      inner.next(value);
    }
  }

  fn error(&mut self, err: RxError) {
    if let Some(mut inner) = self.take() {
      inner.error(err);
    }
  }

  fn complete(&mut self) {
    if let Some(mut inner) = self.take() {
      inner.complete();
    }
  }

  fn is_closed(&self) -> bool { self.as_ref().map_or(true, Observer::is_closed) }
}

/// Observer assembled from three callbacks, used by the `subscribe_*`
/// convenience entry points.
pub struct ObserverAll<N, E, C> {
  next: N,
  error: E,
  complete: C,
}

impl<N, E, C> ObserverAll<N, E, C> {
  pub fn new(next: N, error: E, complete: C) -> Self { Self { next, error, complete } }
}

impl<Item, N, E, C> Observer<Item> for ObserverAll<N, E, C>
where
  N: FnMut(Item),
  E: FnMut(RxError),
  C: FnMut(),
{
  #[inline]
  fn next(&mut self, value: Item) { (self.next)(value) }

  #[inline]
  fn error(&mut self, err: RxError) { (self.error)(err) }

  #[inline]
  fn complete(&mut self) { (self.complete)() }

  #[inline]
  fn is_closed(&self) -> bool { false }
}

#[cfg(test)]
mod test {
  use super::*;

  struct TestObserver {
    values: Vec<i32>,
    completed: bool,
  }

  impl Observer<i32> for TestObserver {
    fn next(&mut self, value: i32) { self.values.push(value); }

    fn error(&mut self, _: RxError) {}

    fn complete(&mut self) { self.completed = true; }

    fn is_closed(&self) -> bool { self.completed }
  }

  #[test]
  fn observer_receives_values() {
    let mut obs = TestObserver { values: vec![], completed: false };
    obs.next(1);
    obs.next(2);
    assert_eq!(obs.values, vec![1, 2]);
    assert!(!obs.is_closed());
  }

  #[test]
  fn option_observer_takes_on_terminal() {
    let mut obs = Some(TestObserver { values: vec![], completed: false });
    obs.next(1);
    obs.complete();
    assert!(obs.is_none());
    assert!(obs.is_closed());
    // events after the terminal are dropped rather than delivered
    obs.next(2);
    obs.complete();
  }

  #[test]
  fn closure_observer_dispatches() {
    let mut sum = 0;
    let mut completed = false;
    {
      let mut obs = ObserverAll::new(|v: i32| sum += v, |_err| {}, || completed = true);
      obs.next(10);
      obs.next(20);
      obs.complete();
    }
    assert_eq!(sum, 30);
    assert!(completed);
  }
}
