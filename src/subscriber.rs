use crate::error::RxError;
use crate::observer::{BoxedObserver, Observer};
use crate::rc::MutArc;
use crate::subscription::{Subscription, SubscriptionLike};

/// The gate between a producer and the observer handed to `subscribe`.
///
/// Every callback is first checked against the shared [`Subscription`] flag,
/// so events arriving after cancellation are swallowed here. Terminal events
/// are exactly-once per gate because the first one takes the observer out of
/// its cell; a producer that keeps emitting afterwards hits the empty cell.
/// The flag itself is set only by `unsubscribe`: an upstream gate seeing its
/// terminal must not cancel the chain, since deliveries may still be pending
/// behind it (a scheduled `observe_on` task, `concat`'s second source, a
/// `flat_map` inner stream).
///
/// Clones alias the same observer cell and flag, which is how fan-in
/// operators and scheduled tasks share one downstream.
pub struct Subscriber<Item> {
  observer: MutArc<Option<BoxedObserver<Item>>>,
  subscription: Subscription,
}

impl<Item> Subscriber<Item> {
  pub(crate) fn new<O>(observer: O, subscription: Subscription) -> Self
  where
    O: Observer<Item> + Send + 'static,
  {
    Self {
      observer: MutArc::own(Some(Box::new(observer) as BoxedObserver<Item>)),
      subscription,
    }
  }

  /// The cancellation flag of this subscription chain. Producers may park
  /// teardown resources on it via [`Subscription::add`].
  pub fn subscription(&self) -> &Subscription { &self.subscription }
}

impl<Item> Clone for Subscriber<Item> {
  fn clone(&self) -> Self {
    Self {
      observer: self.observer.clone(),
      subscription: self.subscription.clone(),
    }
  }
}

impl<Item> Observer<Item> for Subscriber<Item> {
  fn next(&mut self, value: Item) {
    if !self.subscription.is_closed() {
      self.observer.next(value);
    }
  }

  fn error(&mut self, err: RxError) {
    if !self.subscription.is_closed() {
      self.observer.error(err);
    }
  }

  fn complete(&mut self) {
    if !self.subscription.is_closed() {
      self.observer.complete();
    }
  }

  fn is_closed(&self) -> bool { self.subscription.is_closed() || self.observer.is_closed() }
}
