//! The Observable core: factories and subscribe entry points.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use crate::error::RxError;
use crate::observer::{Observer, ObserverAll};
use crate::subscriber::Subscriber;
use crate::subscription::Subscription;

type OnSubscribe<Item> = dyn Fn(Subscriber<Item>) + Send + Sync;

/// A re-subscribable description of a producer: an immutable wrapper around
/// exactly one subscription function.
///
/// Nothing executes until [`subscribe`](Observable::subscribe) is called, and
/// every subscribe runs the subscription function from scratch, so a
/// side-effecting producer re-executes per subscriber (no sharing, no
/// multicast). Cloning is cheap; clones share the same subscription function.
pub struct Observable<Item> {
  on_subscribe: Arc<OnSubscribe<Item>>,
}

impl<Item> Clone for Observable<Item> {
  fn clone(&self) -> Self { Self { on_subscribe: self.on_subscribe.clone() } }
}

impl<Item: Send + 'static> Observable<Item> {
  /// Wraps a subscription function. The function receives the gated
  /// [`Subscriber`] for one subscription and pushes events into it.
  ///
  /// ```
  /// use rxflow::prelude::*;
  ///
  /// let (tx, rx) = std::sync::mpsc::channel();
  /// Observable::create(|mut subscriber| {
  ///   subscriber.next(1);
  ///   subscriber.next(2);
  ///   subscriber.complete();
  /// })
  /// .subscribe(move |v| tx.send(v).unwrap());
  /// assert_eq!(rx.iter().collect::<Vec<_>>(), vec![1, 2]);
  /// ```
  pub fn create<F>(on_subscribe: F) -> Self
  where
    F: Fn(Subscriber<Item>) + Send + Sync + 'static,
  {
    Self { on_subscribe: Arc::new(on_subscribe) }
  }

  /// Emits one value, then completes, synchronously on the subscribing
  /// context. The value is cloned out of the shared subscription function
  /// per subscriber.
  pub fn just(value: Item) -> Self
  where
    Item: Clone + Sync,
  {
    Self::create(move |mut subscriber| {
      subscriber.next(value.clone());
      subscriber.complete();
    })
  }

  /// Emits every value of the iterable in order, then completes. The
  /// iterable is re-walked per subscription.
  pub fn from_iter<I>(iter: I) -> Self
  where
    I: IntoIterator<Item = Item> + Clone + Send + Sync + 'static,
  {
    Self::create(move |mut subscriber| {
      for value in iter.clone() {
        if subscriber.is_closed() {
          return;
        }
        subscriber.next(value);
      }
      subscriber.complete();
    })
  }

  /// Completes without emitting.
  pub fn empty() -> Self { Self::create(|mut subscriber| subscriber.complete()) }

  /// Errors without emitting.
  pub fn throw(err: RxError) -> Self {
    Self::create(move |mut subscriber| subscriber.error(err.clone()))
  }

  /// Subscribes with a value handler only. Errors reaching this subscription
  /// are surfaced on the `tracing` diagnostic channel rather than silently
  /// dropped; completion is ignored.
  pub fn subscribe<N>(&self, next: N) -> Subscription
  where
    N: FnMut(Item) + Send + 'static,
  {
    self.subscribe_all(
      next,
      |err| tracing::error!(%err, "stream error reached the default handler"),
      || {},
    )
  }

  /// Subscribes with value and error handlers; completion is ignored.
  pub fn subscribe_err<N, E>(&self, next: N, error: E) -> Subscription
  where
    N: FnMut(Item) + Send + 'static,
    E: FnMut(RxError) + Send + 'static,
  {
    self.subscribe_all(next, error, || {})
  }

  /// Subscribes with the full set of handlers.
  pub fn subscribe_all<N, E, C>(&self, next: N, error: E, complete: C) -> Subscription
  where
    N: FnMut(Item) + Send + 'static,
    E: FnMut(RxError) + Send + 'static,
    C: FnMut() + Send + 'static,
  {
    self.subscribe_observer(ObserverAll::new(next, error, complete))
  }

  /// Subscribes an [`Observer`], returning the handle that cancels further
  /// delivery to it.
  pub fn subscribe_observer<O>(&self, observer: O) -> Subscription
  where
    O: Observer<Item> + Send + 'static,
  {
    self.actual_subscribe(observer, Subscription::default())
  }

  /// Runs the subscription function against `observer`, gated by
  /// `subscription`. Operators use this to keep one flag across a whole
  /// chain. A subscription function that panics instead of signalling
  /// through the observer has the failure redirected to the observer's error
  /// callback; it never unwinds into the caller of `subscribe`.
  pub(crate) fn actual_subscribe<O>(&self, observer: O, subscription: Subscription) -> Subscription
  where
    O: Observer<Item> + Send + 'static,
  {
    tracing::debug!("new subscription");
    let subscriber = Subscriber::new(observer, subscription.clone());
    let mut panic_gate = subscriber.clone();
    if let Err(payload) = catch_unwind(AssertUnwindSafe(|| (self.on_subscribe)(subscriber))) {
      panic_gate.error(RxError::from_panic(payload));
    }
    subscription
  }
}
