//! Cancellation handles.
//!
//! A [`Subscription`] is the flag returned by `subscribe`: one shared boolean
//! cell every stage of the chain consults before delivering an event. A
//! [`CompositeSubscription`] groups child subscriptions so a fan-out operator
//! can cancel them all at once.

use smallvec::SmallVec;
use std::mem;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Handle allowing a stream to be deregistered before it has delivered all of
/// its events.
pub trait SubscriptionLike {
  /// Stops further delivery. Idempotent: repeat calls are no-ops.
  fn unsubscribe(&mut self);

  fn is_closed(&self) -> bool;
}

impl<T: SubscriptionLike + ?Sized> SubscriptionLike for Box<T> {
  #[inline]
  fn unsubscribe(&mut self) { (**self).unsubscribe() }

  #[inline]
  fn is_closed(&self) -> bool { (**self).is_closed() }
}

type TearDown = SmallVec<[Box<dyn SubscriptionLike + Send>; 1]>;

/// The cancellation flag shared by every stage of one subscription chain.
///
/// Clones alias the same flag. Besides the flag itself a subscription carries
/// a teardown list: resources registered with [`add`](Subscription::add) are
/// cancelled on the first `unsubscribe`, which is how disposing a merged
/// stream reaches its still-active child subscriptions.
#[derive(Clone, Default)]
pub struct Subscription {
  closed: Arc<AtomicBool>,
  teardown: Arc<Mutex<TearDown>>,
}

impl Subscription {
  /// Registers `teardown` to be cancelled together with this subscription.
  /// If the subscription is already closed the teardown is cancelled
  /// immediately.
  pub fn add(&self, teardown: impl SubscriptionLike + Send + 'static) {
    let mut teardown = teardown;
    let mut guard = self.teardown.lock().unwrap();
    if self.is_closed() {
      drop(guard);
      teardown.unsubscribe();
    } else {
      guard.push(Box::new(teardown));
    }
  }

  /// Flag identity; two clones of one subscription compare equal.
  pub(crate) fn ptr_eq(&self, other: &Self) -> bool { Arc::ptr_eq(&self.closed, &other.closed) }
}

impl SubscriptionLike for Subscription {
  fn unsubscribe(&mut self) {
    if !self.closed.swap(true, Ordering::AcqRel) {
      let mut teardown = mem::take(&mut *self.teardown.lock().unwrap());
      for item in &mut teardown {
        item.unsubscribe();
      }
    }
  }

  #[inline]
  fn is_closed(&self) -> bool { self.closed.load(Ordering::Acquire) }
}

/// A concurrently-mutable group of subscriptions cancelable together.
///
/// Membership is by flag identity. `unsubscribe` drains a snapshot of the
/// current members; members added while the drain runs may or may not be
/// included (best-effort group cancel, not a transactional one).
#[derive(Clone, Default)]
pub struct CompositeSubscription(Arc<Mutex<SmallVec<[Subscription; 2]>>>);

impl CompositeSubscription {
  pub fn add(&self, subscription: Subscription) {
    let mut members = self.0.lock().unwrap();
    if !members.iter().any(|m| m.ptr_eq(&subscription)) {
      members.push(subscription);
    }
  }

  /// Removes a member; it will no longer be cancelled when the group is.
  pub fn remove(&self, subscription: &Subscription) {
    self.0.lock().unwrap().retain(|m| !m.ptr_eq(subscription));
  }

  pub fn len(&self) -> usize { self.0.lock().unwrap().len() }

  pub fn is_empty(&self) -> bool { self.0.lock().unwrap().is_empty() }
}

impl SubscriptionLike for CompositeSubscription {
  fn unsubscribe(&mut self) {
    let mut members = mem::take(&mut *self.0.lock().unwrap());
    for member in &mut members {
      member.unsubscribe();
    }
  }

  /// Point-in-time snapshot: true iff the group is empty or every current
  /// member is closed. Not sticky; adding an open member makes it false
  /// again.
  fn is_closed(&self) -> bool { self.0.lock().unwrap().iter().all(|m| m.is_closed()) }
}
