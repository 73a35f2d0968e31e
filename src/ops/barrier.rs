//! Terminal-event accounting shared by `merge` and `flat_map`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::RxError;
use crate::observer::Observer;
use crate::subscriber::Subscriber;
use crate::subscription::{CompositeSubscription, SubscriptionLike};

/// Counter that starts at the number of known participants and acts when it
/// reaches zero.
///
/// Each participant's terminal event calls [`arrive`](JoinBarrier::arrive);
/// the one bringing the count to zero delivers the group's terminal event
/// downstream (the first recorded error if any source failed, completion
/// otherwise) and drains the child composite to release the bookkeeping.
/// Errors recorded after the first are counted but dropped, not combined.
/// [`track`](JoinBarrier::track) registers a participant discovered after
/// construction (a `flat_map` inner stream).
pub(crate) struct JoinBarrier {
  active: AtomicUsize,
  first_error: Mutex<Option<RxError>>,
  children: CompositeSubscription,
}

impl JoinBarrier {
  pub(crate) fn new(participants: usize) -> Self {
    Self {
      active: AtomicUsize::new(participants),
      first_error: Mutex::new(None),
      children: CompositeSubscription::default(),
    }
  }

  /// The group of child subscriptions cancelled when the downstream is
  /// disposed or the group terminates.
  pub(crate) fn children(&self) -> &CompositeSubscription { &self.children }

  /// Registers one more participant.
  pub(crate) fn track(&self) { self.active.fetch_add(1, Ordering::AcqRel); }

  pub(crate) fn record_error(&self, err: RxError) {
    let mut slot = self.first_error.lock().unwrap();
    if slot.is_none() {
      *slot = Some(err);
    }
  }

  /// One participant reached a terminal state.
  pub(crate) fn arrive<Item>(&self, downstream: &mut Subscriber<Item>) {
    if self.active.fetch_sub(1, Ordering::AcqRel) == 1 {
      let first_error = self.first_error.lock().unwrap().take();
      match first_error {
        Some(err) => downstream.error(err),
        None => downstream.complete(),
      }
      self.children.clone().unsubscribe();
    }
  }
}

/// Forwards one source's events into the shared downstream and reports its
/// terminal event to the barrier.
pub(crate) struct JoinObserver<Item> {
  downstream: Subscriber<Item>,
  barrier: Arc<JoinBarrier>,
  done: bool,
}

impl<Item> JoinObserver<Item> {
  pub(crate) fn new(downstream: Subscriber<Item>, barrier: Arc<JoinBarrier>) -> Self {
    Self { downstream, barrier, done: false }
  }
}

impl<Item> Observer<Item> for JoinObserver<Item> {
  fn next(&mut self, value: Item) {
    if !self.done {
      self.downstream.next(value);
    }
  }

  fn error(&mut self, err: RxError) {
    if !self.done {
      self.done = true;
      self.barrier.record_error(err);
      self.barrier.arrive(&mut self.downstream);
    }
  }

  fn complete(&mut self) {
    if !self.done {
      self.done = true;
      self.barrier.arrive(&mut self.downstream);
    }
  }

  fn is_closed(&self) -> bool { self.done || self.downstream.is_closed() }
}
