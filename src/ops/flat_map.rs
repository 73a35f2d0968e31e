use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use crate::error::RxError;
use crate::observable::Observable;
use crate::observer::Observer;
use crate::ops::barrier::{JoinBarrier, JoinObserver};
use crate::subscriber::Subscriber;

impl<Item: Send + 'static> Observable<Item> {
  /// Maps each value to an inner stream and merges all inner emissions into
  /// the output, interleaved in arrival order.
  ///
  /// The output completes once the outer stream and every spawned inner
  /// stream have completed. The first error from any of them terminates the
  /// output; a panic inside `mapper` counts as that error.
  pub fn flat_map<B, F>(self, mapper: F) -> Observable<B>
  where
    B: Send + 'static,
    F: Fn(Item) -> Observable<B> + Send + Sync + 'static,
  {
    let mapper = Arc::new(mapper);
    Observable::create(move |subscriber: Subscriber<B>| {
      // one participant: the outer stream itself
      let barrier = Arc::new(JoinBarrier::new(1));
      subscriber.subscription().add(barrier.children().clone());
      let subscription = subscriber.subscription().clone();
      self.clone().actual_subscribe(
        FlatMapObserver {
          downstream: subscriber,
          mapper: mapper.clone(),
          barrier,
          done: false,
        },
        subscription,
      );
    })
  }
}

struct FlatMapObserver<B, F> {
  downstream: Subscriber<B>,
  mapper: Arc<F>,
  barrier: Arc<JoinBarrier>,
  done: bool,
}

impl<Item, B, F> Observer<Item> for FlatMapObserver<B, F>
where
  B: Send + 'static,
  F: Fn(Item) -> Observable<B>,
{
  fn next(&mut self, value: Item) {
    if self.done {
      return;
    }
    let inner = match catch_unwind(AssertUnwindSafe(|| (*self.mapper)(value))) {
      Ok(inner) => inner,
      Err(payload) => {
        self.done = true;
        self.barrier.record_error(RxError::from_panic(payload));
        self.barrier.arrive(&mut self.downstream);
        return;
      }
    };
    self.barrier.track();
    let child =
      inner.subscribe_observer(JoinObserver::new(self.downstream.clone(), self.barrier.clone()));
    self.barrier.children().add(child);
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
