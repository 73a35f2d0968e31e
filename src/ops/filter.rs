use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use crate::error::RxError;
use crate::observable::Observable;
use crate::observer::Observer;
use crate::subscriber::Subscriber;

impl<Item: Send + 'static> Observable<Item> {
  /// Passes through only the values for which `predicate` returns true.
  ///
  /// A panic inside `predicate` terminates the stream with an error event.
  pub fn filter<F>(self, predicate: F) -> Observable<Item>
  where
    F: Fn(&Item) -> bool + Send + Sync + 'static,
  {
    let predicate = Arc::new(predicate);
    Observable::create(move |subscriber: Subscriber<Item>| {
      let subscription = subscriber.subscription().clone();
      self.clone().actual_subscribe(
        FilterObserver { downstream: subscriber, predicate: predicate.clone(), done: false },
        subscription,
      );
    })
  }
}

struct FilterObserver<Item, F> {
  downstream: Subscriber<Item>,
  predicate: Arc<F>,
  done: bool,
}

impl<Item, F> Observer<Item> for FilterObserver<Item, F>
where
  F: Fn(&Item) -> bool,
{
  fn next(&mut self, value: Item) {
    if self.done {
      return;
    }
    match catch_unwind(AssertUnwindSafe(|| (*self.predicate)(&value))) {
      Ok(true) => self.downstream.next(value),
      Ok(false) => {}
      Err(payload) => {
        self.done = true;
        self.downstream.error(RxError::from_panic(payload));
      }
    }
  }

  fn error(&mut self, err: RxError) {
    if !self.done {
      self.done = true;
      self.downstream.error(err);
    }
  }

  fn complete(&mut self) {
    if !self.done {
      self.done = true;
      self.downstream.complete();
    }
  }

  fn is_closed(&self) -> bool { self.done || self.downstream.is_closed() }
}
