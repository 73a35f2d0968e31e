use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use crate::error::RxError;
use crate::observable::Observable;
use crate::observer::Observer;
use crate::subscriber::Subscriber;

impl<Item: Send + 'static> Observable<Item> {
  /// Transforms each emitted value with `func`.
  ///
  /// A panic inside `func` terminates the stream with an error event.
  ///
  /// ```
  /// use rxflow::prelude::*;
  ///
  /// let (tx, rx) = std::sync::mpsc::channel();
  /// Observable::from_iter(1..=3)
  ///   .map(|x| x * 10)
  ///   .subscribe(move |v| tx.send(v).unwrap());
  /// assert_eq!(rx.iter().collect::<Vec<_>>(), vec![10, 20, 30]);
  /// ```
  pub fn map<B, F>(self, func: F) -> Observable<B>
  where
    B: Send + 'static,
    F: Fn(Item) -> B + Send + Sync + 'static,
  {
    let func = Arc::new(func);
    Observable::create(move |subscriber: Subscriber<B>| {
      let subscription = subscriber.subscription().clone();
      self.clone().actual_subscribe(
        MapObserver { downstream: subscriber, func: func.clone(), done: false },
        subscription,
      );
    })
  }
}

struct MapObserver<Item, F> {
  downstream: Subscriber<Item>,
  func: Arc<F>,
  done: bool,
}

impl<Item, B, F> Observer<Item> for MapObserver<B, F>
where
  F: Fn(Item) -> B,
{
  fn next(&mut self, value: Item) {
    if self.done {
      return;
    }
    match catch_unwind(AssertUnwindSafe(|| (*self.func)(value))) {
      Ok(mapped) => self.downstream.next(mapped),
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
