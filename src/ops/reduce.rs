use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use crate::error::RxError;
use crate::observable::Observable;
use crate::observer::Observer;
use crate::subscriber::Subscriber;

impl<Item: Send + 'static> Observable<Item> {
  /// Folds the stream with `combiner` and emits the single accumulated value
  /// at completion, followed by completion.
  ///
  /// The first value seeds the accumulator, so `combiner` is never called for
  /// a single-element stream. An empty stream completes without emitting. An
  /// upstream error discards the accumulator.
  pub fn reduce<F>(self, combiner: F) -> Observable<Item>
  where
    F: Fn(Item, Item) -> Item + Send + Sync + 'static,
  {
    let combiner = Arc::new(combiner);
    Observable::create(move |subscriber: Subscriber<Item>| {
      let subscription = subscriber.subscription().clone();
      self.clone().actual_subscribe(
        ReduceObserver {
          downstream: subscriber,
          combiner: combiner.clone(),
          acc: None,
          done: false,
        },
        subscription,
      );
    })
  }
}

struct ReduceObserver<Item, F> {
  downstream: Subscriber<Item>,
  combiner: Arc<F>,
  acc: Option<Item>,
  done: bool,
}

impl<Item, F> Observer<Item> for ReduceObserver<Item, F>
where
  F: Fn(Item, Item) -> Item,
{
  fn next(&mut self, value: Item) {
    if self.done {
      return;
    }
    match self.acc.take() {
      None => self.acc = Some(value),
      Some(acc) => match catch_unwind(AssertUnwindSafe(|| (*self.combiner)(acc, value))) {
        Ok(folded) => self.acc = Some(folded),
        Err(payload) => {
          self.done = true;
          self.downstream.error(RxError::from_panic(payload));
        }
      },
    }
  }

  fn error(&mut self, err: RxError) {
    if !self.done {
      self.done = true;
      self.acc = None;
      self.downstream.error(err);
    }
  }

  fn complete(&mut self) {
    if !self.done {
      self.done = true;
      if let Some(acc) = self.acc.take() {
        self.downstream.next(acc);
      }
      self.downstream.complete();
    }
  }

  fn is_closed(&self) -> bool { self.done || self.downstream.is_closed() }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;
  use std::sync::{Arc, Mutex};

  #[test]
  fn folds_the_whole_stream_into_one_value() {
    let seen = Arc::new(Mutex::new(vec![]));
    let sink = seen.clone();
    Observable::from_iter(1..=5)
      .reduce(|acc, v| acc + v)
      .subscribe(move |v| sink.lock().unwrap().push(v));
    assert_eq!(*seen.lock().unwrap(), vec![15]);
  }

  #[test]
  fn empty_stream_completes_without_a_value() {
    let seen = Arc::new(Mutex::new(vec![]));
    let completed = Arc::new(Mutex::new(false));
    let (sink, flag) = (seen.clone(), completed.clone());
    Observable::<i32>::empty()
      .reduce(|acc, v| acc + v)
      .subscribe_all(
        move |v| sink.lock().unwrap().push(v),
        |_| {},
        move || *flag.lock().unwrap() = true,
      );
    assert!(seen.lock().unwrap().is_empty());
    assert!(*completed.lock().unwrap());
  }

  #[test]
  fn single_value_never_calls_the_combiner() {
    let seen = Arc::new(Mutex::new(vec![]));
    let sink = seen.clone();
    Observable::just(42)
      .reduce(|_, _| panic!("combiner must stay untouched"))
      .subscribe(move |v| sink.lock().unwrap().push(v));
    assert_eq!(*seen.lock().unwrap(), vec![42]);
  }

  #[test]
  fn upstream_error_discards_the_accumulator() {
    let seen = Arc::new(Mutex::new(vec![]));
    let errors = Arc::new(Mutex::new(vec![]));
    let (sink, err_sink) = (seen.clone(), errors.clone());
    Observable::create(|mut subscriber: Subscriber<i32>| {
      subscriber.next(1);
      subscriber.next(2);
      subscriber.error(RxError::msg("mid-fold"));
    })
    .reduce(|acc, v| acc + v)
    .subscribe_err(
      move |v| sink.lock().unwrap().push(v),
      move |err| err_sink.lock().unwrap().push(err.to_string()),
    );
    assert!(seen.lock().unwrap().is_empty());
    assert_eq!(*errors.lock().unwrap(), vec!["mid-fold"]);
  }

  #[test]
  fn panicking_combiner_errors_the_stream() {
    let errors = Arc::new(Mutex::new(vec![]));
    let err_sink = errors.clone();
    Observable::from_iter(1..=3)
      .reduce(|_, _| panic!("bad fold"))
      .subscribe_err(|_| {}, move |err| err_sink.lock().unwrap().push(err.to_string()));
    assert_eq!(*errors.lock().unwrap(), vec!["bad fold"]);
  }
}
