use crate::error::RxError;
use crate::observable::Observable;
use crate::observer::Observer;
use crate::subscriber::Subscriber;

impl<Item: Send + 'static> Observable<Item> {
  /// Emits everything from `self`, then everything from `other`.
  ///
  /// `other` is not subscribed until `self` completes; if `self` errors,
  /// `other` is never subscribed and the error goes straight downstream.
  pub fn concat(self, other: Observable<Item>) -> Observable<Item> {
    Observable::create(move |subscriber: Subscriber<Item>| {
      let subscription = subscriber.subscription().clone();
      self.clone().actual_subscribe(
        ConcatObserver { downstream: Some(subscriber), second: other.clone() },
        subscription,
      );
    })
  }
}

struct ConcatObserver<Item> {
  downstream: Option<Subscriber<Item>>,
  second: Observable<Item>,
}

impl<Item: Send + 'static> Observer<Item> for ConcatObserver<Item> {
  fn next(&mut self, value: Item) {
    if let Some(downstream) = self.downstream.as_mut() {
      downstream.next(value);
    }
  }

  fn error(&mut self, err: RxError) {
    if let Some(mut downstream) = self.downstream.take() {
      downstream.error(err);
    }
  }

  fn complete(&mut self) {
    // hand the downstream over to the second stream; same gate, so a
    // disposal during the first stream still silences the second
    if let Some(downstream) = self.downstream.take() {
      let subscription = downstream.subscription().clone();
      self.second.actual_subscribe(downstream, subscription);
    }
  }

  fn is_closed(&self) -> bool {
    self.downstream.as_ref().map_or(true, Observer::is_closed)
  }
}
