use std::sync::Arc;

use crate::error::RxError;
use crate::observable::Observable;
use crate::observer::Observer;
use crate::scheduler::Scheduler;
use crate::subscriber::Subscriber;

impl<Item: Send + 'static> Observable<Item> {
  /// Moves downstream event delivery onto `scheduler`; the producer keeps
  /// running wherever the subscription happens.
  ///
  /// Every event becomes one scheduled task, so event order downstream is
  /// only preserved on a scheduler that runs tasks in submission order (the
  /// [`SingleThreadScheduler`]).
  ///
  /// [`SingleThreadScheduler`]: crate::scheduler::SingleThreadScheduler
  pub fn observe_on<S>(self, scheduler: S) -> Observable<Item>
  where
    S: Scheduler + Send + Sync + 'static,
  {
    let scheduler: Arc<dyn Scheduler + Send + Sync> = Arc::new(scheduler);
    Observable::create(move |subscriber: Subscriber<Item>| {
      let subscription = subscriber.subscription().clone();
      self.clone().actual_subscribe(
        ObserveOnObserver { downstream: subscriber, scheduler: scheduler.clone() },
        subscription,
      );
    })
  }
}

struct ObserveOnObserver<Item> {
  downstream: Subscriber<Item>,
  scheduler: Arc<dyn Scheduler + Send + Sync>,
}

impl<Item: Send + 'static> Observer<Item> for ObserveOnObserver<Item> {
  fn next(&mut self, value: Item) {
    let mut downstream = self.downstream.clone();
    self.scheduler.schedule(Box::new(move || downstream.next(value)));
  }

  fn error(&mut self, err: RxError) {
    let mut downstream = self.downstream.clone();
    self.scheduler.schedule(Box::new(move || downstream.error(err)));
  }

  fn complete(&mut self) {
    let mut downstream = self.downstream.clone();
    self.scheduler.schedule(Box::new(move || downstream.complete()));
  }

  fn is_closed(&self) -> bool { self.downstream.is_closed() }
}
