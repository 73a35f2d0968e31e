use crate::observable::Observable;
use crate::scheduler::Scheduler;
use crate::subscriber::Subscriber;

impl<Item: Send + 'static> Observable<Item> {
  /// Moves the subscription work (running the producer) onto `scheduler`.
  ///
  /// `subscribe` returns immediately; the returned handle is already live, so
  /// unsubscribing races with the scheduled producer the usual way: events
  /// delivered before the flag flips still arrive.
  pub fn subscribe_on<S>(self, scheduler: S) -> Observable<Item>
  where
    S: Scheduler + Send + Sync + 'static,
  {
    Observable::create(move |subscriber: Subscriber<Item>| {
      let source = self.clone();
      let subscription = subscriber.subscription().clone();
      scheduler.schedule(Box::new(move || {
        source.actual_subscribe(subscriber, subscription);
      }));
    })
  }
}
