use std::sync::Arc;

use crate::observable::Observable;
use crate::observer::Observer;
use crate::ops::barrier::{JoinBarrier, JoinObserver};
use crate::subscriber::Subscriber;

/// Interleaves the emissions of every source into one stream.
///
/// All sources are subscribed immediately. Values keep multiplicity (the
/// result is a union, not a set), completion waits for every source, and the
/// first error terminates the merged stream once all sources have reached a
/// terminal state. An empty source list completes immediately.
pub fn merge<Item, I>(sources: I) -> Observable<Item>
where
  Item: Send + 'static,
  I: IntoIterator<Item = Observable<Item>>,
{
  let sources: Arc<Vec<Observable<Item>>> = Arc::new(sources.into_iter().collect());
  Observable::create(move |mut subscriber: Subscriber<Item>| {
    if sources.is_empty() {
      subscriber.complete();
      return;
    }
    let barrier = Arc::new(JoinBarrier::new(sources.len()));
    // disposing the downstream cancels every child
    subscriber.subscription().add(barrier.children().clone());
    for source in sources.iter() {
      let child = source.subscribe_observer(JoinObserver::new(subscriber.clone(), barrier.clone()));
      barrier.children().add(child);
    }
  })
}

impl<Item: Send + 'static> Observable<Item> {
  /// Pairwise [`merge`] sugar: `a.merge(b)` is `merge([a, b])`.
  pub fn merge(self, other: Observable<Item>) -> Observable<Item> { merge([self, other]) }
}

#[cfg(test)]
mod test {
  use super::merge;
  use crate::prelude::*;
  use std::sync::{Arc, Mutex};

  #[test]
  fn union_keeps_multiplicity() {
    let seen = Arc::new(Mutex::new(vec![]));
    let sink = seen.clone();
    Observable::from_iter(vec![1, 2, 2])
      .merge(Observable::from_iter(vec![2, 3]))
      .subscribe(move |v| sink.lock().unwrap().push(v));
    let mut got = seen.lock().unwrap().clone();
    got.sort_unstable();
    assert_eq!(got, vec![1, 2, 2, 2, 3]);
  }

  #[test]
  fn completes_only_after_every_source() {
    let terminals = Arc::new(Mutex::new(vec![]));
    let probe = terminals.clone();
    let open_ended = Observable::create(move |mut subscriber: Subscriber<i32>| {
      subscriber.next(9);
      probe.lock().unwrap().push("first source done emitting");
      subscriber.complete();
    });
    let flag = terminals.clone();
    Observable::from_iter(1..=2)
      .merge(open_ended)
      .subscribe_all(
        |_| {},
        |_| {},
        move || flag.lock().unwrap().push("merged complete"),
      );
    assert_eq!(
      *terminals.lock().unwrap(),
      vec!["first source done emitting", "merged complete"]
    );
  }

  #[test]
  fn first_error_is_the_one_delivered() {
    let errors = Arc::new(Mutex::new(vec![]));
    let err_sink = errors.clone();
    Observable::<i32>::throw(RxError::msg("first"))
      .merge(Observable::throw(RxError::msg("second")))
      .subscribe_err(|_| {}, move |err| err_sink.lock().unwrap().push(err.to_string()));
    assert_eq!(*errors.lock().unwrap(), vec!["first"]);
  }

  #[test]
  fn no_sources_completes_immediately() {
    let completed = Arc::new(Mutex::new(false));
    let flag = completed.clone();
    merge::<i32, _>(vec![]).subscribe_all(
      |_| panic!("no values expected"),
      |_| panic!("no error expected"),
      move || *flag.lock().unwrap() = true,
    );
    assert!(*completed.lock().unwrap());
  }

  #[test]
  fn disposal_reaches_the_children() {
    let child_probe = Subscription::default();
    let probe = child_probe.clone();
    // a source that never terminates; it parks a teardown on its chain
    let open_ended = Observable::create(move |subscriber: Subscriber<i32>| {
      subscriber.subscription().add(probe.clone());
    });

    let mut handle = Observable::from_iter(1..=3).merge(open_ended).subscribe(|_| {});
    assert!(!child_probe.is_closed());
    handle.unsubscribe();
    assert!(child_probe.is_closed());
  }

  #[test]
  fn three_way_merge_sees_everything() {
    let seen = Arc::new(Mutex::new(vec![]));
    let sink = seen.clone();
    merge(vec![
      Observable::from_iter(vec![1]),
      Observable::from_iter(vec![2, 3]),
      Observable::from_iter(vec![4, 5, 6]),
    ])
    .subscribe(move |v| sink.lock().unwrap().push(v));
    let mut got = seen.lock().unwrap().clone();
    got.sort_unstable();
    assert_eq!(got, vec![1, 2, 3, 4, 5, 6]);
  }
}
