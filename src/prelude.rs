//! The single import that brings the whole surface into scope.

pub use crate::error::RxError;
pub use crate::observable::Observable;
pub use crate::observer::{BoxedObserver, Observer, ObserverAll};
pub use crate::ops::merge::merge;
pub use crate::scheduler::{
  NewThreadScheduler, Scheduler, SharedScheduler, SingleThreadScheduler, Task,
  ThreadPoolScheduler,
};
pub use crate::subscriber::Subscriber;
pub use crate::subscription::{CompositeSubscription, Subscription, SubscriptionLike};
