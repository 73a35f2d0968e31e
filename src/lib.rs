//! rxflow is a push-based reactive stream core.
//!
//! An [`Observable`] is a lazy, re-subscribable description of a producer;
//! subscribing runs the producer and pushes zero or more values into an
//! [`Observer`], followed by at most one terminal event (an error or a
//! completion). Operators compose observables into new observables without
//! running anything; [`Scheduler`]s decide which thread the producer and the
//! delivery run on.
//!
//! ```
//! use rxflow::prelude::*;
//!
//! let (tx, rx) = std::sync::mpsc::channel();
//! Observable::from_iter(1..=5)
//!   .map(|x| x * 10)
//!   .filter(|x| *x >= 30)
//!   .subscribe(move |v| tx.send(v).unwrap());
//! assert_eq!(rx.iter().collect::<Vec<_>>(), vec![30, 40, 50]);
//! ```
//!
//! [`Observer`]: crate::observer::Observer
//! [`Scheduler`]: crate::scheduler::Scheduler

pub mod error;
pub mod observable;
pub mod observer;
mod ops;
pub mod prelude;
mod rc;
pub mod scheduler;
pub mod subscriber;
pub mod subscription;

pub use prelude::*;
