//! The value type carried on a stream's error channel.

use std::any::Any;
use std::fmt::{self, Debug, Display};
use std::sync::Arc;

/// An error delivered through [`Observer::error`](crate::observer::Observer::error).
///
/// `RxError` is cheap to clone: multi-source operators (`merge`, `flat_map`)
/// record the first error while the remaining sources run to termination, and
/// only then deliver it downstream.
#[derive(Clone)]
pub struct RxError(Arc<anyhow::Error>);

impl RxError {
  /// Wraps any std error type.
  pub fn new<E>(err: E) -> Self
  where
    E: Into<anyhow::Error>,
  {
    Self(Arc::new(err.into()))
  }

  /// Creates an error from a plain message.
  pub fn msg<M>(msg: M) -> Self
  where
    M: Display + Debug + Send + Sync + 'static,
  {
    Self(Arc::new(anyhow::Error::msg(msg)))
  }

  /// Attempts to downcast to a concrete error type wrapped by [`RxError::new`].
  pub fn downcast_ref<E>(&self) -> Option<&E>
  where
    E: Display + Debug + Send + Sync + 'static,
  {
    self.0.downcast_ref::<E>()
  }

  /// Converts a caught panic payload into a stream error. Producers and
  /// operator callbacks that panic terminate the stream with this error
  /// instead of unwinding through the subscribing call stack.
  pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
    let msg = if let Some(s) = payload.downcast_ref::<&'static str>() {
      (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
      s.clone()
    } else {
      "stream callback panicked".to_string()
    };
    Self::msg(msg)
  }
}

impl Display for RxError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { Display::fmt(&self.0, f) }
}

impl Debug for RxError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { Debug::fmt(&self.0, f) }
}

impl std::error::Error for RxError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> { self.0.source() }
}

impl From<anyhow::Error> for RxError {
  fn from(err: anyhow::Error) -> Self { Self(Arc::new(err)) }
}

#[cfg(test)]
mod test {
  use super::*;
  use std::io;

  #[test]
  fn wraps_std_errors() {
    let err = RxError::new(io::Error::new(io::ErrorKind::Other, "boom"));
    assert!(err.downcast_ref::<io::Error>().is_some());
    assert_eq!(err.to_string(), "boom");
  }

  #[test]
  fn panic_payload_message_survives() {
    let err = RxError::from_panic(Box::new("mapper exploded"));
    assert_eq!(err.to_string(), "mapper exploded");
    let err = RxError::from_panic(Box::new(String::from("owned message")));
    assert_eq!(err.to_string(), "owned message");
  }

  #[test]
  fn clones_share_the_same_error() {
    let err = RxError::msg("once");
    let cloned = err.clone();
    assert_eq!(err.to_string(), cloned.to_string());
  }
}
