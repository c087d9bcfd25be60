// conduit/src/core/outcome.rs

//! Defines `Outcome<T>`, the value every step and continuation hands back, and the
//! loop that settles a pending outcome into a plain value.

use crate::error::{ChainError, ChainResult};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use tracing::{event, Level};

/// A computation that is not finished yet.
///
/// It yields another `Outcome<T>`, which may itself be pending: an async step that calls
/// its continuation from inside its own future produces one level of nesting per step.
pub type PendingOutcome<T> = Pin<Box<dyn Future<Output = Outcome<T>> + Send + 'static>>;

/// Result of running a step (and, through its continuation, the rest of the chain).
#[must_use = "an outcome may be pending or failed; return it or settle it"]
pub enum Outcome<T> {
  /// A plain value. The chain is finished.
  Ready(T),
  /// The chain is suspended until this computation settles.
  Pending(PendingOutcome<T>),
  /// A step failed. No step after it has run.
  Failed(ChainError),
}

impl<T> Outcome<T> {
  pub fn ready(value: T) -> Self {
    Outcome::Ready(value)
  }

  /// Fails the chain with the step's own error, kept unaltered as the source of
  /// `ChainError::StepExecution`.
  pub fn fail<E>(err: E) -> Self
  where
    E: Into<anyhow::Error>,
  {
    Outcome::Failed(ChainError::from(err.into()))
  }

  pub fn from_result<E>(result: Result<T, E>) -> Self
  where
    E: Into<anyhow::Error>,
  {
    match result {
      Ok(value) => Outcome::Ready(value),
      Err(err) => Outcome::fail(err),
    }
  }

  pub fn is_ready(&self) -> bool {
    matches!(self, Outcome::Ready(_))
  }

  pub fn is_pending(&self) -> bool {
    matches!(self, Outcome::Pending(_))
  }

  pub fn is_failed(&self) -> bool {
    matches!(self, Outcome::Failed(_))
  }

  /// Returns the value if the outcome is already settled.
  pub fn into_ready(self) -> Option<T> {
    match self {
      Outcome::Ready(value) => Some(value),
      _ => None,
    }
  }

  /// Moves a failure out into `Err`, leaving ready and pending outcomes untouched.
  pub fn into_result(self) -> ChainResult<Outcome<T>> {
    match self {
      Outcome::Failed(err) => Err(err),
      other => Ok(other),
    }
  }
}

impl<T: Send + 'static> Outcome<T> {
  pub fn pending<F>(fut: F) -> Self
  where
    F: Future<Output = Outcome<T>> + Send + 'static,
  {
    Outcome::Pending(Box::pin(fut))
  }

  /// Applies `f` to the final value, once there is one.
  ///
  /// A step uses this on the outcome of `next.run(..)` to post-process whatever the rest
  /// of the chain produced. Failures pass through and `f` is not called.
  pub fn map<F>(self, f: F) -> Outcome<T>
  where
    F: FnOnce(T) -> T + Send + 'static,
  {
    match self {
      Outcome::Ready(value) => Outcome::Ready(f(value)),
      Outcome::Pending(fut) => Outcome::pending(async move { fut.await.map(f) }),
      Outcome::Failed(err) => Outcome::Failed(err),
    }
  }

  /// Awaits pending computations until a plain value (or a failure) comes out.
  ///
  /// Only one computation is awaited at a time, so steps never run out of order.
  pub async fn settle(self) -> ChainResult<T> {
    let mut outcome = self;
    let mut depth: usize = 0;
    loop {
      match outcome {
        Outcome::Ready(value) => {
          event!(Level::TRACE, depth, "Outcome settled.");
          return Ok(value);
        }
        Outcome::Failed(err) => return Err(err),
        Outcome::Pending(fut) => {
          depth += 1;
          event!(Level::TRACE, depth, "Awaiting pending outcome.");
          outcome = fut.await;
        }
      }
    }
  }
}

impl<T: fmt::Debug> fmt::Debug for Outcome<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Outcome::Ready(value) => f.debug_tuple("Ready").field(value).finish(),
      Outcome::Pending(_) => f.write_str("Pending(..)"),
      Outcome::Failed(err) => f.debug_tuple("Failed").field(err).finish(),
    }
  }
}

impl<T> From<ChainError> for Outcome<T> {
  fn from(err: ChainError) -> Self {
    Outcome::Failed(err)
  }
}
