// conduit/src/core/handler.rs

//! Defines the `Handler<T>` type (the canonical shape every step is resolved into)
//! and `Next<T>`, the continuation a handler receives.

use crate::core::outcome::Outcome;
use std::fmt;
use std::sync::Arc;

/// Type alias for a canonical step.
///
/// A handler receives the current value and the continuation for the rest of the chain.
/// It either:
/// 1. Calls `next.run(value)` and returns (or maps) what the rest of the chain produced.
/// 2. Returns `Outcome::Ready` without calling `next`, stopping the chain but keeping the value.
/// 3. Returns `Outcome::Failed`, stopping the chain and discarding the value.
/// 4. Returns `Outcome::Pending` wrapping async work that does one of the above when it finishes.
pub type Handler<T> = Arc<dyn Fn(T, Next<T>) -> Outcome<T> + Send + Sync>;

/// One layer of a composed chain: "run everything from this point on".
pub(crate) type Link<T> = Arc<dyn Fn(T) -> Outcome<T> + Send + Sync>;

/// The continuation handed to a step.
///
/// `run` consumes it and the type is not `Clone`, so a step can continue the chain at most
/// once. Dropping it without calling `run` stops the chain after the current step.
pub struct Next<T> {
  link: Link<T>,
}

impl<T> Next<T> {
  pub(crate) fn new(link: Link<T>) -> Self {
    Self { link }
  }

  /// Runs the remainder of the chain with `value`.
  pub fn run(self, value: T) -> Outcome<T> {
    (self.link)(value)
  }
}

impl<T> fmt::Debug for Next<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Next").finish_non_exhaustive()
  }
}
