// conduit/src/core/pipe.rs

//! Defines the `Pipe<T>` and `AsyncPipe<T>` traits for step objects, plus the adapter
//! that lets an `AsyncPipe` sit in a chain next to synchronous steps.

use crate::core::handler::Next;
use crate::core::outcome::Outcome;
use async_trait::async_trait;
use std::sync::Arc;

/// A step object with a handling method.
///
/// Pipes are immutable once placed in a chain (`&self`). A pipe that needs
/// configuration is built by the caller and added with `Step::instance`; a pipe that
/// can be built from nothing can be added as a type with `Step::of`.
pub trait Pipe<T>: Send + Sync {
  fn handle(&self, value: T, next: Next<T>) -> Outcome<T>;

  /// Name used in tracing spans and error messages.
  fn name(&self) -> &'static str {
    std::any::type_name::<Self>()
  }
}

/// A step object whose handling method is asynchronous.
///
/// Add it to a chain with `Step::from_async`. The chain sees an `Outcome::Pending`
/// which, once awaited, yields whatever `handle` returned.
#[async_trait]
pub trait AsyncPipe<T>: Send + Sync
where
  T: Send + 'static,
{
  async fn handle(&self, value: T, next: Next<T>) -> Outcome<T>;

  fn name(&self) -> &'static str {
    std::any::type_name::<Self>()
  }
}

pub(crate) struct AsyncPipeAdapter<P>(pub(crate) Arc<P>);

impl<T, P> Pipe<T> for AsyncPipeAdapter<P>
where
  T: Send + 'static,
  P: AsyncPipe<T> + 'static,
{
  fn handle(&self, value: T, next: Next<T>) -> Outcome<T> {
    let pipe = Arc::clone(&self.0);
    Outcome::pending(async move { <P as AsyncPipe<T>>::handle(&pipe, value, next).await })
  }

  fn name(&self) -> &'static str {
    <P as AsyncPipe<T>>::name(&self.0)
  }
}
