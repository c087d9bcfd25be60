// conduit/src/core/step.rs

//! Defines `Step<T>`, the accepted shapes of a pipeline step, and resolves each of
//! them into a canonical `Handler<T>`.

use crate::core::handler::{Handler, Next};
use crate::core::outcome::Outcome;
use crate::core::pipe::{AsyncPipe, AsyncPipeAdapter, Pipe};
use crate::error::{ChainError, ChainResult};
use std::any::{type_name, Any};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tracing::{event, Level};

/// Type alias for a zero-argument pipe constructor.
pub type Constructor<T> = Arc<dyn Fn() -> anyhow::Result<Arc<dyn Pipe<T>>> + Send + Sync>;

const CALLABLE_NAME: &str = "callable";

/// One step of a pipeline, in any of its accepted shapes.
///
/// Steps are resolved into a `Handler<T>` when the pipeline is prepared, never earlier.
pub enum Step<T: 'static> {
  /// A bare function of shape `(value, next) -> outcome`.
  Callable(Handler<T>),
  /// A pipe object. Shared (not copied) by every build of the pipeline.
  Instance(Arc<dyn Pipe<T>>),
  /// A pipe type, instantiated with no arguments once per build.
  Constructor { name: &'static str, construct: Constructor<T> },
  /// A step that crossed a type-erased boundary. It must hold a `Step<T>`, a
  /// `Handler<T>` or an `Arc<dyn Pipe<T>>` to be resolvable.
  Erased {
    type_name: &'static str,
    value: Arc<dyn Any + Send + Sync>,
  },
}

/// A step resolved into its canonical handler, tagged with its position in the chain.
pub struct ResolvedStep<T> {
  pub index: usize,
  pub name: &'static str,
  pub handler: Handler<T>,
}

impl<T: Send + 'static> Step<T> {
  pub fn from_fn<F>(f: F) -> Self
  where
    F: Fn(T, Next<T>) -> Outcome<T> + Send + Sync + 'static,
  {
    Step::Callable(Arc::new(f))
  }

  /// Wraps an async function. The chain sees an `Outcome::Pending` per invocation.
  pub fn from_async_fn<F, Fut>(f: F) -> Self
  where
    F: Fn(T, Next<T>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Outcome<T>> + Send + 'static,
  {
    Step::Callable(Arc::new(move |value, next| Outcome::pending(f(value, next))))
  }

  pub fn instance<P>(pipe: P) -> Self
  where
    P: Pipe<T> + 'static,
  {
    Step::Instance(Arc::new(pipe))
  }

  pub fn from_async<P>(pipe: P) -> Self
  where
    P: AsyncPipe<T> + 'static,
  {
    Step::Instance(Arc::new(AsyncPipeAdapter(Arc::new(pipe))))
  }

  /// A pipe type that can be built from nothing.
  pub fn of<P>() -> Self
  where
    P: Pipe<T> + Default + 'static,
  {
    Step::Constructor {
      name: type_name::<P>(),
      construct: Arc::new(|| Ok::<_, anyhow::Error>(Arc::new(P::default()) as Arc<dyn Pipe<T>>)),
    }
  }

  /// A pipe type whose zero-argument construction can fail, e.g. because it needs
  /// configuration nobody supplied. Failure surfaces as `ChainError::StepConstruction`.
  pub fn constructor<P, F>(construct: F) -> Self
  where
    P: Pipe<T> + 'static,
    F: Fn() -> anyhow::Result<P> + Send + Sync + 'static,
  {
    Step::Constructor {
      name: type_name::<P>(),
      construct: Arc::new(move || construct().map(|pipe| Arc::new(pipe) as Arc<dyn Pipe<T>>)),
    }
  }

  pub fn erased<S>(value: S) -> Self
  where
    S: Any + Send + Sync,
  {
    Step::Erased {
      type_name: type_name::<S>(),
      value: Arc::new(value),
    }
  }

  pub fn name(&self) -> &'static str {
    match self {
      Step::Callable(_) => CALLABLE_NAME,
      Step::Instance(pipe) => pipe.name(),
      Step::Constructor { name, .. } => *name,
      Step::Erased { type_name, .. } => *type_name,
    }
  }

  /// Resolves this step into its canonical handler.
  ///
  /// The only side effect is the single instantiation of a `Constructor` step.
  pub fn resolve(&self, step_index: usize) -> ChainResult<ResolvedStep<T>> {
    match self {
      Step::Callable(handler) => Ok(ResolvedStep {
        index: step_index,
        name: CALLABLE_NAME,
        handler: Arc::clone(handler),
      }),
      Step::Instance(pipe) => Ok(bind_pipe(step_index, Arc::clone(pipe))),
      Step::Constructor { name, construct } => {
        let pipe = construct().map_err(|source| {
          event!(Level::ERROR, step_index, step_name = %name, error = %source, "Step construction failed.");
          ChainError::StepConstruction {
            step_index,
            step_name: (*name).to_string(),
            source,
          }
        })?;
        event!(Level::TRACE, step_index, step_name = %name, "Step constructed.");
        Ok(bind_pipe(step_index, pipe))
      }
      Step::Erased { type_name, value } => {
        let any: &(dyn Any + Send + Sync) = value.as_ref();
        if let Some(step) = any.downcast_ref::<Step<T>>() {
          return step.resolve(step_index);
        }
        if let Some(handler) = any.downcast_ref::<Handler<T>>() {
          return Step::Callable(Arc::clone(handler)).resolve(step_index);
        }
        if let Some(pipe) = any.downcast_ref::<Arc<dyn Pipe<T>>>() {
          return Ok(bind_pipe(step_index, Arc::clone(pipe)));
        }
        event!(Level::ERROR, step_index, found = %type_name, "Erased step holds no handler shape.");
        Err(ChainError::UnresolvableStep {
          step_index,
          found: (*type_name).to_string(),
        })
      }
    }
  }
}

fn bind_pipe<T: Send + 'static>(step_index: usize, pipe: Arc<dyn Pipe<T>>) -> ResolvedStep<T> {
  let name = pipe.name();
  ResolvedStep {
    index: step_index,
    name,
    handler: Arc::new(move |value: T, next: Next<T>| pipe.handle(value, next)),
  }
}

impl<T: 'static> Clone for Step<T> {
  fn clone(&self) -> Self {
    match self {
      Step::Callable(handler) => Step::Callable(Arc::clone(handler)),
      Step::Instance(pipe) => Step::Instance(Arc::clone(pipe)),
      Step::Constructor { name, construct } => Step::Constructor {
        name: *name,
        construct: Arc::clone(construct),
      },
      Step::Erased { type_name, value } => Step::Erased {
        type_name: *type_name,
        value: Arc::clone(value),
      },
    }
  }
}

// Handlers and pipes don't implement Debug, so only the shape and name are shown.
impl<T: Send + 'static> fmt::Debug for Step<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let shape = match self {
      Step::Callable(_) => "Callable",
      Step::Instance(_) => "Instance",
      Step::Constructor { .. } => "Constructor",
      Step::Erased { .. } => "Erased",
    };
    f.debug_struct("Step")
      .field("shape", &shape)
      .field("name", &self.name())
      .finish()
  }
}

impl<T> fmt::Debug for ResolvedStep<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ResolvedStep")
      .field("index", &self.index)
      .field("name", &self.name)
      .finish_non_exhaustive()
  }
}
