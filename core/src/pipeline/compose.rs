// conduit/src/pipeline/compose.rs

//! Folds resolved steps into a single composed callable.
//!
//! The fold runs right to left. It starts from the identity continuation and wraps one
//! layer per step, so the outermost layer belongs to the first step:
//!
//! ```text
//! [a, b, c]  =>  v -> a(v, v -> b(v, v -> c(v, identity)))
//! ```
//!
//! Folding only allocates closures; no step runs until the result is called.

use crate::core::handler::{Link, Next};
use crate::core::outcome::Outcome;
use crate::core::step::ResolvedStep;
use crate::error::ChainResult;
use crate::pipeline::definition::Pipeline;
use std::fmt;
use std::sync::Arc;
use tracing::{event, instrument, span, Instrument, Level};

/// The callable produced by folding a pipeline's steps.
///
/// Every build produces its own `Composed`; two of them never share state beyond the
/// pipe instances both were built from.
pub struct Composed<T> {
  head: Link<T>,
  len: usize,
}

impl<T: Send + 'static> Composed<T> {
  /// The empty chain: hands its input straight back.
  pub fn identity() -> Self {
    Self {
      head: Arc::new(|value: T| Outcome::Ready(value)),
      len: 0,
    }
  }

  /// Builds the nested continuation chain for `steps`, in order.
  pub fn fold<I>(steps: I) -> Self
  where
    I: IntoIterator<Item = ResolvedStep<T>>,
    I::IntoIter: DoubleEndedIterator,
  {
    let mut len = 0;
    let terminal = Self::identity().head;
    let head = steps.into_iter().rev().fold(terminal, |next_link, step| {
      len += 1;
      wrap_layer(step, next_link)
    });
    Self { head, len }
  }

  /// Runs the chain with `value`. Can be called any number of times.
  pub fn call(&self, value: T) -> Outcome<T> {
    (self.head)(value)
  }

  pub fn len(&self) -> usize {
    self.len
  }

  pub fn is_empty(&self) -> bool {
    self.len == 0
  }
}

fn wrap_layer<T: Send + 'static>(step: ResolvedStep<T>, next_link: Link<T>) -> Link<T> {
  let ResolvedStep { index, name, handler } = step;
  Arc::new(move |value: T| {
    let step_span = span!(Level::DEBUG, "pipeline_step", step_index = index, step_name = name);
    let _step_span_guard = step_span.enter();
    event!(Level::TRACE, "Entering step.");
    let outcome = handler(value, Next::new(Arc::clone(&next_link)));
    match outcome {
      // Keep async work attributed to the step that started it.
      Outcome::Pending(fut) => Outcome::Pending(Box::pin(fut.instrument(step_span.clone()))),
      other => other,
    }
  })
}

impl<T> fmt::Debug for Composed<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Composed").field("len", &self.len).finish_non_exhaustive()
  }
}

impl<T: Send + 'static> Pipeline<T> {
  /// Resolves every step, then folds them into a `Composed` callable.
  ///
  /// All steps are resolved before anything runs, so a constructor failure means no
  /// step has executed. Calling this twice yields two independent callables.
  #[instrument(
        name = "Pipeline::prepare",
        skip_all,
        fields(label = ?self.label, num_steps = self.steps.len()),
        err(Display)
    )]
  pub fn prepare(&self) -> ChainResult<Composed<T>> {
    let resolved = self
      .steps
      .iter()
      .enumerate()
      .map(|(step_index, step)| -> ChainResult<ResolvedStep<T>> {
        let resolved = step.resolve(step_index)?;
        event!(Level::DEBUG, step_index, step_name = resolved.name, "Step resolved.");
        Ok(resolved)
      })
      .collect::<ChainResult<Vec<_>>>()?;

    Ok(Composed::fold(resolved))
  }
}
