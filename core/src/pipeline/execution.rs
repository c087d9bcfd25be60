// conduit/src/pipeline/execution.rs

//! Contains `Pipeline::run()` and `Pipeline::run_async()`, the two ways of executing a
//! pipeline. `run` never waits; `run_async` awaits every pending computation until a
//! plain value comes out.

use crate::core::outcome::Outcome;
use crate::error::ChainResult;
use crate::pipeline::definition::Pipeline;
use tracing::{event, instrument, Level};

impl<T: Send + 'static> Pipeline<T> {
  /// Prepares the pipeline and calls it with a clone of the carry, without waiting.
  ///
  /// Returns `Outcome::Ready` when every step that ran was synchronous, or an unresolved
  /// `Outcome::Pending` as soon as one step handed back async work. A step that fails
  /// synchronously is returned as `Err` right away; a failure inside pending work only
  /// shows up once that work is settled.
  #[instrument(
        name = "Pipeline::run",
        skip_all,
        fields(label = ?self.label, num_steps = self.steps.len()),
        err(Display)
    )]
  pub fn run(&self) -> ChainResult<Outcome<T>>
  where
    T: Clone,
  {
    event!(Level::DEBUG, "Pipeline run starting.");
    let composed = self.prepare()?;
    let outcome = composed.call(self.carry.clone()).into_result()?;

    if outcome.is_pending() {
      event!(Level::DEBUG, "Pipeline returned pending work; not awaiting it.");
    } else {
      event!(Level::DEBUG, "Pipeline run completed.");
    }
    Ok(outcome)
  }

  /// Prepares the pipeline, calls it with a clone of the carry and settles the result.
  ///
  /// Steps still run strictly in order: a step only becomes reachable through the
  /// continuation its predecessor calls. There is no cancellation; the run ends with a
  /// value or with the first failure.
  #[instrument(
        name = "Pipeline::run_async",
        skip_all,
        fields(label = ?self.label, num_steps = self.steps.len()),
        err(Display)
    )]
  pub async fn run_async(&self) -> ChainResult<T>
  where
    T: Clone,
  {
    event!(Level::DEBUG, "Pipeline async run starting.");
    let composed = self.prepare()?;
    let value = composed.call(self.carry.clone()).settle().await?;

    event!(Level::DEBUG, "Pipeline async run completed.");
    Ok(value)
  }
}
