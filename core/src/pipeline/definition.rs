// conduit/src/pipeline/definition.rs

//! Contains the `Pipeline<T>` struct definition and the methods that assemble it.
//! Nothing here runs a step: a definition can be built in parts, passed around and
//! dropped without side effects.

use crate::core::step::Step;
use std::fmt;

/// An ordered list of steps plus the value ("carry") threaded through them.
///
/// Steps are append-only and run in insertion order. Appending while another thread
/// prepares the same definition is not synchronized and is the caller's problem; `&mut`
/// access already rules it out in safe code.
pub struct Pipeline<T: 'static> {
  pub(crate) steps: Vec<Step<T>>,
  pub(crate) carry: T,
  pub(crate) label: Option<String>,
}

impl<T: Send + 'static> Pipeline<T> {
  /// Creates an empty pipeline that will start from `carry`.
  pub fn new(carry: T) -> Self {
    Self {
      steps: Vec::new(),
      carry,
      label: None,
    }
  }

  /// Creates an empty pipeline with no input yet. The carry is `T::default()`,
  /// typically ignored by a first step that produces the real value.
  pub fn empty() -> Self
  where
    T: Default,
  {
    Self::new(T::default())
  }

  /// Names this pipeline in tracing output.
  pub fn label<S: Into<String>>(mut self, label: S) -> Self {
    self.label = Some(label.into());
    self
  }

  /// Appends `steps` in order and hands the pipeline back for chaining.
  pub fn through<I>(mut self, steps: I) -> Self
  where
    I: IntoIterator<Item = Step<T>>,
  {
    self.steps.extend(steps);
    self
  }

  /// Appends one step in place.
  pub fn push(&mut self, step: Step<T>) -> &mut Self {
    self.steps.push(step);
    self
  }

  pub fn len(&self) -> usize {
    self.steps.len()
  }

  pub fn is_empty(&self) -> bool {
    self.steps.is_empty()
  }

  pub fn carry(&self) -> &T {
    &self.carry
  }

  pub fn step_names(&self) -> Vec<&'static str> {
    self.steps.iter().map(Step::name).collect()
  }
}

/// Shorthand for `Pipeline::new(carry)`.
pub fn pipe<T: Send + 'static>(carry: T) -> Pipeline<T> {
  Pipeline::new(carry)
}

impl<T: Clone + 'static> Clone for Pipeline<T> {
  fn clone(&self) -> Self {
    Self {
      steps: self.steps.clone(),
      carry: self.carry.clone(),
      label: self.label.clone(),
    }
  }
}

impl<T: fmt::Debug + Send + 'static> fmt::Debug for Pipeline<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Pipeline")
      .field("label", &self.label)
      .field("carry", &self.carry)
      .field("steps", &self.steps)
      .finish()
  }
}
