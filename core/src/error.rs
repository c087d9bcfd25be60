// conduit/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChainError {
  /// A constructor step could not produce its pipe with zero arguments.
  #[error("Step {step_index} ('{step_name}') could not be constructed. Source: {source}")]
  StepConstruction {
    step_index: usize,
    step_name: String,
    #[source]
    source: AnyhowError,
  },

  /// A step failed while handling a value. The step's own error is kept as `source`.
  #[error("Step failed during execution. Source: {source}")]
  StepExecution {
    #[source]
    source: AnyhowError,
  },

  #[error("Step {step_index} cannot be resolved into a handler (found {found})")]
  UnresolvableStep { step_index: usize, found: String },
}

impl ChainError {
  /// The error a failing step reported, if this is an execution failure.
  ///
  /// Use `downcast_ref` on the returned value to get back the step's concrete error type.
  pub fn step_failure(&self) -> Option<&AnyhowError> {
    match self {
      ChainError::StepExecution { source } => Some(source),
      _ => None,
    }
  }
}

// Step failures enter the chain as anyhow errors and are always execution failures,
// even when they carry a ChainError from a nested chain. Callers can still reach the
// inner error with `downcast_ref`, and any context attached to it is kept.
impl From<AnyhowError> for ChainError {
  fn from(err: AnyhowError) -> Self {
    ChainError::StepExecution { source: err }
  }
}

pub type ChainResult<T, E = ChainError> = std::result::Result<T, E>;
