pub mod handler;
pub mod outcome;
pub mod pipe;
pub mod step;

// Re-export key types for easier access from other conduit modules (and lib.rs)
pub use handler::{Handler, Next};
pub use outcome::{Outcome, PendingOutcome};
pub use pipe::{AsyncPipe, Pipe};
pub use step::{Constructor, ResolvedStep, Step};
