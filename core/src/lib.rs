// src/lib.rs

//! Conduit: a continuation-passing pipeline engine for Rust.
//!
//! A pipeline threads one value through an ordered list of steps. Each step receives the
//! value and a `Next` continuation for the rest of the chain, and decides:
//!  - to continue, by calling `next.run(value)`;
//!  - to stop but keep the value, by returning `Outcome::Ready` without calling `next`;
//!  - to stop and discard the value, by returning `Outcome::Failed`;
//!  - to do async work first, by returning `Outcome::Pending`.
//!
//! Steps can be plain functions, `Pipe` objects, `Pipe` types built with no arguments,
//! or `AsyncPipe` objects, all mixed in the same chain.

pub mod core;
pub mod error;
pub mod pipeline;

// --- Re-exports for the Public API ---

pub use crate::core::handler::{Handler, Next};
pub use crate::core::outcome::{Outcome, PendingOutcome};
pub use crate::core::pipe::{AsyncPipe, Pipe};
pub use crate::core::step::{ResolvedStep, Step};

pub use crate::pipeline::compose::Composed;
pub use crate::pipeline::definition::{pipe, Pipeline};

pub use crate::error::{ChainError, ChainResult};

// Implementors of `AsyncPipe` need the attribute; re-exported so they don't have to
// depend on async-trait themselves.
pub use async_trait::async_trait;

/*
    Core Workflow:
    1. Pick the value type `T` your steps transform.
    2. Write steps: closures via `Step::from_fn`, `Pipe` impls via `Step::instance` or
       `Step::of::<P>()`, async ones via `Step::from_async` / `Step::from_async_fn`.
    3. `pipe(carry).through(vec![...])` (or `Pipeline::empty()` when the first step
       produces the value).
    4. `pipeline.run()` when every step is synchronous, `pipeline.run_async().await` otherwise.
*/
