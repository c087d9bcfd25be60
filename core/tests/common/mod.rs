// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use conduit::{async_trait, AsyncPipe, Next, Outcome, Pipe, Step};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;

// --- Common Pipes ---

#[derive(Debug, Default)]
pub struct Reverse;

impl Pipe<String> for Reverse {
  fn handle(&self, value: String, next: Next<String>) -> Outcome<String> {
    next.run(value.chars().rev().collect())
  }
}

/// Needs its wrapper string, so it can only be added as an instance.
#[derive(Debug)]
pub struct Wrap {
  pub wrapper: String,
}

impl Wrap {
  pub fn new(wrapper: &str) -> Self {
    Self {
      wrapper: wrapper.to_string(),
    }
  }
}

impl Pipe<String> for Wrap {
  fn handle(&self, value: String, next: Next<String>) -> Outcome<String> {
    next.run(format!("{}{}{}", self.wrapper, value, self.wrapper))
  }
}

#[derive(Debug, Default)]
pub struct HelloProducer;

impl Pipe<String> for HelloProducer {
  fn handle(&self, _value: String, next: Next<String>) -> Outcome<String> {
    next.run("hello".to_string())
  }
}

/// Returns its input without calling the continuation.
#[derive(Debug, Default)]
pub struct Halt;

impl Pipe<String> for Halt {
  fn handle(&self, value: String, _next: Next<String>) -> Outcome<String> {
    Outcome::ready(value)
  }
}

/// Sleeps, then continues the chain from inside its own future.
#[derive(Debug)]
pub struct Wait {
  pub millis: u64,
}

#[async_trait]
impl AsyncPipe<String> for Wait {
  async fn handle(&self, value: String, next: Next<String>) -> Outcome<String> {
    tokio::time::sleep(Duration::from_millis(self.millis)).await;
    next.run(value)
  }
}

pub fn lowercase() -> Step<String> {
  Step::from_fn(|value: String, next: Next<String>| next.run(value.to_lowercase()))
}

// --- Common Error Type for Tests ---
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("Test step failed: {0}")]
  Step(String),

  #[error("Test constructor failed: {0}")]
  Construction(String),
}

pub fn failing_step(message: &'static str) -> Step<String> {
  Step::from_fn(move |_value: String, _next: Next<String>| Outcome::fail(TestError::Step(message.to_string())))
}

// --- Recorder for observing which steps ran, and in what order ---

#[derive(Clone, Debug, Default)]
pub struct Recorder(Arc<Mutex<Vec<String>>>);

impl Recorder {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn record(&self, entry: &str) {
    self.0.lock().push(entry.to_string());
  }

  pub fn entries(&self) -> Vec<String> {
    self.0.lock().clone()
  }

  pub fn is_empty(&self) -> bool {
    self.0.lock().is_empty()
  }
}

/// Records `label`, then continues with the value unchanged.
pub fn recording_step(recorder: &Recorder, label: &'static str) -> Step<String> {
  let recorder = recorder.clone();
  Step::from_fn(move |value: String, next: Next<String>| {
    recorder.record(label);
    next.run(value)
  })
}

/// Records `label` after a short sleep, then continues.
pub fn recording_async_step(recorder: &Recorder, label: &'static str, millis: u64) -> Step<String> {
  let recorder = recorder.clone();
  Step::from_async_fn(move |value: String, next: Next<String>| {
    let recorder = recorder.clone();
    async move {
      tokio::time::sleep(Duration::from_millis(millis)).await;
      recorder.record(label);
      next.run(value)
    }
  })
}

// --- Construction counting for constructor steps ---

pub static CONSTRUCTIONS: Lazy<AtomicUsize> = Lazy::new(|| AtomicUsize::new(0));

pub fn reset_constructions() {
  CONSTRUCTIONS.store(0, Ordering::SeqCst);
}

/// Appends "+" and counts how many times it was instantiated.
#[derive(Debug)]
pub struct Counted;

impl Default for Counted {
  fn default() -> Self {
    CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst);
    Counted
  }
}

impl Pipe<String> for Counted {
  fn handle(&self, value: String, next: Next<String>) -> Outcome<String> {
    next.run(value + "+")
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::TRACE)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
