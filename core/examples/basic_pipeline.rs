// conduit_core/examples/basic_pipeline.rs

use conduit::{pipe, ChainResult, Next, Outcome, Pipe, Step};
use tracing::info;

// 1. A pipe type that can be built with no arguments
#[derive(Default)]
struct Reverse;

impl Pipe<String> for Reverse {
  fn handle(&self, content: String, next: Next<String>) -> Outcome<String> {
    next.run(content.chars().rev().collect())
  }
}

// 2. A pipe that needs configuration, so it is added as a pre-built instance
struct Wrap {
  wrapper: String,
}

impl Pipe<String> for Wrap {
  fn handle(&self, content: String, next: Next<String>) -> Outcome<String> {
    next.run(format!("{}{}{}", self.wrapper, content, self.wrapper))
  }
}

fn main() -> ChainResult<()> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Basic Pipeline Example ---");

  // 3. Read: "pipe 'NIAM' through reverse, lowercase, wrap"
  let pipeline = pipe("NIAM".to_string()).through(vec![
    // type step
    Step::of::<Reverse>(),
    // function step
    Step::from_fn(|content: String, next: Next<String>| next.run(content.to_lowercase())),
    // object step
    Step::instance(Wrap {
      wrapper: "__".to_string(),
    }),
  ]);

  // 4. Every step is synchronous, so `run` hands back a ready value.
  let result = pipeline.run()?;
  info!("Result: {:?}", result);
  assert_eq!(result.into_ready().as_deref(), Some("__main__"));

  Ok(())
}
