// conduit_core/examples/async_pipeline.rs

use conduit::{async_trait, pipe, AsyncPipe, ChainResult, Next, Outcome, Pipe, Step};
use std::time::Duration;
use tracing::info;

#[derive(Default)]
struct Reverse;

impl Pipe<String> for Reverse {
  fn handle(&self, content: String, next: Next<String>) -> Outcome<String> {
    next.run(content.chars().rev().collect())
  }
}

struct Wait500;

#[async_trait]
impl AsyncPipe<String> for Wait500 {
  async fn handle(&self, content: String, next: Next<String>) -> Outcome<String> {
    tokio::time::sleep(Duration::from_millis(500)).await;
    next.run(content)
  }
}

#[tokio::main]
async fn main() -> ChainResult<()> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();
  info!("--- Async Pipeline Example ---");

  let pipeline = pipe("cnysa".to_string()).through(vec![
    Step::from_async(Wait500),
    Step::from_fn(|content: String, next: Next<String>| next.run(format!("__{}__", content))),
    Step::from_async(Wait500),
    Step::of::<Reverse>(),
  ]);

  // `run` would hand back the first pending computation unresolved;
  // `run_async` awaits until a plain value comes out.
  let result = pipeline.run_async().await?;
  info!("Result: {}", result);
  assert_eq!(result, "__async__");

  Ok(())
}
