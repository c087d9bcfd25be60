// conduit_core/examples/pipeline_stop.rs

use conduit::{ChainResult, Next, Outcome, Pipe, Pipeline, Step};
use tracing::{error, info};

#[derive(Default)]
struct HelloProducer;

impl Pipe<String> for HelloProducer {
  fn handle(&self, _content: String, next: Next<String>) -> Outcome<String> {
    next.run("hello".to_string())
  }
}

// Finishes its work but does not call `next`: the chain stops and keeps the value.
#[derive(Default)]
struct Authenticate;

impl Pipe<String> for Authenticate {
  fn handle(&self, content: String, next: Next<String>) -> Outcome<String> {
    if content.starts_with("admin:") {
      next.run(content)
    } else {
      info!("Not authenticated; stopping with a 401.");
      Outcome::ready(format!("401 ({})", content))
    }
  }
}

fn main() -> ChainResult<()> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();
  info!("--- Pipeline Stop Example ---");

  // No initial value: the first step produces it.
  let pipeline = Pipeline::<String>::empty().through(vec![
    Step::of::<HelloProducer>(),
    Step::of::<Authenticate>(),
    Step::from_fn(|content: String, next: Next<String>| {
      // This step should not be reached
      error!("Reached a step after the stop (SHOULD NOT HAPPEN).");
      next.run(content + " [handled]")
    }),
  ]);

  let result = pipeline.run()?.into_ready();
  info!("Result: {:?}", result);
  assert_eq!(result.as_deref(), Some("401 (hello)"));

  // Failing instead of stopping discards the value.
  let failing = Pipeline::<String>::empty().through(vec![
    Step::of::<HelloProducer>(),
    Step::from_fn(|_content: String, _next: Next<String>| Outcome::fail(anyhow::anyhow!("machine jammed"))),
  ]);
  match failing.run() {
    Err(e) => info!("Pipeline failed as expected: {}", e),
    Ok(outcome) => error!("Pipeline was expected to fail, got {:?}", outcome),
  }

  Ok(())
}
