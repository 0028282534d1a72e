//! `tally` binary: runs the reference configuration and prints the final counter.

use std::process::ExitCode;
#[cfg(feature = "logging")]
use std::sync::Arc;

use tally::{Config, Orchestrator, RuntimeError, Subscribe, Tally};

fn main() -> ExitCode {
    match run(Config::default()) {
        Ok(tally) => {
            println!("The magic number is: {}", tally.value);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("[{}] {}", e.as_label(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cfg: Config) -> Result<Tally, RuntimeError> {
    let runtime = cfg.build_runtime()?;
    runtime.block_on(async move {
        Orchestrator::builder(cfg)
            .with_subscribers(subscribers())
            .build()
            .run()
            .await
    })
}

#[cfg(feature = "logging")]
fn subscribers() -> Vec<Arc<dyn Subscribe>> {
    vec![Arc::new(tally::LogWriter::new())]
}

#[cfg(not(feature = "logging"))]
fn subscribers() -> Vec<std::sync::Arc<dyn Subscribe>> {
    Vec::new()
}
