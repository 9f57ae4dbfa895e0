//! Shapedrop headless simulator
//!
//! Replays a session script against a scene and prints the final render
//! snapshot as JSON. Without an argument the built-in demo session runs.

use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::SimError;
use crate::script::Script;

mod error;
mod script;

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), SimError> {
    let script = match std::env::args().nth(1) {
        Some(path) => {
            tracing::info!("Loading script {path}");
            let json = std::fs::read_to_string(&path)
                .map_err(|source| SimError::Read { path, source })?;
            Script::from_json(&json)?
        }
        None => {
            tracing::info!("No script given, running the built-in demo");
            Script::demo()?
        }
    };

    let snapshot = script.run()?;
    let json = snapshot.to_json().map_err(SimError::Output)?;
    println!("{json}");
    Ok(())
}
