//! esl-coach - writing feedback for English learners
//!
//! Command-line front-end: checks a text with local grammar rules and an
//! optional LLM tutor, then prints ranked suggestions and a score.

mod cli;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging; RUST_LOG wins over --log-level. Logs go to stderr
    // so stdout stays clean for reports and piping.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("esl_coach={}", cli.log_level)));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    cli::run(cli)
}
