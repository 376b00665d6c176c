//! Bobby console chat entry point.
//!
//! Binary name: `bobby`
//!
//! Parses CLI arguments, installs the tracing subscriber, then runs the
//! interactive chat loop until the user exits.

mod cli;

use clap::Parser;

use bobby_observe::tracing_setup::{filter_directive, init_tracing, shutdown_tracing};

use cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(filter_directive(cli.verbose, cli.quiet), cli.otel)
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    let result = cli::chat::loop_runner::run_chat_loop(&cli).await;

    shutdown_tracing();
    result
}
