//! Brewline command-line client

use std::process;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::cli::Cli;

mod cli;

#[tokio::main]
pub async fn main() {
    _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.logging.log_level)
        .unwrap_or_else(|_invalid| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if let Err(error) = cli.run().await {
        #[expect(clippy::print_stderr, reason = "CLI reports failures on stderr")]
        {
            eprintln!("{error}");
        }

        #[expect(clippy::exit, reason = "non-zero exit status for failed commands")]
        process::exit(1);
    }
}
