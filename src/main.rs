//! fig-generators command-line driver
//!
//! Runs the generators declared in `~/.fig-generators/config.toml` (or the
//! file given with `--config`) against tokens from the command line.
//!
//! # Usage
//!
//! ```bash
//! fig-generators complete env HOME=/u
//! fig-generators query env HOME=/u
//! fig-generators trigger env HOME= HOME
//! ```

use fig_generators::Result;
use fig_generators::cli::CliInterface;

/// Application entry point
#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic
///
/// 1. Parse command-line arguments
/// 2. Load configuration
/// 3. Initialize logging
/// 4. Run the subcommand and print its output
async fn run() -> Result<()> {
    let cli = CliInterface::new()?;

    initialize_logging(&cli);

    let output = cli.execute().await?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

/// Initialize logging system based on verbosity level
///
/// Command-line flags have already been folded into the configured level.
/// Logs go to stderr so that stdout carries only command output.
fn initialize_logging(cli: &CliInterface) {
    let level = cli.config().logging.level.to_tracing_level();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr);

    if cli.config().logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
