//! Cart CLI entry point.
//!
//! # Usage
//!
//! ```bash
//! cart-cli add 1
//! cart-cli set 1 3
//! cart-cli remove 1
//! cart-cli show
//! ```

use clap::Parser;
use cli::{CartCommand, CliError, Config};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "cart-cli")]
#[command(author, version, about = "Shopping cart backed by a product fixture")]
struct Cli {
    #[command(subcommand)]
    command: CartCommand,
}

#[tokio::main]
async fn main() {
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli, &config).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &Config) -> Result<(), CliError> {
    let store = cli::open_store(config).await?;
    let cart = cli::run(&store, cli.command).await;
    println!("{}", serde_json::to_string_pretty(&*cart)?);
    Ok(())
}
