//! FitPro CLI binary entry point.

use clap::Parser;
use fitpro::cli::{chat, Cli, Commands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Chat => chat::handle_chat(&cli.session).await,
        Commands::Ask(args) => chat::handle_ask(&cli.session, &args.text()).await,
        Commands::Probe => chat::handle_probe(&cli.session).await,
        Commands::Ping => chat::handle_ping(&cli.session).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
