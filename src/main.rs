//! dynamic-agent CLI binary entry point.

use clap::Parser;
use dynamic_agent::cli::{tools, Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Tools(args) => tools::handle_tools(&args.metadata).await,
        Commands::Call(args) => tools::handle_call(&args.metadata, &args.tool, &args.args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
