mod cli;
mod config;
mod render;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    //  Logging (stderr; stdout carries the report)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,file_inspector=info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if args.global.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    match args.command {
        cli::Commands::Inspect(a) => cli::inspect::execute(args.global, a).await,
        cli::Commands::Formats(a) => cli::formats::execute(a).await,
        cli::Commands::Config(c) => cli::config_cmd::execute(args.global, c).await,
    }
}
