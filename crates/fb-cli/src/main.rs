use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod context;
mod output;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("fb error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let flags = cli.global_flags();

    let config = bootstrap::load_config(&flags)?;
    init_tracing(&flags, &config.log.level)?;

    commands::dispatch::dispatch(cli.command, config, &flags).await
}

fn init_tracing(flags: &cli::GlobalFlags, configured: &str) -> anyhow::Result<()> {
    let level = bootstrap::log_level(flags, configured);

    let filter = tracing_subscriber::EnvFilter::try_from_env("FEEDBACK_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
