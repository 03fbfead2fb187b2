//! Main entry point for chatlens.

use chatlens::{apply_cli_overrides, apply_env_overrides, load_config, AppResult, ChatLens, Cli};
use clap::Parser;
use std::io::Write;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(verbose: bool, json: bool) {
    let default_filter = if verbose {
        "chatlens=debug,chatlens_report=debug,chatlens_config=debug"
    } else {
        "chatlens=info,chatlens_report=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    // Logs go to stderr so stdout carries only the requested output.
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let mut config = load_config(cli.config.as_deref()).await?;
    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;
    apply_cli_overrides(&mut config, &cli);

    let app = ChatLens::new(config)?;
    let source = app.open_source().await?;
    let output = app.execute(&cli.command, &source).await?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.json_logs);

    info!("Starting chatlens");

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("chatlens failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
