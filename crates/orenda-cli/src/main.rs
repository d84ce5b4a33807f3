//! Orenda Bridge command-line entry point.

use std::process::ExitCode;

use clap::Parser;
use orenda_cli::cli::{Cli, Commands};
use orenda_cli::commands::{run_chat, run_export, run_journey, run_reset};
use orenda_cli::config::AppConfig;
use orenda_cli::error::AppError;
use orenda_cli::terminal::TerminalView;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    // Logs go to stderr so they never interleave with the transcript.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "orenda failed");
            eprintln!("orenda: {e}");
            if e.exit_code() == 2 {
                eprintln!("Check the content and pacing files, then start again.");
            }
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = AppConfig::load(&cli).await?;
    tracing::info!(state_file = %cli.state_file.display(), "starting orenda");

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let input = BufReader::new(tokio::io::stdin());
            run_chat(&config, input, Box::new(TerminalView::stdout())).await
        }
        Commands::Journey => {
            let input = BufReader::new(tokio::io::stdin());
            run_journey(&config, input, Box::new(TerminalView::stdout())).await
        }
        Commands::Export { output } => run_export(&config, output.as_deref()).await,
        Commands::Reset => run_reset(&config).await,
    }
}
