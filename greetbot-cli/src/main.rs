//! greetbot binary: loads config, initializes tracing, and dispatches on the
//! operating mode (polling or webhook). Startup errors are logged and map to
//! exit code 1; clean shutdown exits 0.

use anyhow::Result;
use clap::{Parser, Subcommand};
use greetbot_core::{init_tracing, AppConfig, Mode};
use greetbot_handlers::build_chain;
use std::process::ExitCode;
use tracing::error;

#[derive(Parser)]
#[command(name = "greetbot")]
#[command(about = "Minimal Telegram bot scaffold: polling or webhook mode", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let log_file = std::env::var("LOG_FILE").ok();
    if let Err(err) = init_tracing(log_file.as_deref()) {
        eprintln!("Failed to initialize logging: {err}");
        return ExitCode::FAILURE;
    }

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Startup failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let Commands::Run { token } = cli.command;
    let config = AppConfig::load(token)?;

    match config.mode {
        Mode::Polling => greetbot_telegram::run_polling(&config, build_chain).await,
        Mode::Webhook => greetbot_telegram::run_webhook(&config, build_chain).await,
    }
}
