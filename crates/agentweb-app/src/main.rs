use anyhow::Result;
use clap::Parser;
use std::io;
use std::process::ExitCode;

use agentweb_core::ClientError;
use agentweb::{init_logging, run_command, run_repl_mode, AppConfig, Cli, Commands};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let app_config = AppConfig::from_cli(&cli)?;
    let controller = app_config.build_controller();

    let outcome = match cli.command() {
        Commands::Chat => run_repl_mode(&controller).await,
        command => run_command(&controller, &command, &mut io::stdout()).await,
    };

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        // Already reported by the notifier.
        Err(e) if e.downcast_ref::<ClientError>().is_some() => Ok(ExitCode::FAILURE),
        Err(e) => Err(e),
    }
}
