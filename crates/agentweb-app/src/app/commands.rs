use anyhow::{bail, Result};
use colored::Colorize;
use std::io::Write;

use agentweb_core::SyncController;

use crate::cli::Commands;
use crate::render::render_turn;

/// Run a one-shot subcommand and print the resulting transcript to `out`.
///
/// Client failures have already been shown by the notifier when this
/// returns them.
pub async fn run_command(
    controller: &SyncController,
    command: &Commands,
    out: &mut dyn Write,
) -> Result<()> {
    controller.start().await?;

    match command {
        Commands::Chat => bail!("chat is interactive; use run_repl_mode"),
        Commands::History => {}
        Commands::Send { text } => controller.send_message(&text.join(" ")).await?,
        Commands::Clear => controller.clear().await?,
    }

    let transcript = controller.transcript().unwrap_or_default();
    if transcript.is_empty() {
        writeln!(out, "{}", "(no messages)".bright_black())?;
    }
    for turn in &transcript {
        writeln!(out, "{}", render_turn(turn))?;
    }
    Ok(())
}
