use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::cell::Cell;

use agentweb_core::SyncController;

use crate::render::TranscriptPrinter;

/// What a line of REPL input asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplInput {
    Send(String),
    Clear,
    Reload,
    Quit,
    Help,
    Unknown(String),
    Empty,
}

impl ReplInput {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line {
            "" => ReplInput::Empty,
            "/quit" | "/exit" | "exit" | "quit" => ReplInput::Quit,
            "/clear" => ReplInput::Clear,
            "/reload" => ReplInput::Reload,
            "/help" => ReplInput::Help,
            cmd if cmd.starts_with('/') => ReplInput::Unknown(cmd.to_string()),
            text => ReplInput::Send(text.to_string()),
        }
    }
}

/// Run interactive REPL mode
pub async fn run_repl_mode(controller: &SyncController) -> Result<()> {
    println!("{}", "agentweb chat".bright_cyan().bold());
    println!(
        "{}",
        "Type a message, or /clear, /reload, /quit\n".bright_black()
    );

    // Typing indicator on each false -> true edge of the pending flag.
    let was_pending = Cell::new(false);
    let indicator = controller.subscribe(move |view| {
        if view.pending && !was_pending.get() {
            println!("{}", "agent is typing...".bright_black().italic());
        }
        was_pending.set(view.pending);
    });

    let mut printer = TranscriptPrinter::new();
    // Failures are already reported; the REPL stays usable for /reload.
    if controller.start().await.is_ok() {
        print_changes(controller, &mut printer);
    }

    let mut rl = DefaultEditor::new()?;
    loop {
        let readline = rl.readline(&format!("{} ", "You:".bright_green().bold()));

        match readline {
            Ok(line) => {
                let input = ReplInput::parse(&line);
                let outcome = match input {
                    ReplInput::Empty => continue,
                    ReplInput::Quit => break,
                    ReplInput::Help => {
                        println!("{}", "/clear  erase the transcript".bright_black());
                        println!("{}", "/reload fetch the transcript again".bright_black());
                        println!("{}", "/quit   leave".bright_black());
                        continue;
                    }
                    ReplInput::Unknown(cmd) => {
                        println!("{} {}", "Unknown command:".yellow(), cmd);
                        continue;
                    }
                    ReplInput::Clear => controller.clear().await,
                    ReplInput::Reload => controller.reload().await,
                    ReplInput::Send(text) => {
                        let _ = rl.add_history_entry(text.as_str());
                        controller.send_message(&text).await
                    }
                };
                if let Err(e) = outcome {
                    log::debug!("repl action failed: {}", e);
                }
                print_changes(controller, &mut printer);
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                controller.unsubscribe(indicator);
                return Err(e.into());
            }
        }
    }

    controller.unsubscribe(indicator);
    println!("{}", "Goodbye!".bright_cyan());
    Ok(())
}

fn print_changes(controller: &SyncController, printer: &mut TranscriptPrinter) {
    if let Some(transcript) = controller.transcript() {
        for line in printer.update(&transcript) {
            println!("{}", line);
        }
    }
}
