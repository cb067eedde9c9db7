use agentweb_core::build_time_server_url;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for agentweb
#[derive(Parser, Debug)]
#[command(name = "agentweb")]
#[command(about = "Terminal client for the agent chat service")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Base URL of the agent service
    #[arg(
        long,
        value_name = "URL",
        env = "AGENTWEB_SERVER_URL",
        default_value = build_time_server_url()
    )]
    pub server_url: String,

    /// Where the session credential is kept (default: ~/.agentweb/credential.json)
    #[arg(long, value_name = "PATH", env = "AGENTWEB_CREDENTIAL_FILE")]
    pub credential_file: Option<PathBuf>,

    /// Enable verbose debug output (request dispatch, session transitions)
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Interactive chat (default)
    Chat,
    /// Print the stored transcript
    History,
    /// Send one message and print the resulting transcript
    Send {
        /// Message text; multiple words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Erase the transcript on the server
    Clear,
}

impl Cli {
    /// The subcommand to run, `chat` when none was given
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Chat)
    }
}
