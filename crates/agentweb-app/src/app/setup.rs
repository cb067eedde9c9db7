use anyhow::{Context, Result};
use std::path::PathBuf;
use std::rc::Rc;

use agentweb_api::HttpTransport;
use agentweb_core::{ClientConfig, SyncController};

use crate::cli::Cli;
use crate::notify::ConsoleNotifier;
use crate::store::FileCredentialStore;

/// Application configuration derived from CLI arguments and environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub client_config: ClientConfig,
    pub credential_path: PathBuf,
}

impl AppConfig {
    /// Precedence: CLI flags > environment (including `.env`) > build-time defaults
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let credential_path = match &cli.credential_file {
            Some(path) => path.clone(),
            None => FileCredentialStore::default_path()
                .context("No home directory found; pass --credential-file")?,
        };

        Ok(Self {
            client_config: ClientConfig::default().with_server_url(cli.server_url.as_str()),
            credential_path,
        })
    }

    /// Controller backed by the credential file and the HTTP transport
    pub fn build_controller(&self) -> SyncController {
        log::debug!(
            "server {} credential file {}",
            self.client_config.server_url,
            self.credential_path.display()
        );
        SyncController::from_config(
            &self.client_config,
            Rc::new(FileCredentialStore::new(&self.credential_path)),
            Rc::new(HttpTransport::from_config(&self.client_config)),
            Rc::new(ConsoleNotifier),
        )
    }
}

/// `env_logger` at `warn` (or `RUST_LOG`), raised to `debug` by `-v`
pub fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    let _ = builder.try_init();
}
