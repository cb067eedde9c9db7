//! # agentweb-api
//!
//! Native HTTP implementation of the agentweb [`Transport`] seam, built on
//! `reqwest`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::rc::Rc;
//! use agentweb_api::HttpTransport;
//! use agentweb_core::{ClientConfig, LogNotifier, MemoryCredentialStore, SyncController};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ClientConfig::default().with_server_url("http://localhost:8085");
//!     let controller = SyncController::from_config(
//!         &config,
//!         Rc::new(MemoryCredentialStore::new()),
//!         Rc::new(HttpTransport::from_config(&config)),
//!         Rc::new(LogNotifier),
//!     );
//!
//!     controller.start().await?;
//!     println!("{} turns", controller.view().transcript.len());
//!     Ok(())
//! }
//! ```
//!
//! [`Transport`]: agentweb_core::Transport

pub mod client;

pub use client::HttpTransport;
