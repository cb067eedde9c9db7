//! # agentweb-core
//!
//! Session and transcript synchronization for an agent chat client.
//!
//! - **Credential store**: where the bearer token lives between page loads
//! - **Session manager**: reuse a stored credential or acquire a new one
//! - **Transcript client**: the typed `fetch-history` / `ask-agent` /
//!   `clear-history` calls
//! - **Sync controller**: sequences all of the above and exposes one view
//!   (transcript + pending flag) to whatever renders it
//!
//! Front-ends supply a [`Transport`], a [`CredentialStore`] and a
//! [`Notifier`]; everything else is shared.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::rc::Rc;
//! use agentweb_core::{ClientConfig, LogNotifier, MemoryCredentialStore, SyncController, Transport};
//!
//! async fn run(transport: Rc<dyn Transport>) -> Result<(), agentweb_core::ClientError> {
//!     let controller = SyncController::from_config(
//!         &ClientConfig::default(),
//!         Rc::new(MemoryCredentialStore::new()),
//!         transport,
//!         Rc::new(LogNotifier),
//!     );
//!     controller.start().await?;
//!     controller.send_message("hello").await?;
//!     for turn in controller.view().transcript {
//!         println!("{:?}: {}", turn.direction(), turn.content);
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod notify;
pub mod session;
pub mod store;
pub mod sync;
pub mod transport;

pub use agentweb_types as types;

pub use client::TranscriptClient;
pub use config::{build_time_server_url, endpoint_url, normalize_base_url, ClientConfig};
pub use error::{ClientError, StoreError};
pub use notify::{LogNotifier, Notifier, RecordingNotifier};
pub use session::{SessionManager, SessionState};
pub use store::{Clock, CredentialStore, ManualClock, MemoryCredentialStore, SystemClock};
pub use sync::{ChatView, ListenerId, SyncController, ViewStatus};
pub use transport::{ApiRequest, ApiResponse, Transport, TransportError};
