//! Synchronization controller.
//!
//! The single source of truth for what is displayed. It sequences session
//! acquisition, the initial history load, and a forced reload after every
//! mutation. The transcript is only ever replaced wholesale by a
//! `fetch-history` result; nothing is merged or echoed locally.
//!
//! Overlapping actions are not serialized. Two sends in flight both reload
//! afterwards and whichever reload settles last is what stays on screen.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use agentweb_types::{Credential, Operation, Turn};
use serde::Serialize;

use crate::client::TranscriptClient;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::notify::Notifier;
use crate::session::SessionManager;
use crate::store::CredentialStore;
use crate::transport::Transport;

/// What the presentation layer should show
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "reason", rename_all = "lowercase")]
pub enum ViewStatus {
    /// No transcript has arrived yet
    Loading,
    /// Credential and transcript are both present
    Ready,
    /// Session acquisition or the first load failed; `start` retries
    Failed(String),
}

/// Snapshot handed to listeners and to `view()`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatView {
    pub status: ViewStatus,
    pub transcript: Vec<Turn>,
    pub pending: bool,
}

pub type ListenerId = usize;

type Listener = Rc<dyn Fn(&ChatView)>;

struct SyncState {
    transcript: Option<Vec<Turn>>,
    sends_in_flight: usize,
    status: ViewStatus,
}

struct Inner {
    session: SessionManager,
    client: TranscriptClient,
    notifier: Rc<dyn Notifier>,
    state: RefCell<SyncState>,
    listeners: RefCell<Vec<(ListenerId, Listener)>>,
    next_listener: Cell<ListenerId>,
}

/// Cheap to clone; all clones drive the same session and transcript
#[derive(Clone)]
pub struct SyncController {
    inner: Rc<Inner>,
}

impl SyncController {
    pub fn new(
        session: SessionManager,
        client: TranscriptClient,
        notifier: Rc<dyn Notifier>,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                session,
                client,
                notifier,
                state: RefCell::new(SyncState {
                    transcript: None,
                    sends_in_flight: 0,
                    status: ViewStatus::Loading,
                }),
                listeners: RefCell::new(Vec::new()),
                next_listener: Cell::new(0),
            }),
        }
    }

    /// Wire a controller from its collaborators
    pub fn from_config(
        config: &ClientConfig,
        store: Rc<dyn CredentialStore>,
        transport: Rc<dyn Transport>,
        notifier: Rc<dyn Notifier>,
    ) -> Self {
        let session = SessionManager::new(store, config.credential_ttl);
        Self::new(session, TranscriptClient::new(transport), notifier)
    }

    pub fn session(&self) -> &SessionManager {
        &self.inner.session
    }

    pub fn view(&self) -> ChatView {
        let state = self.inner.state.borrow();
        ChatView {
            status: state.status.clone(),
            transcript: state.transcript.clone().unwrap_or_default(),
            pending: state.sends_in_flight > 0,
        }
    }

    pub fn transcript(&self) -> Option<Vec<Turn>> {
        self.inner.state.borrow().transcript.clone()
    }

    pub fn pending(&self) -> bool {
        self.inner.state.borrow().sends_in_flight > 0
    }

    pub fn status(&self) -> ViewStatus {
        self.inner.state.borrow().status.clone()
    }

    /// True once both a credential and a transcript exist
    pub fn can_render(&self) -> bool {
        self.inner.session.is_active() && self.inner.state.borrow().transcript.is_some()
    }

    /// Call `listener` with a fresh view after every state change
    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&ChatView) + 'static,
    {
        let id = self.inner.next_listener.get();
        self.inner.next_listener.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.inner.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    /// Establish the session, then load the transcript.
    ///
    /// Safe to call again after a failure: an active session is kept and
    /// only the load is repeated.
    pub async fn start(&self) -> Result<(), ClientError> {
        if self.inner.state.borrow().transcript.is_none() {
            self.update(|state| state.status = ViewStatus::Loading);
        }

        if let Err(e) = self.inner.session.establish(&self.inner.client).await {
            self.surface(&e);
            return Err(e);
        }
        self.reload().await
    }

    /// Replace the transcript with the server's current one.
    ///
    /// On failure the previous transcript stays on screen.
    pub async fn reload(&self) -> Result<(), ClientError> {
        let credential = self.require_credential(Operation::FetchHistory)?;
        log::debug!("reloading transcript");

        match self.inner.client.fetch_history(&credential).await {
            Ok(turns) => {
                log::debug!("transcript replaced, {} turns", turns.len());
                self.update(|state| {
                    state.transcript = Some(turns);
                    state.status = ViewStatus::Ready;
                });
                Ok(())
            }
            Err(e) => {
                self.surface(&e);
                Err(e)
            }
        }
    }

    /// Submit a user turn, then reload whatever the outcome.
    ///
    /// `pending` is raised before the request goes out and lowered as soon as
    /// it settles, before the reload starts.
    pub async fn send_message(&self, text: &str) -> Result<(), ClientError> {
        let credential = self.require_credential(Operation::AskAgent)?;

        self.update(|state| state.sends_in_flight += 1);
        let outcome = self.inner.client.ask_agent(&credential, text).await;
        self.update(|state| state.sends_in_flight = state.sends_in_flight.saturating_sub(1));

        if let Err(e) = &outcome {
            self.surface(e);
        }
        // Reload failures are already surfaced; the send outcome is what we report.
        let _ = self.reload().await;
        outcome.map(|_| ())
    }

    /// Clear the server-side history, then reload whatever the outcome
    pub async fn clear(&self) -> Result<(), ClientError> {
        let credential = self.require_credential(Operation::ClearHistory)?;

        let outcome = self.inner.client.clear_history(&credential).await;
        if let Err(e) = &outcome {
            self.surface(e);
        }
        let _ = self.reload().await;
        outcome.map(|_| ())
    }

    fn require_credential(&self, operation: Operation) -> Result<Credential, ClientError> {
        self.inner.session.credential().ok_or_else(|| {
            let e = ClientError::NoSession { operation };
            self.surface(&e);
            e
        })
    }

    fn surface(&self, error: &ClientError) {
        // The notifier owns reporting, logging included.
        self.inner.notifier.notify(error);

        if self.inner.state.borrow().transcript.is_none() {
            let reason = error.to_string();
            self.update(|state| state.status = ViewStatus::Failed(reason));
        }
    }

    fn update<F>(&self, change: F)
    where
        F: FnOnce(&mut SyncState),
    {
        change(&mut self.inner.state.borrow_mut());
        self.emit();
    }

    fn emit(&self) {
        let view = self.view();
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(&view);
        }
    }
}
