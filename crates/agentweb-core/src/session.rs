//! Session lifecycle: `Uninitialized -> Active(credential)`.
//!
//! Active is terminal for the life of the manager. Expiry that happens while
//! active is not detected here; the next authenticated call fails instead.
//!
//! Acquisition is shared: callers that arrive while one is in flight await
//! the same outcome, so `init-session` runs at most once per attempt and
//! only one token is ever persisted.

use std::cell::RefCell;
use std::rc::Rc;

use agentweb_types::Credential;
use chrono::Duration;
use futures::future::{FutureExt, LocalBoxFuture, Shared};

use crate::client::TranscriptClient;
use crate::error::{ClientError, StoreError};
use crate::store::{Clock, CredentialStore, SystemClock};

type Acquisition = Shared<LocalBoxFuture<'static, Result<Credential, ClientError>>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Active(Credential),
}

/// Sole owner of the credential
pub struct SessionManager {
    store: Rc<dyn CredentialStore>,
    clock: Rc<dyn Clock>,
    ttl: Duration,
    state: RefCell<SessionState>,
    in_flight: RefCell<Option<Acquisition>>,
}

impl SessionManager {
    pub fn new(store: Rc<dyn CredentialStore>, ttl: Duration) -> Self {
        Self::with_clock(store, ttl, Rc::new(SystemClock))
    }

    pub fn with_clock(store: Rc<dyn CredentialStore>, ttl: Duration, clock: Rc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            ttl,
            state: RefCell::new(SessionState::Uninitialized),
            in_flight: RefCell::new(None),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn credential(&self) -> Option<Credential> {
        match &*self.state.borrow() {
            SessionState::Active(credential) => Some(credential.clone()),
            SessionState::Uninitialized => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(*self.state.borrow(), SessionState::Active(_))
    }

    /// True while an acquisition is awaiting the service
    pub fn is_establishing(&self) -> bool {
        self.in_flight.borrow().is_some()
    }

    /// Make sure a credential exists, reusing the stored one when possible.
    ///
    /// A stored credential is re-persisted so every start slides its expiry
    /// forward by the TTL. Without one, `init-session` is called once and its
    /// token persisted verbatim. On failure the manager stays uninitialized
    /// and the next call starts a fresh attempt.
    pub async fn establish(&self, client: &TranscriptClient) -> Result<Credential, ClientError> {
        if let Some(credential) = self.credential() {
            return Ok(credential);
        }

        let acquisition = self.join_or_begin(client);
        let outcome = acquisition.clone().await;

        {
            let mut in_flight = self.in_flight.borrow_mut();
            if in_flight.as_ref().is_some_and(|current| current.ptr_eq(&acquisition)) {
                *in_flight = None;
            }
        }

        let credential = outcome?;
        if let Some(active) = self.credential() {
            return Ok(active);
        }
        log::info!("session active, expires {}", credential.expires_at);
        *self.state.borrow_mut() = SessionState::Active(credential.clone());
        Ok(credential)
    }

    fn join_or_begin(&self, client: &TranscriptClient) -> Acquisition {
        if let Some(pending) = self.in_flight.borrow().as_ref() {
            log::debug!("joining in-flight session acquisition");
            return pending.clone();
        }

        let store = self.store.clone();
        let clock = self.clock.clone();
        let ttl = self.ttl;
        let client = client.clone();
        let acquisition: Acquisition = async move {
            match store.get() {
                Some(existing) => {
                    log::info!("reusing stored credential {}", existing.fingerprint());
                    let written = store.refresh(&existing, ttl);
                    Ok(persisted(&existing.value, written, clock.as_ref(), ttl))
                }
                None => {
                    log::info!("no stored credential, requesting a new session");
                    let token = match client.init_session().await {
                        Ok(token) => token,
                        Err(e) => return Err(e),
                    };
                    let written = store.set(&token, ttl);
                    Ok(persisted(&token, written, clock.as_ref(), ttl))
                }
            }
        }
        .boxed_local()
        .shared();

        *self.in_flight.borrow_mut() = Some(acquisition.clone());
        acquisition
    }
}

/// The stored credential, or an in-memory one when the store refused it
fn persisted(
    value: &str,
    written: Result<Credential, StoreError>,
    clock: &dyn Clock,
    ttl: Duration,
) -> Credential {
    written.unwrap_or_else(|e| {
        log::warn!("could not persist credential: {}", e);
        Credential::issued_at(value, clock.now(), ttl)
    })
}
