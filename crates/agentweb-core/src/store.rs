//! Persisted session credential.
//!
//! A store holds at most one credential. Reads never fail loudly: anything
//! missing, unreadable or already expired reads back as `None`, which sends
//! the session manager down the acquisition path.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use agentweb_types::Credential;
use chrono::{DateTime, Duration, Utc};

use crate::error::StoreError;

/// Source of "now" for expiry arithmetic
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    now: Cell<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

/// Persistent home of the session credential
pub trait CredentialStore {
    /// The stored, non-expired credential, if any
    fn get(&self) -> Option<Credential>;

    /// Persist `value` with expiry `now + ttl`, replacing whatever was stored
    fn set(&self, value: &str, ttl: Duration) -> Result<Credential, StoreError>;

    /// Re-persist an existing credential, sliding its expiry forward
    fn refresh(&self, credential: &Credential, ttl: Duration) -> Result<Credential, StoreError> {
        self.set(&credential.value, ttl)
    }
}

/// In-process store, used by tests and by embedders that manage
/// persistence themselves
pub struct MemoryCredentialStore {
    clock: Rc<dyn Clock>,
    slot: RefCell<Option<Credential>>,
    writes: Cell<usize>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::with_clock(Rc::new(SystemClock))
    }

    pub fn with_clock(clock: Rc<dyn Clock>) -> Self {
        Self {
            clock,
            slot: RefCell::new(None),
            writes: Cell::new(0),
        }
    }

    /// Seed the store as if a previous page load had persisted `credential`
    pub fn preload(&self, credential: Credential) {
        *self.slot.borrow_mut() = Some(credential);
    }

    /// Raw stored record, expired or not
    pub fn peek(&self) -> Option<Credential> {
        self.slot.borrow().clone()
    }

    /// Number of successful `set` calls
    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl Default for MemoryCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self) -> Option<Credential> {
        let now = self.clock.now();
        self.slot
            .borrow()
            .as_ref()
            .filter(|c| !c.is_expired_at(now))
            .cloned()
    }

    fn set(&self, value: &str, ttl: Duration) -> Result<Credential, StoreError> {
        let credential = Credential::issued_at(value, self.clock.now(), ttl);
        *self.slot.borrow_mut() = Some(credential.clone());
        self.writes.set(self.writes.get() + 1);
        Ok(credential)
    }
}
