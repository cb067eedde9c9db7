use std::rc::Rc;

use agentweb_core::types::Credential;
use agentweb_core::{Clock, CredentialStore, StoreError, SystemClock};
use chrono::{DateTime, Duration, Utc};
use web_sys::Storage;

/// Credential kept in `window.localStorage` under a fixed key.
///
/// The record carries its own expiry; an expired record is removed on read
/// and reported as absent.
pub struct BrowserCredentialStore {
    key: String,
    clock: Rc<dyn Clock>,
}

impl BrowserCredentialStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            clock: Rc::new(SystemClock),
        }
    }

    fn storage(&self) -> Option<Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl CredentialStore for BrowserCredentialStore {
    fn get(&self) -> Option<Credential> {
        let storage = self.storage()?;
        let raw = storage.get_item(&self.key).ok()??;

        let credential = decode_record(&raw, self.clock.now());
        if credential.is_none() {
            log::debug!("dropping unusable credential record under {}", self.key);
            let _ = storage.remove_item(&self.key);
        }
        credential
    }

    fn set(&self, value: &str, ttl: Duration) -> Result<Credential, StoreError> {
        let storage = self
            .storage()
            .ok_or_else(|| StoreError::Unavailable("localStorage is not accessible".to_string()))?;

        let credential = Credential::issued_at(value, self.clock.now(), ttl);
        let raw = serde_json::to_string(&credential)?;
        storage
            .set_item(&self.key, &raw)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?;
        Ok(credential)
    }
}

/// Parse a stored record, rejecting garbage and anything expired at `now`
pub fn decode_record(raw: &str, now: DateTime<Utc>) -> Option<Credential> {
    serde_json::from_str::<Credential>(raw)
        .ok()
        .filter(|c| !c.value.is_empty() && !c.is_expired_at(now))
}
