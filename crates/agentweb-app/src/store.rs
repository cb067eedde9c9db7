use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use agentweb_core::types::Credential;
use agentweb_core::{Clock, CredentialStore, StoreError, SystemClock};
use chrono::Duration;

/// Credential persisted as a JSON file between runs
pub struct FileCredentialStore {
    path: PathBuf,
    clock: Rc<dyn Clock>,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_clock(path, Rc::new(SystemClock))
    }

    pub fn with_clock(path: impl Into<PathBuf>, clock: Rc<dyn Clock>) -> Self {
        Self {
            path: path.into(),
            clock,
        }
    }

    /// `~/.agentweb/credential.json`, or `None` without a home directory
    pub fn default_path() -> Option<PathBuf> {
        env::var_os("HOME")
            .or_else(|| env::var_os("USERPROFILE"))
            .map(|home| PathBuf::from(home).join(".agentweb").join("credential.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn discard(&self) {
        if let Err(e) = fs::remove_file(&self.path) {
            log::debug!("could not remove {}: {}", self.path.display(), e);
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self) -> Option<Credential> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<Credential>(&raw) {
            Ok(credential) if !credential.is_expired_at(self.clock.now()) => Some(credential),
            Ok(credential) => {
                log::info!("stored credential {} has expired", credential.fingerprint());
                self.discard();
                None
            }
            Err(e) => {
                log::warn!("ignoring unreadable {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn set(&self, value: &str, ttl: Duration) -> Result<Credential, StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let credential = Credential::issued_at(value, self.clock.now(), ttl);
        fs::write(&self.path, serde_json::to_string_pretty(&credential)?)?;
        restrict_permissions(&self.path)?;

        log::debug!(
            "stored credential {} until {}",
            credential.fingerprint(),
            credential.expires_at
        );
        Ok(credential)
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
