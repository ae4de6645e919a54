//! Session persistence between app launches
//!
//! The serialized session lives in the platform keyring (macOS Keychain,
//! Windows Credential Manager, Linux Secret Service), the same place the
//! desktop build keeps its other secrets. Tests use the in-memory store.

use keyring::Entry;
use mediatracker_domain::{Result, Session, SessionConfig};
use parking_lot::Mutex;
use tracing::debug;

use crate::errors::InfraError;

/// Trait for the persisted session slot.
pub trait SessionStore: Send + Sync {
    fn save(&self, session: &Session) -> Result<()>;
    fn load(&self) -> Result<Option<Session>>;
    fn clear(&self) -> Result<()>;
}

/// Keyring-backed session store.
pub struct KeyringSessionStore {
    service: String,
    account: String,
}

impl KeyringSessionStore {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            service: config.keyring_service.clone(),
            account: config.keyring_account.clone(),
        }
    }

    fn entry(&self) -> Result<Entry> {
        Entry::new(&self.service, &self.account)
            .map_err(|err| InfraError::from(err).into())
    }
}

impl SessionStore for KeyringSessionStore {
    fn save(&self, session: &Session) -> Result<()> {
        debug!(user_id = %session.user_id, "persisting session");
        let serialized =
            serde_json::to_string(session).map_err(|err| InfraError::from(err).0)?;
        self.entry()?.set_password(&serialized).map_err(|err| InfraError::from(err).0)
    }

    fn load(&self) -> Result<Option<Session>> {
        match self.entry()?.get_password() {
            Ok(serialized) => match serde_json::from_str(&serialized) {
                Ok(session) => Ok(Some(session)),
                Err(err) => {
                    // A corrupt entry is unrecoverable; treat as signed out.
                    debug!(error = %err, "stored session is unreadable, discarding");
                    let _ = self.clear();
                    Ok(None)
                }
            },
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(err) => Err(InfraError::from(err).into()),
        }
    }

    fn clear(&self) -> Result<()> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => Err(InfraError::from(err).into()),
        }
    }
}

/// In-memory session store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn with_session(session: Session) -> Self {
        Self { slot: Mutex::new(Some(session)) }
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&self, session: &Session) -> Result<()> {
        *self.slot.lock() = Some(session.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<Session>> {
        Ok(self.slot.lock().clone())
    }

    fn clear(&self) -> Result<()> {
        *self.slot.lock() = None;
        Ok(())
    }
}
