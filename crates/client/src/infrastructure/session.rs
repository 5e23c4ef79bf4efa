//! Credential sources implementing `SessionPort`

use std::sync::{PoisonError, RwLock};

use eventhub_domain::Credential;

use crate::application::config::ENV_ACCESS_TOKEN;
use crate::ports::outbound::{storage_keys, SessionPort, StorageError, StorageProvider};

/// In-memory session, signed in and out explicitly by the auth layer.
#[derive(Default)]
pub struct SessionCredentials {
    current: RwLock<Option<Credential>>,
}

impl SessionCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(credential: Credential) -> Self {
        Self {
            current: RwLock::new(Some(credential)),
        }
    }

    pub fn sign_in(&self, credential: Credential) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(credential);
    }

    pub fn sign_out(&self) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl SessionPort for SessionCredentials {
    fn credential(&self) -> Option<Credential> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Session whose token is persisted in a `StorageProvider`.
///
/// The token is re-read on every call, so a login or logout performed by
/// another part of the application is picked up by the next operation.
#[derive(Clone)]
pub struct StoredSession<S: StorageProvider> {
    storage: S,
}

impl<S: StorageProvider> StoredSession<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Persist the token. Fails if the storage could not be written.
    pub fn sign_in(&self, credential: &Credential) -> Result<(), StorageError> {
        self.storage
            .save(storage_keys::ACCESS_TOKEN, credential.expose())
    }

    pub fn sign_out(&self) -> Result<(), StorageError> {
        self.storage.remove(storage_keys::ACCESS_TOKEN)
    }
}

impl<S: StorageProvider> SessionPort for StoredSession<S> {
    fn credential(&self) -> Option<Credential> {
        Credential::from_optional(self.storage.load(storage_keys::ACCESS_TOKEN))
    }
}

/// Session read from `EVENTHUB_ACCESS_TOKEN`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSession;

impl EnvSession {
    pub fn is_configured() -> bool {
        EnvSession.credential().is_some()
    }
}

impl SessionPort for EnvSession {
    fn credential(&self) -> Option<Credential> {
        Credential::from_optional(std::env::var(ENV_ACCESS_TOKEN).ok())
    }
}
