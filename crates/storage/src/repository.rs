use async_trait::async_trait;
use edx_core::model::Account;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Local copy of the signed-in learner's profile.
///
/// Screens read it to show something immediately while the network fetch
/// is in flight; it is overwritten after every successful fetch.
#[async_trait]
pub trait ProfileCache: Send + Sync {
    /// Read the cached profile.
    ///
    /// Returns `Ok(None)` when nothing has been cached yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read or the stored
    /// payload no longer decodes.
    async fn profile(&self) -> Result<Option<Account>, StorageError>;

    /// Replace the cached profile.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the profile cannot be stored.
    async fn set_profile(&self, account: &Account) -> Result<(), StorageError>;

    /// Drop the cached profile, e.g. on logout.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn clear(&self) -> Result<(), StorageError>;
}

/// Simple in-memory cache for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryProfileCache {
    profile: Arc<Mutex<Option<Account>>>,
}

impl InMemoryProfileCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache pre-populated with `account`.
    #[must_use]
    pub fn with_profile(account: Account) -> Self {
        Self {
            profile: Arc::new(Mutex::new(Some(account))),
        }
    }
}

#[async_trait]
impl ProfileCache for InMemoryProfileCache {
    async fn profile(&self) -> Result<Option<Account>, StorageError> {
        let guard = self
            .profile
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn set_profile(&self, account: &Account) -> Result<(), StorageError> {
        let mut guard = self
            .profile
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(account.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let mut guard = self
            .profile
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.take();
        Ok(())
    }
}

/// Aggregates local stores behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub profile: Arc<dyn ProfileCache>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let profile: Arc<dyn ProfileCache> = Arc::new(InMemoryProfileCache::new());
        Self { profile }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edx_core::model::{AccountDraft, Username};

    fn account(name: &str) -> Account {
        AccountDraft {
            name: name.into(),
            ..AccountDraft::new(Username::new("learner").unwrap())
        }
        .validate()
        .unwrap()
    }

    #[tokio::test]
    async fn empty_cache_reads_none() {
        let cache = InMemoryProfileCache::new();
        assert!(cache.profile().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn set_profile_replaces_previous_value() {
        let cache = InMemoryProfileCache::with_profile(account("Old"));
        cache.set_profile(&account("New")).await.unwrap();

        let cached = cache.profile().await.unwrap().unwrap();
        assert_eq!(cached.name(), "New");

        cache.clear().await.unwrap();
        assert!(cache.profile().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn in_memory_storage_shares_one_cache_across_clones() {
        let storage = Storage::in_memory();
        let clone = storage.clone();

        storage.profile.set_profile(&account("Shared")).await.unwrap();

        let cached = clone.profile.profile().await.unwrap().unwrap();
        assert_eq!(cached.name(), "Shared");
    }
}
