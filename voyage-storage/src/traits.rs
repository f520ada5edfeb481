//! Async storage traits for users and trip history.

use ::async_trait::async_trait;
use serde_json::{Map, Value};
use voyage_core::{NewUser, StorageError, TripHistoryEntry, UserRecord};

/// Identity store: account records keyed by email.
#[async_trait]
pub trait UserStore: Send + Sync {
    // ========================================================================
    // ACCOUNT OPERATIONS
    // ========================================================================

    /// Insert a new user with an empty history.
    /// Fails with [`StorageError::AlreadyExists`] when the email is taken.
    async fn user_insert(&self, user: NewUser) -> Result<(), StorageError>;

    /// Get a user, history included. The credential is never returned here.
    async fn user_get(&self, email: &str) -> Result<Option<UserRecord>, StorageError>;

    /// Get the stored credential digest for a user.
    async fn credential_get(&self, email: &str) -> Result<Option<String>, StorageError>;

    /// Merge profile fields into a user. Returns `false` when the user does not exist.
    ///
    /// Callers pass fields already filtered through
    /// [`voyage_core::profile_fields`]; implementations never touch history.
    async fn profile_update(
        &self,
        email: &str,
        fields: Map<String, Value>,
    ) -> Result<bool, StorageError>;

    // ========================================================================
    // HEALTH
    // ========================================================================

    /// Verify the backing store is reachable.
    async fn health_check(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

/// Per-user ordered trip history.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Most recent `limit` entries in chronological order; `None` means all.
    ///
    /// An unknown identity yields an empty list.
    async fn recent_trips(
        &self,
        email: &str,
        limit: Option<usize>,
    ) -> Result<Vec<TripHistoryEntry>, StorageError>;

    /// Append one entry to the end of the user's history as a single atomic push.
    /// Fails with [`StorageError::NotFound`] when the user does not exist.
    async fn append_trip(&self, email: &str, entry: &TripHistoryEntry) -> Result<(), StorageError>;
}
