//! Voyage Storage - user and trip-history persistence
//!
//! Defines the [`UserStore`] and [`HistoryStore`] traits and an in-memory
//! implementation used for development and tests. The PostgreSQL
//! implementation lives with the API server.

mod traits;

pub use traits::{HistoryStore, UserStore};

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use voyage_core::{NewUser, StorageError, Timestamp, TripHistoryEntry, UserRecord};

// ============================================================================
// IN-MEMORY STORE
// ============================================================================

#[derive(Debug, Clone)]
struct StoredUser {
    credential: String,
    profile: Map<String, Value>,
    history: Vec<TripHistoryEntry>,
    created_at: Timestamp,
}

/// In-memory user and history store.
///
/// All mutations happen under one write lock, so a history append is a
/// single push and concurrent appends are never lost.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    users: Arc<RwLock<HashMap<String, StoredUser>>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get count of stored users.
    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn user_insert(&self, user: NewUser) -> Result<(), StorageError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(StorageError::AlreadyExists { email: user.email });
        }
        users.insert(
            user.email,
            StoredUser {
                credential: user.credential,
                profile: user.profile,
                history: Vec::new(),
                created_at: user.created_at,
            },
        );
        Ok(())
    }

    async fn user_get(&self, email: &str) -> Result<Option<UserRecord>, StorageError> {
        let users = self.users.read().await;
        Ok(users.get(email).map(|stored| UserRecord {
            email: email.to_string(),
            profile: stored.profile.clone(),
            itinerary_history: stored.history.clone(),
            created_at: stored.created_at,
        }))
    }

    async fn credential_get(&self, email: &str) -> Result<Option<String>, StorageError> {
        let users = self.users.read().await;
        Ok(users.get(email).map(|stored| stored.credential.clone()))
    }

    async fn profile_update(
        &self,
        email: &str,
        fields: Map<String, Value>,
    ) -> Result<bool, StorageError> {
        let mut users = self.users.write().await;
        match users.get_mut(email) {
            Some(stored) => {
                stored.profile.extend(fields);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl HistoryStore for InMemoryStore {
    async fn recent_trips(
        &self,
        email: &str,
        limit: Option<usize>,
    ) -> Result<Vec<TripHistoryEntry>, StorageError> {
        let users = self.users.read().await;
        let Some(stored) = users.get(email) else {
            return Ok(Vec::new());
        };
        let skip = limit
            .map(|limit| stored.history.len().saturating_sub(limit))
            .unwrap_or(0);
        Ok(stored.history[skip..].to_vec())
    }

    async fn append_trip(&self, email: &str, entry: &TripHistoryEntry) -> Result<(), StorageError> {
        let mut users = self.users.write().await;
        let stored = users.get_mut(email).ok_or_else(|| StorageError::NotFound {
            email: email.to_string(),
        })?;
        stored.history.push(entry.clone());
        Ok(())
    }
}

// ============================================================================
// UNIT TESTS
// ============================================================================


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;
    use voyage_core::BudgetTier;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        /// recent_trips(limit) is always the chronological suffix of the full history.
        #[test]
        fn prop_recent_trips_is_suffix(count in 0usize..12, limit in 0usize..15) {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .build()
                .map_err(|e| TestCaseError::fail(e.to_string()))?;

            let (full, recent) = runtime
                .block_on(async {
                    let store = InMemoryStore::new();
                    store
                        .user_insert(NewUser {
                            email: "p@b.com".to_string(),
                            credential: String::new(),
                            profile: Map::new(),
                            created_at: chrono::Utc::now(),
                        })
                        .await?;
                    for i in 0..count {
                        let entry = TripHistoryEntry {
                            destination: format!("D{}", i),
                            days: 1,
                            interests: String::new(),
                            budget: BudgetTier::Budget,
                            itinerary: String::new(),
                            created_at: chrono::Utc::now(),
                        };
                        store.append_trip("p@b.com", &entry).await?;
                    }
                    let full = store.recent_trips("p@b.com", None).await?;
                    let recent = store.recent_trips("p@b.com", Some(limit)).await?;
                    Ok::<_, StorageError>((full, recent))
                })
                .map_err(|e| TestCaseError::fail(e.to_string()))?;

            prop_assert_eq!(recent.len(), count.min(limit));
            prop_assert_eq!(&full[full.len() - recent.len()..], &recent[..]);
        }
    }
}
