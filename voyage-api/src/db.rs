//! Database Connection Pool Module
//!
//! PostgreSQL connection pooling with deadpool-postgres and the PostgreSQL
//! implementation of the user and history stores.
//!
//! Trip history lives in its own table keyed by a `BIGSERIAL` sequence, so an
//! append is a single `INSERT` and concurrent appends for one user can never
//! overwrite each other.

use std::time::Duration;

use async_trait::async_trait;
use deadpool_postgres::{Config, ManagerConfig, Pool, RecyclingMethod, Runtime};
use serde_json::{Map, Value as JsonValue};
use tokio_postgres::{NoTls, Row};
use voyage_core::{BudgetTier, NewUser, StorageError, Timestamp, TripHistoryEntry, UserRecord};
use voyage_storage::{HistoryStore, UserStore};

use crate::error::{ApiError, ApiResult};

// ============================================================================
// CONNECTION POOL CONFIGURATION
// ============================================================================

/// Database connection pool configuration.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// PostgreSQL host
    pub host: String,
    /// PostgreSQL port
    pub port: u16,
    /// Database name
    pub dbname: String,
    /// Database user
    pub user: String,
    /// Database password
    pub password: String,
    /// Maximum pool size
    pub max_size: usize,
    /// Connection timeout
    pub timeout: Duration,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            dbname: "voyage_vista".to_string(),
            user: "postgres".to_string(),
            password: "".to_string(),
            max_size: 16,
            timeout: Duration::from_secs(30),
        }
    }
}

impl DbConfig {
    /// Create a new database configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("VOYAGE_DB_HOST").unwrap_or(defaults.host),
            port: std::env::var("VOYAGE_DB_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            dbname: std::env::var("VOYAGE_DB_NAME").unwrap_or(defaults.dbname),
            user: std::env::var("VOYAGE_DB_USER").unwrap_or(defaults.user),
            password: std::env::var("VOYAGE_DB_PASSWORD").unwrap_or_default(),
            max_size: std::env::var("VOYAGE_DB_POOL_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_size),
            timeout: std::env::var("VOYAGE_DB_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }

    /// Create a connection pool from this configuration.
    pub fn create_pool(&self) -> ApiResult<Pool> {
        let mut cfg = Config::new();
        cfg.host = Some(self.host.clone());
        cfg.port = Some(self.port);
        cfg.dbname = Some(self.dbname.clone());
        cfg.user = Some(self.user.clone());
        cfg.password = Some(self.password.clone());
        cfg.connect_timeout = Some(self.timeout);

        cfg.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });

        let mut pool_config = deadpool_postgres::PoolConfig::new(self.max_size);
        pool_config.timeouts.wait = Some(self.timeout);
        cfg.pool = Some(pool_config);

        cfg.create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| ApiError::database_error(format!("Failed to create pool: {}", e)))
    }
}

// ============================================================================
// SCHEMA
// ============================================================================

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    email         TEXT PRIMARY KEY,
    password_hash TEXT NOT NULL,
    profile       JSONB NOT NULL DEFAULT '{}'::jsonb,
    created_at    TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE IF NOT EXISTS trip_history (
    seq         BIGSERIAL PRIMARY KEY,
    email       TEXT NOT NULL REFERENCES users (email) ON DELETE CASCADE,
    destination TEXT NOT NULL,
    days        INTEGER NOT NULL,
    interests   TEXT NOT NULL,
    budget      TEXT NOT NULL,
    itinerary   TEXT NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL
);

CREATE INDEX IF NOT EXISTS trip_history_email_seq ON trip_history (email, seq);
";

const HISTORY_COLUMNS: &str = "destination, days, interests, budget, itinerary, created_at";

// ============================================================================
// DATABASE CLIENT WRAPPER
// ============================================================================

/// Database client that wraps a connection pool.
#[derive(Clone)]
pub struct DbClient {
    pool: Pool,
}

impl DbClient {
    /// Create a new database client with the given pool.
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Create a new database client from configuration.
    pub fn from_config(config: &DbConfig) -> ApiResult<Self> {
        let pool = config.create_pool()?;
        Ok(Self::new(pool))
    }

    /// Get the current pool size for observability.
    pub fn pool_size(&self) -> usize {
        self.pool.status().size
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> ApiResult<deadpool_postgres::Object> {
        self.pool.get().await.map_err(ApiError::from)
    }

    /// Create tables and indexes when missing.
    pub async fn ensure_schema(&self) -> ApiResult<()> {
        let conn = self.get_conn().await?;
        conn.batch_execute(SCHEMA).await?;
        tracing::info!("Database schema ready");
        Ok(())
    }

    /// Round-trip a trivial query.
    pub async fn ping(&self) -> ApiResult<()> {
        let conn = self.get_conn().await?;
        conn.query_one("SELECT 1", &[]).await?;
        Ok(())
    }

    async fn storage_conn(&self) -> Result<deadpool_postgres::Object, StorageError> {
        self.pool.get().await.map_err(|e| {
            tracing::error!("Connection pool error: {:?}", e);
            StorageError::Unavailable {
                reason: e.to_string(),
            }
        })
    }
}

fn query_failed(operation: &'static str) -> impl FnOnce(tokio_postgres::Error) -> StorageError {
    move |e| {
        tracing::error!(operation, "Database error: {:?}", e);
        StorageError::QueryFailed {
            operation: operation.to_string(),
            reason: e.to_string(),
        }
    }
}

fn corrupt(e: impl std::fmt::Display) -> StorageError {
    StorageError::Corrupt {
        reason: e.to_string(),
    }
}

fn history_entry_from_row(row: &Row) -> Result<TripHistoryEntry, StorageError> {
    let days: i32 = row.try_get("days").map_err(corrupt)?;
    let budget: String = row.try_get("budget").map_err(corrupt)?;
    Ok(TripHistoryEntry {
        destination: row.try_get("destination").map_err(corrupt)?,
        days: u32::try_from(days).map_err(corrupt)?,
        interests: row.try_get("interests").map_err(corrupt)?,
        budget: BudgetTier::from_label(&budget),
        itinerary: row.try_get("itinerary").map_err(corrupt)?,
        created_at: row.try_get("created_at").map_err(corrupt)?,
    })
}

/// Read history on a connection the caller already holds, oldest first.
async fn query_history(
    conn: &deadpool_postgres::Object,
    email: &str,
    limit: Option<usize>,
) -> Result<Vec<TripHistoryEntry>, StorageError> {
    let rows = match limit {
        None => {
            let sql = format!(
                "SELECT {} FROM trip_history WHERE email = $1 ORDER BY seq ASC",
                HISTORY_COLUMNS
            );
            conn.query(sql.as_str(), &[&email]).await
        }
        Some(limit) => {
            let limit = i64::try_from(limit).unwrap_or(i64::MAX);
            let sql = format!(
                "SELECT {cols} FROM ( \
                     SELECT seq, {cols} FROM trip_history \
                     WHERE email = $1 ORDER BY seq DESC LIMIT $2 \
                 ) recent ORDER BY seq ASC",
                cols = HISTORY_COLUMNS
            );
            conn.query(sql.as_str(), &[&email, &limit]).await
        }
    }
    .map_err(query_failed("recent_trips"))?;

    rows.iter().map(history_entry_from_row).collect()
}

// ============================================================================
// USER STORE
// ============================================================================

#[async_trait]
impl UserStore for DbClient {
    async fn user_insert(&self, user: NewUser) -> Result<(), StorageError> {
        let conn = self.storage_conn().await?;
        let profile = JsonValue::Object(user.profile);

        let inserted = conn
            .execute(
                "INSERT INTO users (email, password_hash, profile, created_at) \
                 VALUES ($1, $2, $3, $4) \
                 ON CONFLICT (email) DO NOTHING",
                &[&user.email, &user.credential, &profile, &user.created_at],
            )
            .await
            .map_err(query_failed("user_insert"))?;

        if inserted == 0 {
            return Err(StorageError::AlreadyExists { email: user.email });
        }
        Ok(())
    }

    async fn user_get(&self, email: &str) -> Result<Option<UserRecord>, StorageError> {
        let conn = self.storage_conn().await?;
        let row = conn
            .query_opt("SELECT profile, created_at FROM users WHERE email = $1", &[&email])
            .await
            .map_err(query_failed("user_get"))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let profile: JsonValue = row.try_get("profile").map_err(corrupt)?;
        let created_at: Timestamp = row.try_get("created_at").map_err(corrupt)?;
        let profile = match profile {
            JsonValue::Object(map) => map,
            other => return Err(corrupt(format!("profile is not an object: {}", other))),
        };

        let itinerary_history = query_history(&conn, email, None).await?;

        Ok(Some(UserRecord {
            email: email.to_string(),
            profile,
            itinerary_history,
            created_at,
        }))
    }

    async fn credential_get(&self, email: &str) -> Result<Option<String>, StorageError> {
        let conn = self.storage_conn().await?;
        let row = conn
            .query_opt("SELECT password_hash FROM users WHERE email = $1", &[&email])
            .await
            .map_err(query_failed("credential_get"))?;

        row.map(|row| row.try_get("password_hash").map_err(corrupt))
            .transpose()
    }

    async fn profile_update(
        &self,
        email: &str,
        fields: Map<String, JsonValue>,
    ) -> Result<bool, StorageError> {
        let conn = self.storage_conn().await?;
        let fields = JsonValue::Object(fields);

        let updated = conn
            .execute(
                "UPDATE users SET profile = profile || $2::jsonb WHERE email = $1",
                &[&email, &fields],
            )
            .await
            .map_err(query_failed("profile_update"))?;

        Ok(updated > 0)
    }

    async fn health_check(&self) -> Result<(), StorageError> {
        self.ping().await.map_err(|e| StorageError::Unavailable { reason: e.message })
    }
}

// ============================================================================
// HISTORY STORE
// ============================================================================

#[async_trait]
impl HistoryStore for DbClient {
    async fn recent_trips(
        &self,
        email: &str,
        limit: Option<usize>,
    ) -> Result<Vec<TripHistoryEntry>, StorageError> {
        let conn = self.storage_conn().await?;
        query_history(&conn, email, limit).await
    }

    async fn append_trip(
        &self,
        email: &str,
        entry: &TripHistoryEntry,
    ) -> Result<(), StorageError> {
        let conn = self.storage_conn().await?;
        let days = i32::try_from(entry.days).map_err(|e| StorageError::QueryFailed {
            operation: "append_trip".to_string(),
            reason: e.to_string(),
        })?;

        let inserted = conn
            .execute(
                "INSERT INTO trip_history \
                 (email, destination, days, interests, budget, itinerary, created_at) \
                 SELECT $1::text, $2::text, $3::int4, $4::text, \
                        $5::text, $6::text, $7::timestamptz \
                 WHERE EXISTS (SELECT 1 FROM users WHERE email = $1::text)",
                &[
                    &email,
                    &entry.destination,
                    &days,
                    &entry.interests,
                    &entry.budget.as_str(),
                    &entry.itinerary,
                    &entry.created_at,
                ],
            )
            .await
            .map_err(query_failed("append_trip"))?;

        if inserted == 0 {
            return Err(StorageError::NotFound {
                email: email.to_string(),
            });
        }
        Ok(())
    }
}
