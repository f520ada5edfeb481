//! API Configuration Module
//!
//! CORS settings, the storage backend switch and provider credentials.
//! Everything is loaded from environment variables once at startup, with
//! development-friendly defaults where a default makes sense.

use secrecy::SecretString;
use voyage_core::ConfigError;
use voyage_llm::providers::gemini::DEFAULT_BASE_URL as GEMINI_DEFAULT_BASE_URL;

// ============================================================================
// API CONFIGURATION
// ============================================================================

/// HTTP surface configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Allowed CORS origins (comma-separated in env var).
    /// Empty means allow all origins (dev mode).
    pub cors_origins: Vec<String>,

    /// Whether to allow credentials in CORS requests.
    pub cors_allow_credentials: bool,

    /// Max age for CORS preflight cache in seconds.
    pub cors_max_age_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            cors_origins: Vec::new(),
            cors_allow_credentials: false,
            cors_max_age_secs: 86400,
        }
    }
}

impl ApiConfig {
    /// Create ApiConfig from environment variables.
    ///
    /// Environment variables:
    /// - `VOYAGE_CORS_ORIGINS`: Comma-separated allowed origins (empty = allow all)
    /// - `VOYAGE_CORS_ALLOW_CREDENTIALS`: "true" or "false" (default: false)
    /// - `VOYAGE_CORS_MAX_AGE_SECS`: Preflight cache duration (default: 86400)
    pub fn from_env() -> Self {
        let cors_origins = std::env::var("VOYAGE_CORS_ORIGINS")
            .ok()
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let cors_allow_credentials = std::env::var("VOYAGE_CORS_ALLOW_CREDENTIALS")
            .ok()
            .map(|s| s.to_lowercase() == "true")
            .unwrap_or(false);

        let cors_max_age_secs = std::env::var("VOYAGE_CORS_MAX_AGE_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(86400);

        Self {
            cors_origins,
            cors_allow_credentials,
            cors_max_age_secs,
        }
    }

    /// Check if running in production mode (strict CORS).
    pub fn is_production(&self) -> bool {
        !self.cors_origins.is_empty()
    }

    /// Check if a given origin is allowed.
    pub fn is_origin_allowed(&self, origin: &str) -> bool {
        if self.cors_origins.is_empty() {
            return true;
        }

        self.cors_origins.iter().any(|allowed| {
            if allowed == origin {
                return true;
            }
            // Wildcard subdomains: *.voyagevista.app
            if let Some(pattern) = allowed.strip_prefix("*.") {
                if let Some(origin_domain) = origin.strip_prefix("https://") {
                    return origin_domain.ends_with(&format!(".{}", pattern));
                }
            }
            false
        })
    }
}

// ============================================================================
// STORAGE BACKEND
// ============================================================================

/// Where users and trip history live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    #[default]
    Postgres,
    /// Process-local store; data is lost on restart.
    Memory,
}

impl StorageBackend {
    /// Read `VOYAGE_STORAGE` (`postgres` or `memory`, default `postgres`).
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var("VOYAGE_STORAGE") {
            Ok(value) => Self::parse(&value),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_lowercase().as_str() {
            "" | "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" | "in-memory" => Ok(StorageBackend::Memory),
            other => Err(ConfigError::InvalidValue {
                field: "VOYAGE_STORAGE".to_string(),
                value: other.to_string(),
                reason: "expected 'postgres' or 'memory'".to_string(),
            }),
        }
    }
}

// ============================================================================
// PROVIDER CREDENTIALS
// ============================================================================

/// Credentials for the outbound providers.
#[derive(Clone)]
pub struct ProviderSecrets {
    pub gemini_api_key: SecretString,
    pub gemini_base_url: String,
    /// Absent disables weather enrichment.
    pub weather_api_key: Option<SecretString>,
}

impl ProviderSecrets {
    /// Load credentials from the environment.
    ///
    /// - `GEMINI_API_KEY` (required)
    /// - `VOYAGE_GEMINI_BASE_URL` (default: public Gemini endpoint)
    /// - `WEATHER_API_KEY` (optional)
    pub fn from_env() -> Result<Self, ConfigError> {
        let gemini_api_key = non_empty_var("GEMINI_API_KEY").ok_or_else(|| {
            ConfigError::MissingRequired {
                field: "GEMINI_API_KEY".to_string(),
            }
        })?;

        Ok(Self {
            gemini_api_key: SecretString::new(gemini_api_key.into_boxed_str()),
            gemini_base_url: non_empty_var("VOYAGE_GEMINI_BASE_URL")
                .unwrap_or_else(|| GEMINI_DEFAULT_BASE_URL.to_string()),
            weather_api_key: non_empty_var("WEATHER_API_KEY")
                .map(|key| SecretString::new(key.into_boxed_str())),
        })
    }
}

impl std::fmt::Debug for ProviderSecrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSecrets")
            .field("gemini_api_key", &"[REDACTED]")
            .field("gemini_base_url", &self.gemini_base_url)
            .field("weather_api_key", &self.weather_api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::EnvVarGuard;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert!(config.cors_origins.is_empty());
        assert!(!config.cors_allow_credentials);
        assert_eq!(config.cors_max_age_secs, 86400);
    }

    #[test]
    fn test_is_production() {
        let mut config = ApiConfig::default();
        assert!(!config.is_production());

        config.cors_origins = vec!["https://voyagevista.app".to_string()];
        assert!(config.is_production());
    }

    #[test]
    fn test_origin_allowed_dev_mode() {
        let config = ApiConfig::default();
        assert!(config.is_origin_allowed("https://anything.com"));
        assert!(config.is_origin_allowed("http://localhost:5173"));
    }

    #[test]
    fn test_origin_allowed_production() {
        let config = ApiConfig {
            cors_origins: vec![
                "https://voyagevista.app".to_string(),
                "http://localhost:5173".to_string(),
            ],
            ..ApiConfig::default()
        };

        assert!(config.is_origin_allowed("https://voyagevista.app"));
        assert!(config.is_origin_allowed("http://localhost:5173"));
        assert!(!config.is_origin_allowed("https://evil.com"));
    }

    #[test]
    fn test_wildcard_subdomain() {
        let config = ApiConfig {
            cors_origins: vec!["*.voyagevista.app".to_string()],
            ..ApiConfig::default()
        };

        assert!(config.is_origin_allowed("https://www.voyagevista.app"));
        assert!(!config.is_origin_allowed("https://notvoyagevista.app"));
        assert!(!config.is_origin_allowed("http://www.voyagevista.app"));
    }

    #[test]
    fn test_storage_backend_parse() {
        assert_eq!(StorageBackend::parse("memory"), Ok(StorageBackend::Memory));
        assert_eq!(StorageBackend::parse(" Postgres "), Ok(StorageBackend::Postgres));
        assert_eq!(StorageBackend::parse(""), Ok(StorageBackend::Postgres));
        assert!(matches!(
            StorageBackend::parse("mongo"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_provider_secrets_from_env() {
        let _lock = crate::test_support::env_lock();
        let _gemini = EnvVarGuard::set("GEMINI_API_KEY", None);
        assert!(matches!(
            ProviderSecrets::from_env(),
            Err(ConfigError::MissingRequired { .. })
        ));

        let _gemini = EnvVarGuard::set("GEMINI_API_KEY", Some("g-key"));
        let _weather = EnvVarGuard::set("WEATHER_API_KEY", Some("  "));
        let _base = EnvVarGuard::set("VOYAGE_GEMINI_BASE_URL", None);
        let secrets = match ProviderSecrets::from_env() {
            Ok(secrets) => secrets,
            Err(e) => panic!("expected secrets, got {}", e),
        };
        assert!(secrets.weather_api_key.is_none());
        assert_eq!(secrets.gemini_base_url, GEMINI_DEFAULT_BASE_URL);

        let debug = format!("{:?}", secrets);
        assert!(!debug.contains("g-key"));
    }
}
