//! Voyage API Server Entry Point
//!
//! Bootstraps configuration, wires storage and providers, and starts the
//! Axum HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use secrecy::ExposeSecret;
use voyage_api::{
    create_api_router, telemetry::init_tracing, ApiConfig, ApiError, ApiResult, AppState,
    DbClient, DbConfig, ProviderSecrets, StorageBackend,
};
use voyage_core::{GenerationConfig, WeatherConfig};
use voyage_llm::{GeminiClient, GeminiGenerationProvider, GenerationClient};
use voyage_storage::InMemoryStore;
use voyage_weather::{OpenWeatherProvider, WeatherLookup};

#[tokio::main]
async fn main() -> ApiResult<()> {
    init_tracing()?;

    let api_config = ApiConfig::from_env();
    let secrets = ProviderSecrets::from_env()?;
    let backend = StorageBackend::from_env()?;

    let weather = build_weather_lookup(&secrets)?;
    let generator = build_generation_client(&secrets);

    let state = match backend {
        StorageBackend::Postgres => {
            let db_config = DbConfig::from_env();
            tracing::info!(
                host = %db_config.host,
                port = db_config.port,
                dbname = %db_config.dbname,
                pool_size = db_config.max_size,
                "Connecting to PostgreSQL"
            );
            let db = DbClient::from_config(&db_config)?;
            db.ensure_schema().await?;
            AppState::new(Arc::new(db), weather, generator)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            AppState::new(Arc::new(InMemoryStore::new()), weather, generator)
        }
    };

    let app = create_api_router(state, &api_config);

    let addr = resolve_bind_addr()?;
    tracing::info!(%addr, "Starting Voyage API server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result.map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

fn build_weather_lookup(secrets: &ProviderSecrets) -> ApiResult<WeatherLookup> {
    let Some(api_key) = secrets.weather_api_key.as_ref() else {
        tracing::warn!("WEATHER_API_KEY not set; itineraries will not include weather");
        return Ok(WeatherLookup::disabled());
    };

    let config = WeatherConfig::from_env();
    let provider = OpenWeatherProvider::new(api_key.expose_secret(), &config).map_err(|e| {
        ApiError::internal_error(format!("Failed to build weather provider: {}", e))
    })?;

    Ok(WeatherLookup::new(Arc::new(provider), config.effective_timeout()))
}

fn build_generation_client(secrets: &ProviderSecrets) -> GenerationClient {
    let config = GenerationConfig::from_env();
    let client = GeminiClient::with_base_url(
        secrets.gemini_api_key.expose_secret(),
        secrets.gemini_base_url.clone(),
    );
    let provider = GeminiGenerationProvider::new(client, &config);

    tracing::info!(model = %config.model, "Generation provider configured");
    GenerationClient::from_config(Arc::new(provider), &config)
}

fn resolve_bind_addr() -> ApiResult<SocketAddr> {
    let host = std::env::var("VOYAGE_API_BIND").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port_str = std::env::var("PORT")
        .ok()
        .or_else(|| std::env::var("VOYAGE_API_PORT").ok())
        .unwrap_or_else(|| "8000".to_string());
    let port = port_str.parse::<u16>().map_err(|_| {
        ApiError::invalid_input(format!("Invalid port value: {}", port_str))
    })?;

    let addr = format!("{}:{}", host, port);
    addr.parse::<SocketAddr>().map_err(|e| {
        ApiError::invalid_input(format!("Invalid bind address {}: {}", addr, e))
    })
}
