//! Account REST API Routes
//!
//! Signup, login, profile reads and updates, and trip statistics. Profile
//! fields are open-ended: anything in a signup or update body other than the
//! reserved keys is stored as-is.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use voyage_core::{profile_fields, NewUser, UserRecord, UserStats};
use voyage_storage::UserStore;

use crate::{
    credentials::{hash_password, verify_password},
    error::{ApiError, ApiResult},
    state::AppState,
};

// ============================================================================
// TYPES
// ============================================================================

/// Acknowledgement for account mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    fn ok(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }
}

/// Login credentials.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Trip statistics for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StatsResponse {
    pub success: bool,
    pub stats: UserStats,
}

fn required_text(value: Option<&Value>, field: &str) -> ApiResult<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ApiError::missing_field(field))
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// POST /signup - Create an account
#[utoipa::path(
    post,
    path = "/signup",
    tag = "Accounts",
    request_body(content = Object, description = "`email`, `password` and any profile fields"),
    responses(
        (status = 200, description = "Account created", body = MessageResponse),
        (status = 400, description = "Missing email or password", body = ApiError),
        (status = 409, description = "Email already registered", body = ApiError),
    ),
)]
pub async fn signup(
    State(users): State<Arc<dyn UserStore>>,
    Json(body): Json<Map<String, Value>>,
) -> ApiResult<Json<MessageResponse>> {
    let email = required_text(body.get("email"), "email")?;
    let password = required_text(body.get("password"), "password")?;

    let user = NewUser {
        email,
        credential: hash_password(&password)?,
        profile: profile_fields(body),
        created_at: Utc::now(),
    };
    users.user_insert(user).await?;

    tracing::info!("User signed up");
    Ok(Json(MessageResponse::ok("Signup successful")))
}

/// POST /login - Check credentials
#[utoipa::path(
    post,
    path = "/login",
    tag = "Accounts",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = MessageResponse),
        (status = 400, description = "Missing email or password", body = ApiError),
        (status = 401, description = "Wrong password", body = ApiError),
        (status = 404, description = "Unknown user", body = ApiError),
    ),
)]
pub async fn login(
    State(users): State<Arc<dyn UserStore>>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let email = body
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ApiError::missing_field("email"))?;
    let password = body
        .password
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::missing_field("password"))?;

    let stored = users
        .credential_get(email)
        .await?
        .ok_or_else(ApiError::user_not_found)?;

    if !verify_password(password, &stored) {
        tracing::debug!("Login rejected");
        return Err(ApiError::invalid_credentials());
    }

    Ok(Json(MessageResponse::ok("Login successful")))
}

/// GET /user/{email} - Get a user without the credential
#[utoipa::path(
    get,
    path = "/user/{email}",
    tag = "Accounts",
    params(("email" = String, Path, description = "Account email")),
    responses(
        (
            status = 200,
            description = "User record with profile fields and trip history",
            body = Object
        ),
        (status = 404, description = "Unknown user", body = ApiError),
    ),
)]
pub async fn get_user(
    State(users): State<Arc<dyn UserStore>>,
    Path(email): Path<String>,
) -> ApiResult<Json<UserRecord>> {
    let user = users
        .user_get(&email)
        .await?
        .ok_or_else(ApiError::user_not_found)?;
    Ok(Json(user))
}

/// POST /user/update - Merge profile fields
#[utoipa::path(
    post,
    path = "/user/update",
    tag = "Accounts",
    request_body(content = Object, description = "`email` plus the profile fields to set"),
    responses(
        (status = 200, description = "Profile updated", body = MessageResponse),
        (status = 400, description = "Missing email", body = ApiError),
        (status = 404, description = "Unknown user", body = ApiError),
    ),
)]
pub async fn update_user(
    State(users): State<Arc<dyn UserStore>>,
    Json(body): Json<Map<String, Value>>,
) -> ApiResult<Json<MessageResponse>> {
    let email = required_text(body.get("email"), "email")?;
    let fields = profile_fields(body);

    if !users.profile_update(&email, fields).await? {
        return Err(ApiError::user_not_found());
    }

    Ok(Json(MessageResponse::ok("Profile updated successfully")))
}

/// GET /user/stats/{email} - Trip statistics
#[utoipa::path(
    get,
    path = "/user/stats/{email}",
    tag = "Accounts",
    params(("email" = String, Path, description = "Account email")),
    responses(
        (status = 200, description = "Statistics over the full trip history", body = StatsResponse),
        (status = 404, description = "Unknown user", body = ApiError),
    ),
)]
pub async fn user_stats(
    State(users): State<Arc<dyn UserStore>>,
    Path(email): Path<String>,
) -> ApiResult<Json<StatsResponse>> {
    let user = users
        .user_get(&email)
        .await?
        .ok_or_else(ApiError::user_not_found)?;

    Ok(Json(StatsResponse {
        success: true,
        stats: UserStats::from_history(&user.itinerary_history),
    }))
}

// ============================================================================
// ROUTER
// ============================================================================

/// Create the account router. `/user-stats/:email` is kept as an alias of
/// `/user/stats/:email`.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/user/update", post(update_user))
        .route("/user/stats/:email", get(user_stats))
        .route("/user-stats/:email", get(user_stats))
        .route("/user/:email", get(get_user))
}
