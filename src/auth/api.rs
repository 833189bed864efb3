//! Access Gate API Endpoints
//! Mission: Log sessions in and out against the stored credential list

use crate::{
    auth::models::{LoginRequest, LoginResponse, Session, UserResponse},
    AppState,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use tracing::{info, warn};

/// Login endpoint - POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthApiError> {
    info!("🔐 Login attempt: {}", payload.username);

    // Verbatim (username, password) comparison against the allow-list.
    let user = state
        .store
        .verify_credentials(&payload.username, &payload.password)
        .map_err(|e| {
            warn!("Credential store unreachable: {e:#}");
            AuthApiError::StorageUnavailable
        })?;

    let Some(user) = user else {
        warn!("❌ Failed login attempt: {}", payload.username);
        return Err(AuthApiError::InvalidCredentials);
    };

    let session = state.sessions.log_in(&user.username, user.is_admin);

    info!("✅ Login successful: {}", user.username);

    Ok(Json(LoginResponse {
        token: session.token,
        username: user.username,
        is_admin: user.is_admin,
    }))
}

/// Logout endpoint - POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> StatusCode {
    state.sessions.log_out(&session.token);
    info!("👋 Logged out: {}", session.username().unwrap_or("?"));

    StatusCode::NO_CONTENT
}

/// Current session info - GET /api/auth/me
pub async fn get_current_user(Extension(session): Extension<Session>) -> Json<UserResponse> {
    Json(UserResponse {
        username: session.username().unwrap_or_default().to_string(),
        is_admin: session.is_admin(),
    })
}

/// List stored credentials - GET /api/admin/users (admin only)
pub async fn list_users(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<Vec<UserResponse>>, AuthApiError> {
    if !session.is_admin() {
        return Err(AuthApiError::Forbidden);
    }

    let users = state.store.list_users().map_err(|e| {
        warn!("Credential store unreachable: {e:#}");
        AuthApiError::StorageUnavailable
    })?;

    let response: Vec<UserResponse> = users.iter().map(UserResponse::from_credential).collect();

    Ok(Json(response))
}

/// Auth API errors
#[derive(Debug)]
pub enum AuthApiError {
    InvalidCredentials,
    Forbidden,
    StorageUnavailable,
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthApiError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid username or password")
            }
            AuthApiError::Forbidden => (StatusCode::FORBIDDEN, "Insufficient permissions"),
            AuthApiError::StorageUnavailable => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Credential store unavailable")
            }
        };

        (status, message).into_response()
    }
}
