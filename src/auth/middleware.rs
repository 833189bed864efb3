//! Session Middleware
//! Mission: Gate data endpoints behind a logged-in session

use crate::auth::sessions::SessionManager;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Middleware that resolves the bearer token to a logged-in session and
/// hands the session object to the downstream handler via extensions.
pub async fn session_middleware(
    State(sessions): State<Arc<SessionManager>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    // Authorization header (Bearer ...)
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|t| t.to_string())
        .ok_or(AuthError::MissingToken)?;

    let session = sessions.resolve(&token).ok_or(AuthError::NotLoggedIn)?;

    req.extensions_mut().insert(session);

    Ok(next.run(req).await)
}

/// Auth error types
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    NotLoggedIn,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "Missing authorization token"),
            AuthError::NotLoggedIn => (StatusCode::UNAUTHORIZED, "Session is not logged in"),
        };

        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::Session;
    use axum::{body::Body, http::Request as HttpRequest};

    #[test]
    fn test_auth_error_responses() {
        let missing = AuthError::MissingToken.into_response();
        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

        let logged_out = AuthError::NotLoggedIn.into_response();
        assert_eq!(logged_out.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_session_rides_request_extensions() {
        let mut req = HttpRequest::new(Body::empty());
        assert!(req.extensions().get::<Session>().is_none());

        let mut session = Session::new("token-1".to_string());
        session.log_in("admin", true);
        req.extensions_mut().insert(session);

        let stored = req.extensions().get::<Session>().unwrap();
        assert_eq!(stored.username(), Some("admin"));
    }
}
