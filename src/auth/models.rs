//! Access Gate Models
//! Mission: Define credential and session data structures

use serde::{Deserialize, Serialize};

/// Stored credential row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String, // stored verbatim - never serialize
    pub is_admin: bool,
}

/// Login state of one session. The only transitions are an explicit login
/// and an explicit logout; sessions never expire on their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn { username: String, is_admin: bool },
}

/// The session object handed to every protected handler.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub state: SessionState,
}

impl Session {
    /// Fresh anonymous session for `token`.
    pub fn new(token: String) -> Self {
        Self {
            token,
            state: SessionState::LoggedOut,
        }
    }

    /// LoggedOut -> LoggedIn. Logging in again just replaces the identity.
    pub fn log_in(&mut self, username: &str, is_admin: bool) {
        self.state = SessionState::LoggedIn {
            username: username.to_string(),
            is_admin,
        };
    }

    /// LoggedIn -> LoggedOut.
    pub fn log_out(&mut self) {
        self.state = SessionState::LoggedOut;
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self.state, SessionState::LoggedIn { .. })
    }

    pub fn username(&self) -> Option<&str> {
        match &self.state {
            SessionState::LoggedIn { username, .. } => Some(username),
            SessionState::LoggedOut => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(
            self.state,
            SessionState::LoggedIn { is_admin: true, .. }
        )
    }
}

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub is_admin: bool,
}

/// Credential response (sanitized)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub username: String,
    pub is_admin: bool,
}

impl UserResponse {
    pub fn from_credential(user: &Credential) -> Self {
        Self {
            username: user.username.clone(),
            is_admin: user.is_admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_state_machine() {
        let mut session = Session::new("token-1".to_string());
        assert!(!session.is_logged_in());
        assert_eq!(session.username(), None);
        assert!(!session.is_admin());

        session.log_in("admin", true);
        assert!(session.is_logged_in());
        assert_eq!(session.username(), Some("admin"));
        assert!(session.is_admin());

        session.log_out();
        assert!(!session.is_logged_in());
        assert_eq!(session.username(), None);
        assert!(!session.is_admin());
    }

    #[test]
    fn test_non_admin_session() {
        let mut session = Session::new("token-2".to_string());
        session.log_in("viewer", false);

        assert!(session.is_logged_in());
        assert!(!session.is_admin());
    }

    #[test]
    fn test_credential_never_serializes_password() {
        let user = Credential {
            id: 1,
            username: "admin".to_string(),
            password: "admin123".to_string(),
            is_admin: true,
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("admin123"));
        assert!(!json.contains("password"));
    }
}
