//! Session Registry
//! Mission: Track which bearer tokens belong to logged-in sessions

use crate::auth::models::Session;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

/// In-memory token registry. Tokens are opaque UUIDs handed out at login;
/// a token resolves until its session is explicitly logged out, there is
/// no expiry. Restarting the process logs everyone out.
#[derive(Default)]
pub struct SessionManager {
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a logged-in session for an authenticated user and hand back the
    /// session carrying its fresh token.
    pub fn log_in(&self, username: &str, is_admin: bool) -> Session {
        let token = Uuid::new_v4().to_string();
        let mut session = Session::new(token.clone());
        session.log_in(username, is_admin);

        self.sessions.write().insert(token, session.clone());
        debug!("Session opened for {}", username);

        session
    }

    /// Resolve a bearer token to its session.
    pub fn resolve(&self, token: &str) -> Option<Session> {
        self.sessions.read().get(token).cloned()
    }

    /// Log the session behind `token` out and forget the token. Returns
    /// false when the token was not logged in to begin with.
    pub fn log_out(&self, token: &str) -> bool {
        match self.sessions.write().remove(token) {
            Some(mut session) => {
                debug!("Session closed for {}", session.username().unwrap_or("?"));
                session.log_out();
                true
            }
            None => false,
        }
    }

    pub fn active_count(&self) -> usize {
        self.sessions.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_issues_resolvable_token() {
        let manager = SessionManager::new();

        let session = manager.log_in("admin", true);
        assert!(session.is_logged_in());
        assert_eq!(manager.active_count(), 1);

        let resolved = manager.resolve(&session.token).unwrap();
        assert_eq!(resolved.username(), Some("admin"));
        assert!(resolved.is_admin());
    }

    #[test]
    fn test_tokens_are_unique_per_login() {
        let manager = SessionManager::new();

        let first = manager.log_in("admin", true);
        let second = manager.log_in("admin", true);

        assert_ne!(first.token, second.token);
        assert_eq!(manager.active_count(), 2);
    }

    #[test]
    fn test_logout_invalidates_token() {
        let manager = SessionManager::new();

        let session = manager.log_in("admin", true);
        assert!(manager.log_out(&session.token));

        assert!(manager.resolve(&session.token).is_none());
        assert_eq!(manager.active_count(), 0);
    }

    #[test]
    fn test_logout_of_unknown_token_is_harmless() {
        let manager = SessionManager::new();

        assert!(!manager.log_out("no-such-token"));

        let session = manager.log_in("admin", true);
        assert!(manager.log_out(&session.token));
        // Logging out twice is a no-op, not an error.
        assert!(!manager.log_out(&session.token));
    }

    #[test]
    fn test_unknown_token_does_not_resolve() {
        let manager = SessionManager::new();
        manager.log_in("admin", true);

        assert!(manager.resolve("forged-token").is_none());
    }
}
