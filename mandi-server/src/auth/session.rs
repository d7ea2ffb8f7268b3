//! Session revocation set
//!
//! Logout cannot un-sign a JWT, so revoked session IDs are kept in memory
//! until the token they belong to would have expired anyway.

use dashmap::DashMap;

/// Revoked session IDs (jti -> token expiry, unix seconds)
#[derive(Default)]
pub struct RevokedSessions {
    revoked: DashMap<String, i64>,
}

impl RevokedSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn revoke(&self, jti: &str, exp: i64) {
        self.revoked.insert(jti.to_string(), exp);
        self.purge_expired();
    }

    pub fn is_revoked(&self, jti: &str) -> bool {
        self.revoked.contains_key(jti)
    }

    /// Drop entries whose token has expired on its own
    fn purge_expired(&self) {
        let now = chrono::Utc::now().timestamp();
        self.revoked.retain(|_, exp| *exp > now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revocation_is_visible() {
        let sessions = RevokedSessions::new();
        let future = chrono::Utc::now().timestamp() + 3600;

        assert!(!sessions.is_revoked("abc"));
        sessions.revoke("abc", future);
        assert!(sessions.is_revoked("abc"));
        assert!(!sessions.is_revoked("def"));
    }

    #[test]
    fn expired_entries_are_purged() {
        let sessions = RevokedSessions::new();
        let past = chrono::Utc::now().timestamp() - 10;
        let future = chrono::Utc::now().timestamp() + 3600;

        sessions.revoke("old", past);
        // A later revoke triggers the purge
        sessions.revoke("new", future);
        assert!(!sessions.is_revoked("old"));
        assert!(sessions.is_revoked("new"));
    }
}
