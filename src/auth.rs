//! Session-cookie authentication for the admin API: salted password
//! hashes and an in-process session store with a TTL.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Hash format: `hex(salt)$hex(sha256(salt || password))`.
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut salt);
    let digest = salted_digest(&salt, password);
    format!("{}${}", hex::encode(salt), hex::encode(digest))
}

pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt_hex, digest_hex)) = stored.split_once('$') else {
        return false;
    };
    let Ok(salt) = hex::decode(salt_hex) else {
        return false;
    };
    let Ok(expected) = hex::decode(digest_hex) else {
        return false;
    };
    let actual = salted_digest(&salt, password);

    // Length check first, then a full scan to avoid short-circuit timing
    if actual.len() != expected.len() {
        return false;
    }
    actual
        .iter()
        .zip(expected.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

fn salted_digest(salt: &[u8], password: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().to_vec()
}

#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

/// In-process session store. Sessions die with the process, which matches
/// the single-instance deployment model.
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Session>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl_minutes: i64) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    /// Create a session for the user and return the opaque cookie token.
    /// Expired sessions are swept here, so abandoned logins cannot grow
    /// the store without bound.
    pub fn create(&self, user_id: Uuid) -> String {
        let mut token_bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut token_bytes);
        let token = hex::encode(token_bytes);

        let now = Utc::now();
        let mut sessions = self.sessions.lock().unwrap();
        sessions.retain(|_, session| session.expires_at > now);
        sessions.insert(
            token.clone(),
            Session {
                user_id,
                expires_at: Utc::now() + self.ttl,
            },
        );
        token
    }

    /// Resolve a token to its user, dropping the session if it expired.
    pub fn resolve(&self, token: &str) -> Option<Uuid> {
        let mut sessions = self.sessions.lock().unwrap();
        match sessions.get(token) {
            Some(session) if session.expires_at > Utc::now() => Some(session.user_id),
            Some(_) => {
                sessions.remove(token);
                None
            }
            None => None,
        }
    }

    pub fn revoke(&self, token: &str) {
        let mut sessions = self.sessions.lock().unwrap();
        sessions.remove(token);
    }

    /// Number of sessions currently held, expired or not.
    pub fn stored_sessions(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_round_trip() {
        let hash = hash_password("correct horse");
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("wrong horse", &hash));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same");
        let b = hash_password("same");
        assert_ne!(a, b);
        assert!(verify_password("same", &a));
        assert!(verify_password("same", &b));
    }

    #[test]
    fn malformed_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-hash"));
        assert!(!verify_password("anything", "zz$zz"));
    }

    #[test]
    fn sessions_resolve_and_revoke() {
        let store = SessionStore::new(60);
        let user_id = Uuid::new_v4();

        let token = store.create(user_id);
        assert_eq!(store.resolve(&token), Some(user_id));

        store.revoke(&token);
        assert_eq!(store.resolve(&token), None);
    }

    #[test]
    fn expired_sessions_are_dropped() {
        let store = SessionStore::new(-1);
        let token = store.create(Uuid::new_v4());
        assert_eq!(store.resolve(&token), None);
    }

    #[test]
    fn create_sweeps_expired_sessions() {
        let store = SessionStore::new(-1);
        for _ in 0..5 {
            store.create(Uuid::new_v4());
        }
        // Each create drops the previous expired entries before inserting
        assert_eq!(store.stored_sessions(), 1);

        let live = SessionStore::new(60);
        let a = live.create(Uuid::new_v4());
        let b = live.create(Uuid::new_v4());
        assert_eq!(live.stored_sessions(), 2);
        assert!(live.resolve(&a).is_some());
        assert!(live.resolve(&b).is_some());
    }
}
