// src/auth/sessions.rs
use crate::api::{RemoteAuth, RemoteLogin};
use crate::auth::token::{issue_session_token, TokenHash};
use crate::errors::ServerError;
use crate::store::RecordStore;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// One signed-in dashboard user. Owns the record snapshot for that user.
#[derive(Debug)]
pub struct Session {
    pub remote: RemoteAuth,
    pub full_name: String,
    pub expires_at: i64,
    pub records: RecordStore,
}

pub type SessionHandle = Arc<Mutex<Session>>;

struct Entry {
    expires_at: i64,
    handle: SessionHandle,
}

/// In-memory sessions keyed by the SHA-256 of the cookie token.
pub struct SessionStore {
    ttl_secs: i64,
    sessions: Mutex<HashMap<TokenHash, Entry>>,
}

impl SessionStore {
    pub fn new(ttl_secs: i64) -> Self {
        Self {
            ttl_secs,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    fn map(&self) -> Result<MutexGuard<'_, HashMap<TokenHash, Entry>>, ServerError> {
        self.sessions.lock().map_err(|_| ServerError::InternalError)
    }

    /// Returns the raw token for the cookie; it is never stored.
    pub fn create(&self, login: RemoteLogin, now: i64) -> Result<String, ServerError> {
        let (raw_token, hash) = issue_session_token();
        let expires_at = now + self.ttl_secs;
        let session = Session {
            remote: login.auth,
            full_name: login.full_name,
            expires_at,
            records: RecordStore::new(),
        };

        self.map()?.insert(
            hash,
            Entry {
                expires_at,
                handle: Arc::new(Mutex::new(session)),
            },
        );

        Ok(raw_token)
    }

    /// Live session for `raw_token`. Expired sessions are dropped on sight.
    pub fn load(&self, raw_token: &str, now: i64) -> Result<Option<SessionHandle>, ServerError> {
        let hash = TokenHash::of(raw_token);
        let mut map = self.map()?;

        let Some((expires_at, handle)) = map
            .get(&hash)
            .map(|entry| (entry.expires_at, Arc::clone(&entry.handle)))
        else {
            return Ok(None);
        };

        if expires_at <= now {
            map.remove(&hash);
            return Ok(None);
        }

        Ok(Some(handle))
    }

    pub fn revoke(&self, raw_token: &str) -> Result<bool, ServerError> {
        Ok(self.map()?.remove(&TokenHash::of(raw_token)).is_some())
    }

    pub fn purge_expired(&self, now: i64) -> Result<usize, ServerError> {
        let mut map = self.map()?;
        let before = map.len();
        map.retain(|_, entry| entry.expires_at > now);
        Ok(before - map.len())
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.map().map(|m| m.len()).unwrap_or(0)
    }
}

/// Lock a session for the duration of one request.
pub fn lock_session(handle: &SessionHandle) -> Result<MutexGuard<'_, Session>, ServerError> {
    handle.lock().map_err(|_| ServerError::InternalError)
}
