use crate::service::token_service::generate_token;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 4;

const DEFAULT_USERS: [(&str, &str); 2] = [("admin", "admin123"), ("user", "user123")];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("username must be at least 3 chars and password at least 4")]
    TooShort,
    #[error("username already exists")]
    AlreadyExists,
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("unauthorized")]
    Unauthorized,
    #[error("session store lock poisoned")]
    LockPoisoned,
}

/// Credentials and live sessions for the lifetime of the process.
///
/// Both maps sit behind one reader/writer lock. No method calls another while
/// holding it, and nothing outside this type ever sees the guard.
#[derive(Debug)]
pub struct SessionStore {
    inner: RwLock<SessionStoreInner>,
}

#[derive(Debug, Default)]
struct SessionStoreInner {
    // username -> password
    credentials: HashMap<String, String>,
    // token -> username
    sessions: HashMap<String, String>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_default_users()
    }
}

impl SessionStore {
    pub fn empty() -> Self {
        Self {
            inner: RwLock::new(SessionStoreInner::default()),
        }
    }

    pub fn with_default_users() -> Self {
        let credentials = DEFAULT_USERS
            .iter()
            .map(|(u, p)| (u.to_string(), p.to_string()))
            .collect();
        Self {
            inner: RwLock::new(SessionStoreInner {
                credentials,
                sessions: HashMap::new(),
            }),
        }
    }

    pub fn register(&self, username: &str, password: &str) -> Result<(), AuthError> {
        // byte lengths: "éa" meets the three-char minimum
        if username.len() < MIN_USERNAME_LEN || password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::TooShort);
        }

        let mut inner = self.write()?;
        if inner.credentials.contains_key(username) {
            return Err(AuthError::AlreadyExists);
        }
        inner
            .credentials
            .insert(username.to_string(), password.to_string());
        Ok(())
    }

    /// Every successful call mints a fresh token; earlier tokens for the same
    /// user stay valid.
    pub fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let token = generate_token();
        let mut inner = self.write()?;
        match inner.credentials.get(username) {
            Some(stored) if stored == password => {}
            _ => return Err(AuthError::InvalidCredentials),
        }
        inner.sessions.insert(token.clone(), username.to_string());
        Ok(token)
    }

    pub fn logout(&self, token: &str) -> Result<(), AuthError> {
        let mut inner = self.write()?;
        inner.sessions.remove(token);
        Ok(())
    }

    pub fn authenticate(&self, token: &str) -> Result<String, AuthError> {
        if token.is_empty() {
            return Err(AuthError::Unauthorized);
        }
        let inner = self.read()?;
        inner
            .sessions
            .get(token)
            .cloned()
            .ok_or(AuthError::Unauthorized)
    }

    pub fn session_count(&self) -> Result<usize, AuthError> {
        Ok(self.read()?.sessions.len())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, SessionStoreInner>, AuthError> {
        self.inner.read().map_err(|_| AuthError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, SessionStoreInner>, AuthError> {
        self.inner.write().map_err(|_| AuthError::LockPoisoned)
    }
}
