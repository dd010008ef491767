//! Per-browser session storage.
//!
//! Every browser gets an opaque random id in the `jamjump_session` cookie. The
//! id addresses a small key-value map kept in memory by the [`SessionStore`].
//! Handlers receive a [`Session`] handle through the axum extractor and never
//! touch another browser's data.
//!
//! Only ids issued by the store are honoured. A cookie carrying an unknown or
//! idle id is answered with a fresh session and a new cookie.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, request::Parts},
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tokio::sync::Mutex;
use tower_cookies::{Cookie, Cookies, cookie::SameSite};

use crate::utils;

pub const SESSION_COOKIE_NAME: &str = "jamjump_session";

type SessionData = HashMap<String, Value>;

struct SessionEntry {
    data: SessionData,
    last_seen: Instant,
}

impl SessionEntry {
    fn new() -> Self {
        SessionEntry {
            data: SessionData::new(),
            last_seen: Instant::now(),
        }
    }

    fn is_idle(&self, idle_timeout: Duration) -> bool {
        self.last_seen.elapsed() >= idle_timeout
    }
}

/// In-memory sessions keyed by ids this store issued.
///
/// A session that has not been resumed for `idle_timeout` is gone: resuming it
/// fails, and it is evicted the next time a session is created.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<String, SessionEntry>>>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            idle_timeout,
        }
    }

    /// Issues a session under a fresh random id, evicting idle ones.
    pub async fn create(&self) -> Session {
        let id = utils::generate_session_id();
        let mut sessions = self.sessions.lock().await;
        sessions.retain(|_, entry| !entry.is_idle(self.idle_timeout));
        sessions.insert(id.clone(), SessionEntry::new());

        Session {
            id,
            store: self.clone(),
        }
    }

    /// Returns the session for `id` and marks it as seen.
    ///
    /// Ids the store never issued, and sessions idle for too long, yield `None`.
    pub async fn resume(&self, id: &str) -> Option<Session> {
        let mut sessions = self.sessions.lock().await;
        if sessions.get(id)?.is_idle(self.idle_timeout) {
            sessions.remove(id);
            return None;
        }
        if let Some(entry) = sessions.get_mut(id) {
            entry.last_seen = Instant::now();
        }

        Some(Session {
            id: id.to_string(),
            store: self.clone(),
        })
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Handle on one browser's key-value data.
#[derive(Clone)]
pub struct Session {
    id: String,
    store: SessionStore,
}

impl Session {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let sessions = self.store.sessions.lock().await;
        let value = sessions.get(&self.id)?.data.get(key)?.clone();
        serde_json::from_value(value).ok()
    }

    pub async fn insert<T: Serialize>(&self, key: &str, value: &T) -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(value)?;
        self.store
            .sessions
            .lock()
            .await
            .entry(self.id.clone())
            .or_insert_with(SessionEntry::new)
            .data
            .insert(key.to_string(), value);
        Ok(())
    }

    pub async fn remove(&self, key: &str) {
        if let Some(entry) = self.store.sessions.lock().await.get_mut(&self.id) {
            entry.data.remove(key);
        }
    }

    /// Removes `key` and returns what it held.
    pub async fn take<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self
            .store
            .sessions
            .lock()
            .await
            .get_mut(&self.id)?
            .data
            .remove(key)?;
        serde_json::from_value(value).ok()
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.store
            .sessions
            .lock()
            .await
            .get(&self.id)
            .is_some_and(|entry| entry.data.contains_key(key))
    }
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
    SessionStore: FromRef<S>,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let cookies = Cookies::from_request_parts(parts, state).await?;
        let store = SessionStore::from_ref(state);

        let existing = match cookies
            .get(SESSION_COOKIE_NAME)
            .map(|c| c.value().to_string())
            .filter(|id| utils::is_valid_session_id(id))
        {
            Some(id) => store.resume(&id).await,
            None => None,
        };

        match existing {
            Some(session) => Ok(session),
            None => {
                let session = store.create().await;
                cookies.add(build_session_cookie(session.id().to_string()));
                Ok(session)
            }
        }
    }
}

fn build_session_cookie(id: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE_NAME, id);
    cookie.set_path("/");
    cookie.set_http_only(true);
    // Lax keeps the cookie on the top-level redirect back from the provider.
    cookie.set_same_site(SameSite::Lax);
    cookie
}
