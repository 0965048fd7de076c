//! Session store seam and the in-memory implementation
//!
//! A key-value interface over [`Session`] records, keyed by external
//! conversation id. Last-write-wins; no transactional guarantees. Stores
//! must tolerate concurrent access from independent sessions.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::core::RelayResult;

use super::session::Session;

/// Key-value store for per-conversation session state
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    /// Read the sessions for the given keys; absent keys are simply missing
    /// from the returned map
    async fn read(&self, keys: &[String]) -> RelayResult<HashMap<String, Session>>;

    /// Write one session record, replacing any previous value
    async fn write(&self, key: &str, session: &Session) -> RelayResult<()>;

    /// Read a single session
    async fn load(&self, key: &str) -> RelayResult<Option<Session>> {
        let mut map = self.read(std::slice::from_ref(&key.to_string())).await?;
        Ok(map.remove(key))
    }
}

/// In-memory session store
///
/// Cheap default for tests and single-process deployments; state is lost on
/// restart.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: Arc<Mutex<HashMap<String, Session>>>,
}

impl InMemorySessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// Check whether the store is empty
    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }
}

#[async_trait::async_trait]
impl SessionStore for InMemorySessionStore {
    async fn read(&self, keys: &[String]) -> RelayResult<HashMap<String, Session>> {
        let sessions = self.sessions.lock().await;
        Ok(keys
            .iter()
            .filter_map(|k| sessions.get(k).map(|s| (k.clone(), s.clone())))
            .collect())
    }

    async fn write(&self, key: &str, session: &Session) -> RelayResult<()> {
        self.sessions
            .lock()
            .await
            .insert(key.to_string(), session.clone());
        Ok(())
    }
}
