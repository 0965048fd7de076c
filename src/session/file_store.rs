//! On-disk session store
//!
//! Persists one pretty-printed JSON file per external conversation id under
//! a base directory. Suits a single relay process; deletion and expiry are
//! an operator concern, not the relay's.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use crate::core::RelayResult;

use super::session::Session;
use super::store::SessionStore;

/// Default directory for session storage
const SESSIONS_DIR: &str = "sessions";

/// File-backed session store
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    base_dir: PathBuf,
}

impl FileSessionStore {
    /// Create a store under the default directory
    pub fn new() -> Self {
        Self {
            base_dir: PathBuf::from(SESSIONS_DIR),
        }
    }

    /// Create a store under a custom directory
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: dir.into(),
        }
    }

    /// Path of the file holding one conversation's session
    pub fn session_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", key))
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn read_one(&self, key: &str) -> RelayResult<Option<Session>> {
        let path = self.session_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let file = File::open(&path)?;
        let reader = BufReader::new(file);
        let session: Session = serde_json::from_reader(reader)?;

        Ok(Some(session))
    }
}

impl Default for FileSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SessionStore for FileSessionStore {
    async fn read(&self, keys: &[String]) -> RelayResult<HashMap<String, Session>> {
        let mut map = HashMap::new();
        for key in keys {
            if let Some(session) = self.read_one(key)? {
                map.insert(key.clone(), session);
            }
        }
        Ok(map)
    }

    async fn write(&self, key: &str, session: &Session) -> RelayResult<()> {
        if !self.base_dir.exists() {
            fs::create_dir_all(&self.base_dir)?;
        }

        let file = File::create(self.session_path(key))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, session)?;

        Ok(())
    }
}
