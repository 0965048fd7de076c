//! Per-conversation session record
//!
//! One `Session` exists per external conversation id. It caches the remote
//! session token, the remote conversation id, and the watermark into the
//! remote activity stream, so a later turn (or a retry after a crash)
//! resumes instead of starting over.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted relay state for one external conversation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque credential for the remote messaging endpoint; fetched at most
    /// once per session lifetime
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Remote conversation id; `None` means not yet started. Set exactly
    /// once, never reset while the session exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,

    /// Opaque cursor into the remote activity stream; `None` means read
    /// from the beginning. Always the latest value the service reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watermark: Option<String>,

    /// When this record was last persisted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Create an empty session (no token, no remote conversation)
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether the remote conversation has been opened
    pub fn has_conversation(&self) -> bool {
        self.conversation_id.is_some()
    }

    /// Check whether a session token has been fetched
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Stamp the record before persisting
    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}
