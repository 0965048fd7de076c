//! Conversation client trait
//!
//! Abstracts the duplex messaging protocol so the relay can be driven
//! against the real HTTP service or an in-process fake in tests. The wire
//! format behind the trait is out of the relay's scope.

use crate::core::RelayResult;

use super::types::{Activity, ActivitySet};

/// Client for the remote agent's polling-based conversation protocol
#[async_trait::async_trait]
pub trait ConversationClient: Send + Sync {
    /// Open a new conversation, returning its identifier
    async fn start_conversation(&self, token: &str) -> RelayResult<String>;

    /// Post one activity into an open conversation
    async fn post_activity(
        &self,
        token: &str,
        conversation_id: &str,
        activity: &Activity,
    ) -> RelayResult<()>;

    /// Fetch all activities since the given watermark.
    ///
    /// `None` means "read from the beginning". The returned set carries the
    /// cursor to resume from; callers adopt it whenever one is reported.
    async fn get_activities(
        &self,
        token: &str,
        conversation_id: &str,
        watermark: Option<&str>,
    ) -> RelayResult<ActivitySet>;
}
