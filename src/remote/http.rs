//! HTTP implementation of the conversation client
//!
//! Talks to the remote messaging service's REST surface with bearer auth:
//!
//! - `POST {base}/conversations` - open a conversation
//! - `POST {base}/conversations/{id}/activities` - post an activity
//! - `GET  {base}/conversations/{id}/activities?watermark={w}` - poll
//!
//! Errors quote the response status and body; no retry happens at this
//! layer (failures surface on the per-turn error path).

use reqwest::Client;

use crate::core::{RelayError, RelayResult};

use super::client::ConversationClient;
use super::types::{Activity, ActivitySet, Conversation};

/// HTTP conversation client
pub struct HttpConversationClient {
    client: Client,
    base_url: String,
}

impl HttpConversationClient {
    /// Create a client for the given messaging base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Build the URL for the conversations collection
    fn conversations_url(&self) -> String {
        format!("{}/conversations", self.base_url)
    }

    /// Build the activities URL for one conversation
    fn activities_url(&self, conversation_id: &str) -> String {
        format!("{}/conversations/{}/activities", self.base_url, conversation_id)
    }

    /// Read the response, mapping non-success statuses to errors
    async fn read_body(response: reqwest::Response) -> RelayResult<String> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!("[Remote] Service error: {} - {}", status, body);
            return Err(RelayError::RemoteStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}

#[async_trait::async_trait]
impl ConversationClient for HttpConversationClient {
    async fn start_conversation(&self, token: &str) -> RelayResult<String> {
        let url = self.conversations_url();
        tracing::debug!("[Remote] Starting conversation: POST {}", url);

        let response = self.client.post(&url).bearer_auth(token).send().await?;
        let body = Self::read_body(response).await?;

        let conversation: Conversation = serde_json::from_str(&body)?;

        tracing::info!(
            "[Remote] Conversation started: {}",
            conversation.conversation_id
        );

        Ok(conversation.conversation_id)
    }

    async fn post_activity(
        &self,
        token: &str,
        conversation_id: &str,
        activity: &Activity,
    ) -> RelayResult<()> {
        let url = self.activities_url(conversation_id);
        tracing::debug!("[Remote] Posting activity: POST {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(activity)
            .send()
            .await?;

        Self::read_body(response).await?;

        Ok(())
    }

    async fn get_activities(
        &self,
        token: &str,
        conversation_id: &str,
        watermark: Option<&str>,
    ) -> RelayResult<ActivitySet> {
        let url = self.activities_url(conversation_id);

        let mut request = self.client.get(&url).bearer_auth(token);
        if let Some(w) = watermark {
            request = request.query(&[("watermark", w)]);
        }

        let response = request.send().await?;
        let body = Self::read_body(response).await?;

        let set: ActivitySet = serde_json::from_str(&body)?;

        tracing::trace!(
            "[Remote] Polled {} activities, watermark {:?}",
            set.activities.as_ref().map(|a| a.len()).unwrap_or(0),
            set.watermark
        );

        Ok(set)
    }
}
