//! Wire types for the duplex messaging protocol
//!
//! The remote agent is reached over a polling-based conversation protocol:
//! open a conversation, post activities into it, and page through the reply
//! stream with an opaque watermark. These types mirror that wire format;
//! fields the service may omit are `Option` and skipped on serialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Activity type string for chat messages
pub const ACTIVITY_TYPE_MESSAGE: &str = "message";

/// A participant in a remote conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelAccount {
    /// Stable account id
    pub id: String,
    /// Display name; reply filtering matches on this
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ChannelAccount {
    /// Create an account with id and display name
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
        }
    }
}

/// Channel-specific metadata forwarded with every relayed message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bot_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
}

/// One activity on the remote conversation's stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Activity type ("message", "typing", ...)
    #[serde(rename = "type")]
    pub activity_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<ChannelAccount>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub speak: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_hint: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_data: Option<ChannelData>,
}

impl Activity {
    /// Build an outbound message activity from the relay's sender identity
    pub fn message(from: ChannelAccount, text: impl Into<String>) -> Self {
        Self {
            activity_type: ACTIVITY_TYPE_MESSAGE.to_string(),
            id: Some(uuid::Uuid::new_v4().to_string()),
            timestamp: Some(Utc::now()),
            from: Some(from),
            text: Some(text.into()),
            speak: None,
            input_hint: None,
            text_format: Some("plain".to_string()),
            locale: None,
            channel_data: None,
        }
    }

    /// Attach channel metadata
    pub fn with_channel_data(mut self, channel_data: ChannelData) -> Self {
        self.channel_data = Some(channel_data);
        self
    }

    /// Set the locale
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Check if this is a message activity
    pub fn is_message(&self) -> bool {
        self.activity_type == ACTIVITY_TYPE_MESSAGE
    }

    /// Sender display name, if the activity carries one
    pub fn sender_name(&self) -> Option<&str> {
        self.from.as_ref().and_then(|f| f.name.as_deref())
    }
}

/// One page of the remote conversation's activity stream
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySet {
    /// Activities since the requested watermark; the service may omit the
    /// list entirely, which is an empty result rather than an error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activities: Option<Vec<Activity>>,

    /// Cursor marking the last delivered activity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watermark: Option<String>,
}

impl ActivitySet {
    /// Message activities sent by the named remote agent.
    ///
    /// Excludes echoes of the relay's own forwarded messages (different
    /// sender) and non-message system activities.
    pub fn agent_messages(&self, agent_name: &str) -> Vec<&Activity> {
        self.activities
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter(|a| a.is_message() && a.sender_name() == Some(agent_name))
            .collect()
    }
}

/// Response to opening a remote conversation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// Identifier for the newly opened conversation
    pub conversation_id: String,
}
