//! Outbound replies and the delivery seam
//!
//! The relay never talks to the end user directly. It hands batches of
//! [`Reply`] values to a [`ReplySink`] supplied by the calling channel -
//! a console, a webhook, a test recorder.

use serde::{Deserialize, Serialize};

use super::error::RelayResult;

/// One reply activity for the calling channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    /// Display text
    pub text: String,

    /// Speech-markup rendering of the text, when the relay produced one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speak: Option<String>,

    /// Whether the channel should prompt the user for further input
    pub expects_input: bool,
}

impl Reply {
    /// Create a plain text reply
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            speak: None,
            expects_input: false,
        }
    }

    /// Attach a speech-markup rendering
    pub fn with_speak(mut self, speak: impl Into<String>) -> Self {
        self.speak = Some(speak.into());
        self
    }

    /// Mark the reply as expecting further user input
    pub fn expecting_input(mut self) -> Self {
        self.expects_input = true;
        self
    }
}

/// Delivery seam to the calling channel.
///
/// Each drain cycle that produced replies delivers them as one batch;
/// error reports arrive as a single-reply batch.
#[async_trait::async_trait]
pub trait ReplySink: Send + Sync {
    /// Deliver a batch of replies to the end user
    async fn deliver(&self, replies: Vec<Reply>) -> RelayResult<()>;
}
