//! Inbound turn model
//!
//! The calling channel hands the relay one turn at a time. Turns are modeled
//! as an explicit tagged union so the relay logic never depends on a channel
//! SDK's activity schema: classification from the raw activity-type string
//! happens once, at the boundary.

use serde::{Deserialize, Serialize};

/// What kind of turn the calling channel delivered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TurnKind {
    /// The channel opened a new conversation with the end user
    ConversationStarted,

    /// The end user sent a message
    Message {
        /// Raw message text as received from the channel
        text: String,
    },

    /// Any other activity type (typing indicators, membership events, ...)
    Other {
        /// Raw activity-type name, kept for logging
        name: String,
    },
}

impl TurnKind {
    /// Classify a raw activity-type string into a turn kind.
    ///
    /// Pure function: "message" with text becomes [`TurnKind::Message`],
    /// "conversationUpdate" becomes [`TurnKind::ConversationStarted`], and
    /// everything else is carried through as [`TurnKind::Other`].
    pub fn classify(activity_type: &str, text: Option<&str>) -> Self {
        match activity_type {
            "message" => TurnKind::Message {
                text: text.unwrap_or_default().to_string(),
            },
            "conversationUpdate" => TurnKind::ConversationStarted,
            other => TurnKind::Other {
                name: other.to_string(),
            },
        }
    }

    /// Check if this is a message turn
    pub fn is_message(&self) -> bool {
        matches!(self, TurnKind::Message { .. })
    }
}

/// One inbound turn from the calling channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundTurn {
    /// Stable conversation identifier assigned by the calling channel;
    /// primary key for session state
    pub conversation_id: String,

    /// What the turn carries
    pub kind: TurnKind,
}

impl InboundTurn {
    /// Create a message turn
    pub fn message(conversation_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            kind: TurnKind::Message { text: text.into() },
        }
    }

    /// Create a conversation-started turn
    pub fn conversation_started(conversation_id: impl Into<String>) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            kind: TurnKind::ConversationStarted,
        }
    }

    /// Create a turn for any other activity type
    pub fn other(conversation_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            kind: TurnKind::Other { name: name.into() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_message() {
        let kind = TurnKind::classify("message", Some("hello"));
        assert_eq!(
            kind,
            TurnKind::Message {
                text: "hello".into()
            }
        );
        assert!(kind.is_message());
    }

    #[test]
    fn test_classify_message_without_text() {
        let kind = TurnKind::classify("message", None);
        assert_eq!(kind, TurnKind::Message { text: String::new() });
    }

    #[test]
    fn test_classify_conversation_update() {
        let kind = TurnKind::classify("conversationUpdate", None);
        assert_eq!(kind, TurnKind::ConversationStarted);
        assert!(!kind.is_message());
    }

    #[test]
    fn test_classify_other() {
        let kind = TurnKind::classify("typing", None);
        assert_eq!(kind, TurnKind::Other { name: "typing".into() });
    }

    #[test]
    fn test_turn_constructors() {
        let turn = InboundTurn::message("conv-1", "hi");
        assert_eq!(turn.conversation_id, "conv-1");
        assert!(turn.kind.is_message());

        let turn = InboundTurn::conversation_started("conv-2");
        assert_eq!(turn.kind, TurnKind::ConversationStarted);
    }
}
