//! Remote agent integration
//!
//! Everything needed to reach the remote conversational agent:
//! - `TokenProvider` / `HttpTokenClient` - session token acquisition
//! - `ConversationClient` / `HttpConversationClient` - the duplex
//!   conversation protocol (start, post, poll since watermark)
//! - wire types for activities and activity sets

pub mod client;
pub mod http;
pub mod token;
pub mod types;

pub use client::ConversationClient;
pub use http::HttpConversationClient;
pub use token::{HttpTokenClient, TokenProvider};
pub use types::{Activity, ActivitySet, ChannelAccount, ChannelData, Conversation};
