//! The turn relay
//!
//! This module provides the relay proper:
//! - `RelayConfig` - immutable configuration (endpoints, cadence, toggles)
//! - `TurnRelay` - the per-turn handler with the reply-draining loop
//! - `SpeechTemplate` - voice/locale markup rendering for replies

pub mod config;
pub mod handler;
pub mod speech;

pub use config::RelayConfig;
pub use handler::{TurnOutcome, TurnRelay};
pub use speech::SpeechTemplate;
