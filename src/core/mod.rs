//! Core types for the relay
//!
//! This module provides the fundamental types used throughout the crate:
//! - `InboundTurn` / `TurnKind` - what the calling channel delivered
//! - `Reply` / `ReplySink` - what goes back to the calling channel
//! - `RelayError` - error types

pub mod error;
pub mod reply;
pub mod turn;

pub use error::{RelayError, RelayResult};
pub use reply::{Reply, ReplySink};
pub use turn::{InboundTurn, TurnKind};
