//! Session state for the relay
//!
//! One session per external conversation id, persisted after every handled
//! turn so the relay resumes instead of restarting after a crash or a
//! duplicate delivery.

pub mod file_store;
pub mod session;
pub mod store;

pub use file_store::FileSessionStore;
pub use session::Session;
pub use store::{InMemorySessionStore, SessionStore};
