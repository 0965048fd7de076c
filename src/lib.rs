pub mod core;
pub mod relay;
pub mod remote;
pub mod session;

// Optional components
pub mod cli;
pub mod logging;
