//! Console channel adapter for the demo binary

pub mod console;

pub use console::Console;
