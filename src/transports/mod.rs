//! Built-in transports
//!
//! The compliance core only requires the [`Transport`](crate::core::Transport)
//! contract; these implementations cover the common cases of JSON lines on
//! stdout and in-memory capture for tests and tooling.

pub mod console;
pub mod memory;

pub use console::ConsoleTransport;
pub use memory::MemoryTransport;
