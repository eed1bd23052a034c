//! Execution modes
//!
//! Only the HTTP server mode exists; the binary always runs it.

pub mod server;

pub use server::run_server;
