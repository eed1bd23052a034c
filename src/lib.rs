//! Snaplink - a minimal in-memory URL shortener
//!
//! Accepts a long URL, hands back a short one, and redirects visitors while
//! recording each visit in the background.
//!
//! # Architecture
//! - `utils`: short id generation and target URL normalization
//! - `storage`: the `LinkStore` trait and its in-memory implementation
//! - `api`: HTTP routes, handlers and middleware
//! - `config`: layered static configuration and CLI arguments
//! - `runtime`: server startup and graceful shutdown
//! - `system`: logging and panic reporting

pub mod api;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod storage;
pub mod system;
pub mod utils;
