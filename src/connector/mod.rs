//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Chat clients (OpenAI, Anthropic, mock)
//! - Catalog loading (CSV)
//! - Response caching (in-memory, TTL)
//! - Candidate filters
//! - CLI wiring (container, controllers, router)

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::*;
