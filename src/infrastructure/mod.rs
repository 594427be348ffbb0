//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - HTTP: REST API routes for the game client and operator panel
//! - Oracle: OpenAI-compatible LLM client
//! - Config: Application configuration
//! - State: Shared application state

pub mod config;
pub mod http;
pub mod oracle;
pub mod state;
