//! Server Setup Module
//!
//! Server configuration, shared application state, and router assembly.

/// Environment-driven configuration
pub mod config;

/// Application initialization and router assembly
pub mod init;

/// Shared application state
pub mod state;

pub use config::ServerConfig;
pub use init::create_app;
pub use state::AppState;
