//! User Directory terminal application
//!
//! Browses a remote user directory from the terminal: one-shot commands
//! print a single page, `browse` starts an interactive session.
//!
//! This library exposes the application components for testing purposes.

pub mod config;
pub mod error;
pub mod routes;
pub mod session;
pub mod views;

// Re-export commonly used types for convenience
pub use config::AppConfig;
pub use error::{AppError, ConfigError, Result};
pub use routes::Route;
pub use session::{Command, Session, SessionOptions};
