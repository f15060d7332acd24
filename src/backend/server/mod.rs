//! Server Module
//!
//! Server bootstrap: configuration, application state, and initialization.
//!
//! - **`config`** - Environment-driven configuration
//! - **`state`** - `AppState` and `FromRef` extraction
//! - **`init`** - Application wiring

/// Environment configuration
pub mod config;

/// Application wiring
pub mod init;

/// Application state
pub mod state;

pub use config::ServerConfig;
pub use init::create_app;
pub use state::AppState;
