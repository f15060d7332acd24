/**
 * Server Configuration
 *
 * Configuration is loaded from environment variables, with sensible
 * defaults for local development. The chat backend is fully in-memory,
 * so there is nothing to configure beyond the listen address.
 */

/// Default port when `SERVER_PORT` is not set.
pub const DEFAULT_PORT: u16 = 8080;

/// Server configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// TCP port to listen on (`SERVER_PORT`, default 8080)
    pub port: u16,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// An unparsable `SERVER_PORT` falls back to the default rather than
    /// failing startup.
    pub fn from_env() -> Self {
        let port = std::env::var("SERVER_PORT")
            .ok()
            .and_then(|raw| match raw.parse::<u16>() {
                Ok(port) => Some(port),
                Err(_) => {
                    tracing::warn!("Invalid SERVER_PORT '{raw}', using default {DEFAULT_PORT}");
                    None
                }
            })
            .unwrap_or(DEFAULT_PORT);

        Self { port }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}
