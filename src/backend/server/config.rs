/**
 * Server Configuration
 *
 * Configuration is loaded from environment variables with defaults that
 * work for local development. A malformed value falls back to the default
 * with a warning rather than aborting startup.
 */
use std::net::SocketAddr;

/// Default listen port when `SERVER_PORT` is unset
pub const DEFAULT_PORT: u16 = 4000;

/// Runtime configuration for the document server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// TCP port the server listens on
    pub port: u16,
    /// Initial document content at revision zero
    pub seed: String,
}

impl ServerConfig {
    /// Load configuration from the environment.
    ///
    /// Reads `SERVER_PORT` for the listen port and `DOCUMENT_SEED` for the
    /// initial document content. Both are optional.
    pub fn from_env() -> Self {
        let port = match std::env::var("SERVER_PORT") {
            Ok(raw) => match raw.parse::<u16>() {
                Ok(port) => port,
                Err(_) => {
                    tracing::warn!(
                        "[Startup] SERVER_PORT '{}' is not a valid port, using {}",
                        raw,
                        DEFAULT_PORT
                    );
                    DEFAULT_PORT
                }
            },
            Err(_) => DEFAULT_PORT,
        };

        let seed = std::env::var("DOCUMENT_SEED").unwrap_or_default();

        Self { port, seed }
    }

    /// The socket address to bind, on all interfaces
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            seed: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.seed.is_empty());
    }

    #[test]
    fn test_addr_binds_all_interfaces() {
        let config = ServerConfig {
            port: 9000,
            seed: String::new(),
        };
        assert_eq!(config.addr().to_string(), "0.0.0.0:9000");
    }
}
