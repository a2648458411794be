// Configuration module entry point
// Loads layered configuration and holds the shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, HttpConfig, LoggingConfig, MirrorConfig, PerformanceConfig, ServerConfig,
    StaticFilesConfig,
};

/// Environment variable prefix, e.g. `MERGINGTON_SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "MERGINGTON";

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Default config file is "config.toml" when no path specified
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("performance.shutdown_grace", 5)?
            .set_default("http.server_name", "Mergington-Activities/0.1")?
            .set_default("http.enable_cors", false)?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .set_default("static_files.mount", "/static")?
            .set_default("static_files.dir", "static")?
            .set_default("static_files.index_files", vec!["index.html", "index.htm"])?
            .set_default("static_files.home", "/static/index.html")?
            .set_default("mirror.enabled", false)?
            .set_default("mirror.path", "data/activities.toml")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
