use crate::error::{CmsError, Result};
use serde::Deserialize;
use std::fs;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub media: MediaConfig,
    pub admin: AdminConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Session lifetime in minutes.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaConfig {
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    /// Reject uploads larger than this many bytes.
    #[serde(default = "default_max_upload")]
    pub max_upload_bytes: usize,
}

/// Bootstrap credentials for the first admin user, consumed by `seed`.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    pub email: String,
    pub password: String,
    #[serde(default = "default_admin_name")]
    pub display_name: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_session_ttl() -> i64 {
    8 * 60
}

fn default_upload_dir() -> String {
    "uploads".to_string()
}

fn default_max_upload() -> usize {
    10 * 1024 * 1024
}

fn default_admin_name() -> String {
    "Administrator".to_string()
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CmsError::Config(format!("Failed to read config file '{}': {}", path, e))
        })?;

        let mut config: Config = toml::from_str(&content)?;

        // Environment overrides for deployment without editing the file
        if let Ok(port) = std::env::var("SITESMITH_PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| CmsError::Config(format!("Invalid SITESMITH_PORT: {}", port)))?;
        }
        if let Ok(password) = std::env::var("SITESMITH_ADMIN_PASSWORD") {
            config.admin.password = password;
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_config_with_defaults() {
        let config: Config = toml::from_str(
            r#"
            [server]
            [media]
            [admin]
            email = "admin@example.com"
            password = "hunter2"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.media.upload_dir, "uploads");
        assert_eq!(config.admin.display_name, "Administrator");
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    }
}
