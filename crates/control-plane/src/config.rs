// Server configuration
//
// Sources, highest priority first:
// - first CLI argument: bind address as host:port
// - environment (a .env file is loaded by main via dotenvy)
// - built-in defaults
//
// Environment variables:
// - BIND_ADDR: listener address (default: 127.0.0.1:5000)
// - DATABASE_URL: SQLite URL (default: sqlite://webcal.db)
// - DEV_MODE: "true" to use the in-memory store instead of SQLite
// - API_PREFIX: path prefix for API routes, e.g. "/api" (default: empty)
// - CORS_ALLOWED_ORIGINS: comma-separated origins; CORS is off when unset

use anyhow::{bail, Context, Result};
use axum::http::HeaderValue;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://webcal.db";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listener address, host:port
    pub bind_addr: String,
    pub database_url: String,
    /// Use the in-memory store (data is lost on restart)
    pub dev_mode: bool,
    pub api_prefix: String,
    pub cors_origins: Vec<HeaderValue>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            dev_mode: false,
            api_prefix: String::new(),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Build the configuration from the environment and an optional
    /// `host:port` argument.
    pub fn load(bind_arg: Option<String>) -> Result<Self> {
        let bind_addr = match bind_arg.or_else(|| std::env::var("BIND_ADDR").ok()) {
            Some(addr) => parse_bind_addr(&addr)?,
            None => DEFAULT_BIND_ADDR.to_string(),
        };

        Ok(Self {
            bind_addr,
            database_url: std::env::var("DATABASE_URL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            dev_mode: std::env::var("DEV_MODE")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(false),
            api_prefix: normalize_prefix(&std::env::var("API_PREFIX").unwrap_or_default()),
            cors_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                .map(|s| parse_cors_origins(&s))
                .unwrap_or_default(),
        })
    }
}

/// Validate a `host:port` pair. The host may be a name, an IPv4 address,
/// or a bracketed IPv6 address.
pub fn parse_bind_addr(value: &str) -> Result<String> {
    let value = value.trim();
    let (host, port) = value
        .rsplit_once(':')
        .with_context(|| format!("Bind address {:?} must be host:port", value))?;
    if host.is_empty() {
        bail!("Bind address {:?} is missing a host", value);
    }
    port.parse::<u16>()
        .with_context(|| format!("Invalid port {:?} in bind address", port))?;
    Ok(value.to_string())
}

/// Parse a comma-separated origin list, skipping empty or invalid entries.
pub fn parse_cors_origins(value: &str) -> Vec<HeaderValue> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse().ok())
        .collect()
}

/// "/api/" and "api" both become "/api"; empty stays empty.
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bind_addr() {
        assert_eq!(parse_bind_addr("0.0.0.0:8080").unwrap(), "0.0.0.0:8080");
        assert_eq!(parse_bind_addr("localhost:5000").unwrap(), "localhost:5000");
        assert_eq!(parse_bind_addr("[::1]:5000").unwrap(), "[::1]:5000");
    }

    #[test]
    fn test_parse_bind_addr_rejects_malformed() {
        assert!(parse_bind_addr("localhost").is_err());
        assert!(parse_bind_addr(":5000").is_err());
        assert!(parse_bind_addr("localhost:http").is_err());
        assert!(parse_bind_addr("localhost:70000").is_err());
    }

    #[test]
    fn test_parse_cors_origins() {
        let origins = parse_cors_origins("https://a.example.com, ,https://b.example.com");
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[0], "https://a.example.com");
        assert!(parse_cors_origins("").is_empty());
    }

    #[test]
    fn test_normalize_prefix() {
        assert_eq!(normalize_prefix(""), "");
        assert_eq!(normalize_prefix("/"), "");
        assert_eq!(normalize_prefix("api"), "/api");
        assert_eq!(normalize_prefix("/api/"), "/api");
    }
}
