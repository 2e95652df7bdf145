//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Sub-API selector for the plain "hu" feed.
pub const QUERY_HU: &str = "lc79_hu";

/// Sub-API selector for the "md5" feed.
pub const QUERY_MD5: &str = "lc79_md5";

/// Root configuration for the proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// The single upstream origin and the headers sent to it.
    pub upstream: UpstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    pub security: SecurityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Upstream origin and the browser-like header set sent with every call.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Origin queried as `<origin>/?api=<type>[&key=<key>]`.
    pub origin: String,

    pub referer: String,

    /// Value of the `Host` header. Empty means "let the client derive it".
    pub host: String,

    pub user_agent: String,

    pub accept: String,

    pub accept_language: String,

    pub connection: String,

    /// User-Agent sent by the bulk probe, which skips the rest of the set.
    pub probe_user_agent: String,

    /// Sub-APIs probed, in order, by `/api/test-all`.
    pub probe_queries: Vec<String>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            origin: "https://cutoolsfree.fun".to_string(),
            referer: "https://cutoolsfree.fun".to_string(),
            host: "cutoolsfree.fun".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"
                .to_string(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8"
                .to_string(),
            accept_language: "vi-VN,vi;q=0.9,en-US;q=0.8,en;q=0.7".to_string(),
            connection: "keep-alive".to_string(),
            probe_user_agent: "Mozilla/5.0".to_string(),
            probe_queries: vec![QUERY_HU.to_string(), QUERY_MD5.to_string()],
        }
    }
}

/// Timeout configuration for upstream calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Upper bound for a proxied upstream call, in seconds.
    pub request_secs: u64,

    /// Upper bound for each call made by the bulk probe, in seconds.
    pub probe_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 15,
            probe_secs: 8,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Security configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Allow cross-origin requests from any origin.
    pub cors_enabled: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self { cors_enabled: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ProxyConfig = toml::from_str(
            r#"
            [upstream]
            origin = "http://127.0.0.1:9999"

            [timeouts]
            probe_secs = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.upstream.origin, "http://127.0.0.1:9999");
        assert_eq!(config.upstream.host, "cutoolsfree.fun");
        assert_eq!(config.timeouts.request_secs, 15);
        assert_eq!(config.timeouts.probe_secs, 2);
        assert_eq!(config.listener.bind_address, "0.0.0.0:3000");
        assert_eq!(config.upstream.probe_queries, vec![QUERY_HU, QUERY_MD5]);
    }

    #[test]
    fn test_log_format_lowercase() {
        let config: ObservabilityConfig = toml::from_str("log_format = \"json\"").unwrap();
        assert_eq!(config.log_format, LogFormat::Json);
    }
}
