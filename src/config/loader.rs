//! Configuration loading from disk and environment.

use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable holding the listen port.
pub const PORT_ENV: &str = "PORT";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load a configuration from a TOML file without validating it.
pub fn read_config(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let config = read_config(path)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Replace the listener port, keeping the configured host part.
pub fn override_port(config: &mut ProxyConfig, port: u16) {
    let ip = config
        .listener
        .bind_address
        .parse::<SocketAddr>()
        .map(|addr| addr.ip())
        .unwrap_or(IpAddr::from([0, 0, 0, 0]));
    config.listener.bind_address = SocketAddr::new(ip, port).to_string();
}

/// Apply the `PORT` value, if one was provided.
///
/// Empty values are ignored; anything else must parse as a `u16`.
pub fn apply_port_env(config: &mut ProxyConfig, value: Option<&str>) -> Result<(), ConfigError> {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(());
    };
    let port = raw
        .parse::<u16>()
        .map_err(|_| ConfigError::Validation(vec![ValidationError::Port(raw.to_string())]))?;
    override_port(config, port);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_port_env_overrides_bind_address() {
        let mut config = ProxyConfig::default();
        apply_port_env(&mut config, Some("8088")).unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8088");
    }

    #[test]
    fn test_port_override_keeps_host() {
        let mut config = ProxyConfig::default();
        config.listener.bind_address = "127.0.0.1:1".into();
        override_port(&mut config, 4000);
        assert_eq!(config.listener.bind_address, "127.0.0.1:4000");
    }

    #[test]
    fn test_missing_or_empty_port_env_is_ignored() {
        let mut config = ProxyConfig::default();
        apply_port_env(&mut config, None).unwrap();
        apply_port_env(&mut config, Some("  ")).unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:3000");
    }

    #[test]
    fn test_invalid_port_env_rejected() {
        let mut config = ProxyConfig::default();
        let err = apply_port_env(&mut config, Some("http")).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref e) if e == &[ValidationError::Port("http".into())]));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[listener]\nbind_address = \"127.0.0.1:3100\"\n\n[timeouts]\nrequest_secs = 3"
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:3100");
        assert_eq!(config.timeouts.request_secs, 3);
    }

    #[test]
    fn test_load_config_reports_validation_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[timeouts]\nprobe_secs = 0").unwrap();

        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("probe_secs"));
    }
}
