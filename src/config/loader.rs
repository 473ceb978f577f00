//! Configuration loading from disk and the environment.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::{GatewayConfig, LogFormat};
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding the listener bind address.
pub const ENV_BIND_ADDR: &str = "GATEWAY_BIND_ADDR";
/// Environment variable overriding the planner gRPC address.
pub const ENV_PLANNER_ADDR: &str = "PLANNER_ADDR";
/// Environment variable overriding the RAG gRPC address.
pub const ENV_RAG_ADDR: &str = "RAG_ADDR";
/// Environment variable overriding the log level.
pub const ENV_LOG_LEVEL: &str = "GATEWAY_LOG_LEVEL";
/// Environment variable overriding the log format (`pretty` or `json`).
pub const ENV_LOG_FORMAT: &str = "GATEWAY_LOG_FORMAT";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {var}: '{value}'")]
    Env { var: &'static str, value: String },

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

/// Load configuration from an optional TOML file, apply environment
/// overrides from the process environment, then validate.
pub fn load_config(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    load_config_with(path, |key| std::env::var(key).ok())
}

/// Like [`load_config`], with an injectable environment lookup.
pub fn load_config_with<F>(path: Option<&Path>, env: F) -> Result<GatewayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            toml::from_str(&content)?
        }
        None => GatewayConfig::default(),
    };

    apply_env_overrides(&mut config, env)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overwrite config fields from environment variables that are set and non-empty.
pub fn apply_env_overrides<F>(config: &mut GatewayConfig, env: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str| {
        env(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    if let Some(addr) = lookup(ENV_BIND_ADDR) {
        config.listener.bind_address = addr;
    }
    if let Some(addr) = lookup(ENV_PLANNER_ADDR) {
        config.downstream.planner_address = addr;
    }
    if let Some(addr) = lookup(ENV_RAG_ADDR) {
        config.downstream.rag_address = addr;
    }
    if let Some(level) = lookup(ENV_LOG_LEVEL) {
        config.observability.log_level = level;
    }
    if let Some(format) = lookup(ENV_LOG_FORMAT) {
        config.observability.log_format = match format.to_ascii_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            "json" => LogFormat::Json,
            _ => {
                return Err(ConfigError::Env {
                    var: ENV_LOG_FORMAT,
                    value: format,
                })
            }
        };
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_file_or_env() {
        let config = load_config_with(None, env_from(&[])).unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.downstream.planner_address, "http://localhost:50051");
        assert_eq!(config.downstream.rag_address, "http://localhost:50052");
        assert_eq!(config.timeouts.solve_secs, 30);
        assert_eq!(config.timeouts.rag_query_secs, 60);
        assert_eq!(config.timeouts.rag_course_secs, 10);
    }

    #[test]
    fn test_env_overrides_addresses() {
        let env = env_from(&[
            (ENV_PLANNER_ADDR, "http://planner:50051"),
            (ENV_RAG_ADDR, " http://rag:50052 "),
            (ENV_BIND_ADDR, ""),
            (ENV_LOG_FORMAT, "JSON"),
        ]);
        let config = load_config_with(None, env).unwrap();
        assert_eq!(config.downstream.planner_address, "http://planner:50051");
        assert_eq!(config.downstream.rag_address, "http://rag:50052");
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.observability.log_format, LogFormat::Json);
    }

    #[test]
    fn test_unknown_log_format_is_rejected() {
        let err = load_config_with(None, env_from(&[(ENV_LOG_FORMAT, "xml")])).unwrap_err();
        assert!(matches!(err, ConfigError::Env { var: ENV_LOG_FORMAT, .. }));
    }

    #[test]
    fn test_partial_toml_file_keeps_defaults() {
        let path = std::env::temp_dir().join(format!(
            "course-gateway-config-{}.toml",
            std::process::id()
        ));
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[timeouts]\nsolve_secs = 5\n\n[cors]\nmax_age_secs = 600").unwrap();

        let config = load_config_with(Some(&path), env_from(&[])).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(config.timeouts.solve_secs, 5);
        assert_eq!(config.timeouts.rag_query_secs, 60);
        assert_eq!(config.cors.max_age_secs, 600);
    }

    #[test]
    fn test_invalid_env_value_fails_validation() {
        let err = load_config_with(None, env_from(&[(ENV_RAG_ADDR, "rag:50052")])).unwrap_err();
        match err {
            ConfigError::Validation(errors) => assert_eq!(errors[0].field, "downstream.rag_address"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config_with(Some(Path::new("/nonexistent/gateway.toml")), env_from(&[]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
