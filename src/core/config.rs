//! Layered application configuration (spec `SPEC_FULL.md` §A.2). Priority,
//! lowest to highest: built-in defaults, an optional JSON config file,
//! environment variables, then CLI flags — the same layering the teacher's
//! `AppConfig::load(cli)` performs, minus the profile-directory and
//! update-checking layers that don't apply to this service.
//!
//! Secrets (the Arango password) are read only from the environment, never
//! from the config file, mirroring the teacher's separation of `core::config`
//! from `data::secrets`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::cli::CliConfig;
use super::constants::*;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct ArangoConfig {
    pub url: String,
    pub database: String,
    pub user: Option<String>,
    pub password: Option<String>,
    pub probe_timeout_ms: u64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub arango: ArangoConfig,
    pub log_filter: String,
    /// Data products that resolve to the generic-view schema fallback
    /// (spec §9 Open Question) rather than a loaded attributes spec.
    pub generic_view_products: Vec<String>,
}

/// The JSON shape `--config`/`FILTERSVC_CONFIG` files are parsed as. Every
/// field is optional so a config file only needs to override what differs
/// from the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
struct FileConfig {
    host: Option<String>,
    port: Option<u16>,
    log: Option<String>,
    arango_url: Option<String>,
    arango_database: Option<String>,
    generic_view_products: Option<Vec<String>>,
}

impl FileConfig {
    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

impl AppConfig {
    /// Load configuration from all sources. Priority (lowest to highest):
    /// defaults, config file, environment, CLI flags.
    pub fn load(cli: &CliConfig) -> Result<Self> {
        let file_config = match &cli.config {
            Some(path) if path.exists() => {
                tracing::debug!(path = %path.display(), "Loading config file");
                FileConfig::load_from_file(path)?
            }
            Some(path) => {
                tracing::warn!(path = %path.display(), "Config file not found, using defaults");
                FileConfig::default()
            }
            None => FileConfig::default(),
        };

        let host = cli
            .host
            .clone()
            .or_else(|| std::env::var(ENV_HOST).ok())
            .or(file_config.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = cli
            .port
            .or_else(|| std::env::var(ENV_PORT).ok().and_then(|v| v.parse().ok()))
            .or(file_config.port)
            .unwrap_or(DEFAULT_PORT);

        let log_filter = cli
            .log
            .clone()
            .or_else(|| std::env::var(ENV_LOG).ok())
            .or(file_config.log)
            .unwrap_or_else(|| format!("info,{APP_NAME_LOWER}=debug"));

        let arango_url = std::env::var(ENV_ARANGO_URL)
            .ok()
            .or(file_config.arango_url)
            .unwrap_or_else(|| DEFAULT_ARANGO_URL.to_string());

        let arango_database = std::env::var(ENV_ARANGO_DATABASE)
            .ok()
            .or(file_config.arango_database)
            .unwrap_or_else(|| DEFAULT_ARANGO_DATABASE.to_string());

        let probe_timeout_ms = std::env::var(ENV_ARANGO_PROBE_TIMEOUT_MS)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_ARANGO_PROBE_TIMEOUT_MS);

        let generic_view_products = std::env::var(ENV_GENERIC_VIEW_PRODUCTS)
            .ok()
            .map(|v| v.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect())
            .or(file_config.generic_view_products)
            .unwrap_or_default();

        Ok(Self {
            server: ServerConfig { host, port },
            arango: ArangoConfig {
                url: arango_url,
                database: arango_database,
                user: std::env::var(ENV_ARANGO_USER).ok(),
                password: std::env::var(ENV_ARANGO_PASSWORD).ok(),
                probe_timeout_ms,
            },
            log_filter,
            generic_view_products,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_nothing_else_is_set() {
        let cli = CliConfig::default();
        // Safe in this narrow unit test: no other test in this binary mutates
        // these specific env vars, and tests run in separate processes under
        // the default cargo test harness policy for this crate.
        for var in [ENV_HOST, ENV_PORT, ENV_LOG, ENV_ARANGO_URL, ENV_GENERIC_VIEW_PRODUCTS] {
            unsafe { std::env::remove_var(var) };
        }
        let config = AppConfig::load(&cli).unwrap();
        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.arango.url, DEFAULT_ARANGO_URL);
        assert!(config.generic_view_products.is_empty());
    }

    #[test]
    fn cli_flags_take_priority_over_defaults() {
        let cli = CliConfig {
            host: Some("0.0.0.0".to_string()),
            port: Some(9999),
            ..Default::default()
        };
        unsafe { std::env::remove_var(ENV_HOST) };
        unsafe { std::env::remove_var(ENV_PORT) };
        let config = AppConfig::load(&cli).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9999);
    }

    #[test]
    fn config_file_values_are_read_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filtersvc.json");
        std::fs::write(
            &path,
            r#"{"host": "10.0.0.1", "port": 7000, "generic_view_products": ["genomes"]}"#,
        )
        .unwrap();

        unsafe { std::env::remove_var(ENV_HOST) };
        unsafe { std::env::remove_var(ENV_PORT) };
        unsafe { std::env::remove_var(ENV_GENERIC_VIEW_PRODUCTS) };

        let cli = CliConfig {
            config: Some(path),
            ..Default::default()
        };
        let config = AppConfig::load(&cli).unwrap();
        assert_eq!(config.server.host, "10.0.0.1");
        assert_eq!(config.server.port, 7000);
        assert_eq!(config.generic_view_products, vec!["genomes".to_string()]);
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.json");

        unsafe { std::env::remove_var(ENV_HOST) };
        unsafe { std::env::remove_var(ENV_PORT) };

        let cli = CliConfig {
            config: Some(path),
            ..Default::default()
        };
        let config = AppConfig::load(&cli).unwrap();
        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.server.port, DEFAULT_PORT);
    }
}
