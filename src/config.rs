//! Client configuration.
//!
//! Loaded from a TOML file or from `PRESTO_*` environment variables (a `.env`
//! file in the working directory is honoured).

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::connection::Connection;
use crate::models::{PrestoError, Result};
use crate::processor::DEFAULT_POLL_INTERVAL;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub connection: Connection,

    /// Delay before each continuation request, in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Upper bound on continuation requests per query. Unbounded if unset.
    #[serde(default)]
    pub max_polls: Option<usize>,
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL.as_millis() as u64
}

impl ClientConfig {
    pub fn new(connection: Connection) -> Self {
        Self {
            connection,
            poll_interval_ms: default_poll_interval_ms(),
            max_polls: None,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Parses configuration from a TOML string.
    ///
    /// ```toml
    /// poll_interval_ms = 100
    ///
    /// [connection]
    /// host = "http://coordinator:8080"
    /// user = "alice"
    /// schema = "default"
    /// catalog = "hive"
    /// ```
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| PrestoError::config(format!("Failed to parse config: {e}")))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            PrestoError::config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Builds configuration from `PRESTO_HOST`, `PRESTO_USER`, `PRESTO_SCHEMA`,
    /// `PRESTO_CATALOG`, and the optional `PRESTO_POLL_INTERVAL_MS` and
    /// `PRESTO_MAX_POLLS`.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| PrestoError::config(format!("{key} is not set")))
        };

        let connection = Connection::new(
            required("PRESTO_HOST")?,
            required("PRESTO_USER")?,
            required("PRESTO_SCHEMA")?,
            required("PRESTO_CATALOG")?,
        );

        let poll_interval_ms = match lookup("PRESTO_POLL_INTERVAL_MS") {
            Some(value) => value.parse().map_err(|e| {
                PrestoError::config(format!("invalid PRESTO_POLL_INTERVAL_MS '{value}': {e}"))
            })?,
            None => default_poll_interval_ms(),
        };

        let max_polls = lookup("PRESTO_MAX_POLLS")
            .map(|value| {
                value.parse().map_err(|e| {
                    PrestoError::config(format!("invalid PRESTO_MAX_POLLS '{value}': {e}"))
                })
            })
            .transpose()?;

        Ok(Self {
            connection,
            poll_interval_ms,
            max_polls,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    const BASE: [(&str, &str); 4] = [
        ("PRESTO_HOST", "http://coordinator:8080"),
        ("PRESTO_USER", "alice"),
        ("PRESTO_SCHEMA", "default"),
        ("PRESTO_CATALOG", "hive"),
    ];

    #[test]
    fn test_parse_toml_with_defaults() {
        let config = ClientConfig::from_toml_str(
            r#"
            [connection]
            host = "http://coordinator:8080"
            user = "alice"
            schema = "default"
            catalog = "hive"
            "#,
        )
        .unwrap();

        assert_eq!(config.connection.user(), "alice");
        assert_eq!(config.poll_interval(), Duration::from_millis(50));
        assert_eq!(config.max_polls, None);
    }

    #[test]
    fn test_parse_toml_overrides() {
        let config = ClientConfig::from_toml_str(
            r#"
            poll_interval_ms = 250
            max_polls = 1000

            [connection]
            host = "http://coordinator:8080"
            user = "alice"
            schema = "web"
            catalog = "hive"
            "#,
        )
        .unwrap();

        assert_eq!(config.poll_interval(), Duration::from_millis(250));
        assert_eq!(config.max_polls, Some(1000));
        assert_eq!(config.connection.schema(), "web");
    }

    #[test]
    fn test_parse_toml_missing_connection() {
        let err = ClientConfig::from_toml_str("poll_interval_ms = 10").unwrap_err();
        assert!(matches!(err, PrestoError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[connection]\nhost = \"http://h:8080\"\nuser = \"u\"\nschema = \"s\"\ncatalog = \"c\""
        )
        .unwrap();

        let config = ClientConfig::load(file.path()).unwrap();
        assert_eq!(config.connection.statement_uri(), "http://h:8080/v1/statement");
    }

    #[test]
    fn test_load_missing_file() {
        let err = ClientConfig::load(Path::new("/nonexistent/presto.toml")).unwrap_err();
        assert!(matches!(err, PrestoError::Config(_)));
    }

    #[test]
    fn test_from_lookup() {
        let mut vars = BASE.to_vec();
        vars.push(("PRESTO_MAX_POLLS", "20"));

        let config = ClientConfig::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.connection.host(), "http://coordinator:8080");
        assert_eq!(config.connection.catalog(), "hive");
        assert_eq!(config.poll_interval_ms, 50);
        assert_eq!(config.max_polls, Some(20));
    }

    #[test]
    fn test_from_lookup_missing_required() {
        let err = ClientConfig::from_lookup(lookup(&BASE[..3])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: PRESTO_CATALOG is not set"
        );
    }

    #[test]
    fn test_from_lookup_invalid_interval() {
        let mut vars = BASE.to_vec();
        vars.push(("PRESTO_POLL_INTERVAL_MS", "soon"));

        let err = ClientConfig::from_lookup(lookup(&vars)).unwrap_err();
        assert!(err.to_string().contains("PRESTO_POLL_INTERVAL_MS"));
    }
}
