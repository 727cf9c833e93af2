use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;
use validator::{Validate, ValidationError};

use crate::graph_output::ExtractOptions;
use crate::query_wrapper::is_valid_graph_name;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Parse error for {field}: {value} - {source}")]
    Parse {
        field: String,
        value: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Runtime configuration with validation
#[derive(Clone, Debug, Validate, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// AGE graph passed to `cypher()` when wrapping queries
    #[validate(
        length(min = 1, max = 63, message = "Graph name must be 1-63 characters"),
        custom(function = "validate_graph_name")
    )]
    pub graph_name: String,

    /// Synthesize placeholder nodes for edge endpoints missing from a result
    pub placeholder_endpoints: bool,

    /// Pretty-print JSON output
    pub pretty_output: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            graph_name: "graph".to_string(),
            placeholder_endpoints: true,
            pretty_output: true,
        }
    }
}

impl AppConfig {
    /// Create configuration from environment variables with validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            graph_name: env::var("AGEGRAPH_GRAPH").unwrap_or_else(|_| "graph".to_string()),
            placeholder_endpoints: parse_env_var("AGEGRAPH_PLACEHOLDER_ENDPOINTS", "true")?,
            pretty_output: parse_env_var("AGEGRAPH_PRETTY", "true")?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from YAML file
    pub fn from_yaml_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse {
            field: "yaml_file".to_string(),
            value: "file read failed".to_string(),
            source: Box::new(e),
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            field: "yaml_content".to_string(),
            value: content,
            source: Box::new(e),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply command line overrides (CLI wins over file and environment)
    pub fn apply_cli(&mut self, cli: CliConfig) -> Result<(), ConfigError> {
        if let Some(graph_name) = cli.graph_name {
            self.graph_name = graph_name;
        }
        if cli.compact {
            self.pretty_output = false;
        }
        if cli.no_placeholders {
            self.placeholder_endpoints = false;
        }

        self.validate()?;
        Ok(())
    }
}

impl From<&AppConfig> for ExtractOptions {
    fn from(config: &AppConfig) -> Self {
        ExtractOptions {
            placeholder_endpoints: config.placeholder_endpoints,
        }
    }
}

/// CLI configuration (parsed from command line arguments)
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    pub graph_name: Option<String>,
    pub compact: bool,
    pub no_placeholders: bool,
}

fn validate_graph_name(name: &str) -> Result<(), ValidationError> {
    if is_valid_graph_name(name) {
        Ok(())
    } else {
        Err(ValidationError::new("graph_name")
            .with_message("Graph name must be an identifier (letters, digits, underscore)".into()))
    }
}

/// Parse an environment variable with a default value
fn parse_env_var<T: std::str::FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    value.parse().map_err(|e| ConfigError::Parse {
        field: key.to_string(),
        value,
        source: Box::new(e),
    })
}
