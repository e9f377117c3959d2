use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::{ConfigError, Result};
use crate::validators::is_valid_name;

/// Holds the YAML config text when no file path is given.
pub const CONFIG_ENV_VAR: &str = "HELLO_FUNCTION_CONFIG";

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct FunctionConfig {
    pub function_name: String,
    pub version: String,
    /// Greeted when the request carries no name.
    pub default_name: String,
    /// Merged over the base headers of every response.
    pub response_headers: BTreeMap<String, String>,
}

impl Default for FunctionConfig {
    fn default() -> Self {
        Self {
            function_name: "hello".to_string(),
            version: "1.0.0".to_string(),
            default_name: "World".to_string(),
            response_headers: BTreeMap::new(),
        }
    }
}

pub fn load_config(config_path: Option<&str>) -> Result<FunctionConfig> {
    let config = match config_path {
        Some(path) => FunctionConfig::from_file(path)?,
        None => FunctionConfig::from_env()?,
    };
    config.validate()?;
    Ok(config)
}

impl FunctionConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            origin: path.to_string(),
            error: Box::new(e),
        })?;
        Self::from_yaml(&content)
    }

    /// Reads YAML from [`CONFIG_ENV_VAR`]; defaults when it is unset.
    pub fn from_env() -> Result<Self> {
        Self::from_env_value(std::env::var(CONFIG_ENV_VAR).ok())
    }

    fn from_env_value(value: Option<String>) -> Result<Self> {
        match value {
            Some(yaml) if !yaml.trim().is_empty() => Self::from_yaml(&yaml),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: FunctionConfig = serde_yaml::from_str(content)?;
        Ok(config)
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.function_name.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "function_name".to_string(),
            });
        }
        if self.version.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "version".to_string(),
            });
        }
        if !is_valid_name(&self.default_name) {
            return Err(ConfigError::ValidationFailed {
                reason: format!("default_name '{}' is not a valid name", self.default_name),
            });
        }
        if self.response_headers.keys().any(|k| k.trim().is_empty()) {
            return Err(ConfigError::Invalid {
                message: "response header names cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    /// `None` when no extra headers are configured.
    pub fn extra_headers(&self) -> Option<&BTreeMap<String, String>> {
        (!self.response_headers.is_empty()).then_some(&self.response_headers)
    }
}
