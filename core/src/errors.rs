use thiserror::Error;

#[derive(Error, Debug)]
pub enum FunctionError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    #[error("Request error: {0}")]
    Request(#[from] RequestError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Configuration validation failed: {reason}")]
    ValidationFailed { reason: String },

    #[error("Failed to load configuration from {origin}: {error}")]
    LoadFailed {
        origin: String,
        #[source]
        error: Box<dyn std::error::Error + Send + Sync>,
    },
}

#[derive(Error, Debug)]
pub enum SerializationError {
    #[error("JSON serialization failed: {reason}")]
    Json { reason: String },

    #[error("YAML serialization failed: {reason}")]
    Yaml { reason: String },
}

#[derive(Error, Debug)]
pub enum RequestError {
    #[error("Request body is a JSON {kind}, expected an object")]
    BodyNotAnObject { kind: String },
}

pub type Result<T> = std::result::Result<T, FunctionError>;

impl From<serde_json::Error> for FunctionError {
    fn from(err: serde_json::Error) -> Self {
        FunctionError::Serialization(SerializationError::Json {
            reason: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for FunctionError {
    fn from(err: serde_yaml::Error) -> Self {
        FunctionError::Serialization(SerializationError::Yaml {
            reason: err.to_string(),
        })
    }
}

impl FunctionError {
    /// HTTP status the error surfaces as. Every variant is surfaced as an
    /// internal error; rejected names are answered before any error exists.
    pub fn status_code(&self) -> u16 {
        500
    }
}
