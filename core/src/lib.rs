pub mod config;
pub mod errors;
pub mod hello;
pub mod response;
pub mod telemetry;
pub mod validators;

pub use config::{FunctionConfig, load_config};
pub use errors::{FunctionError, Result};
pub use hello::{HelloFunction, HelloRequest};
pub use response::{FunctionResponse, create_error_response, create_json_response, json_response};
pub use validators::{sanitize_string, validate_name, validate_request_data};
