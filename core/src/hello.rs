use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{error, info, warn};

use crate::config::FunctionConfig;
use crate::errors::{RequestError, Result};
use crate::response::{FunctionResponse, create_json_response};
use crate::validators::validate_request_data;

const INVALID_INPUT: &str = "Invalid input data";
const INTERNAL_ERROR: &str = "Internal server error";

/// The parts of an HTTP request the hello function reads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HelloRequest {
    /// The `name` query string parameter.
    pub query_name: Option<String>,
    /// Parsed JSON body; `None` when absent or not valid JSON.
    pub body: Option<Value>,
}

impl HelloRequest {
    pub fn from_parts(query_name: Option<String>, raw_body: Option<&[u8]>) -> Self {
        let body = raw_body
            .filter(|raw| !raw.is_empty())
            .and_then(|raw| serde_json::from_slice(raw).ok());
        Self { query_name, body }
    }

    /// The query parameter wins over the body. Values that are empty, `null`,
    /// `false` or zero count as not supplied.
    ///
    /// A supplied body that is not an object has no fields to read and is an
    /// error; an unsupplied one (`[]`, `0`, `""`...) is ignored.
    fn name(&self) -> Result<Option<Value>> {
        if let Some(name) = self.query_name.as_deref().filter(|n| !n.is_empty()) {
            return Ok(Some(Value::String(name.to_string())));
        }

        let Some(body) = self.body.as_ref().filter(|body| is_supplied(body)) else {
            return Ok(None);
        };
        let fields = body.as_object().ok_or_else(|| RequestError::BodyNotAnObject {
            kind: json_kind(body).to_string(),
        })?;

        Ok(fields.get("name").filter(|name| is_supplied(name)).cloned())
    }
}

fn is_supplied(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// ISO-8601 with microseconds, dropping the fraction when it is zero.
fn iso_timestamp(now: DateTime<Utc>) -> String {
    let format = if now.timestamp_subsec_micros() == 0 {
        SecondsFormat::Secs
    } else {
        SecondsFormat::Micros
    };
    now.to_rfc3339_opts(format, false)
}

#[derive(Debug, Serialize)]
struct Greeting<'a> {
    message: String,
    timestamp: String,
    function: &'a str,
    version: &'a str,
}

/// The `hello` endpoint: greets the supplied name, or the configured default.
#[derive(Debug, Clone, Default)]
pub struct HelloFunction {
    config: FunctionConfig,
}

impl HelloFunction {
    pub fn new(config: FunctionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FunctionConfig {
        &self.config
    }

    pub fn handle(&self, request: &HelloRequest) -> FunctionResponse {
        self.handle_at(request, Utc::now())
    }

    /// Never fails: any internal error becomes a 500 envelope.
    pub fn handle_at(&self, request: &HelloRequest, now: DateTime<Utc>) -> FunctionResponse {
        info!("Hello function processed a request.");

        match self.respond(request, now) {
            Ok(response) => response,
            Err(e) => {
                error!("Error in hello function: {}", e);
                self.internal_error(e.status_code())
            }
        }
    }

    fn respond(&self, request: &HelloRequest, now: DateTime<Utc>) -> Result<FunctionResponse> {
        let name = request.name()?;

        if let Some(name) = &name {
            if !validate_request_data(&json!({ "name": name })) {
                warn!("Rejected invalid name in hello request");
                return self.json(&json!({ "error": INVALID_INPUT }), 400);
            }
        }

        // only strings get past validation
        let name = match name {
            Some(Value::String(name)) => name,
            _ => self.config.default_name.clone(),
        };

        let greeting = Greeting {
            message: format!("Hello, {}!", name),
            timestamp: iso_timestamp(now),
            function: &self.config.function_name,
            version: &self.config.version,
        };

        info!("Hello function returning greeting for: {}", name);
        self.json(&greeting, 200)
    }

    fn json<T: Serialize + ?Sized>(&self, data: &T, status_code: u16) -> Result<FunctionResponse> {
        create_json_response(data, status_code, self.config.extra_headers())
    }

    fn internal_error(&self, status_code: u16) -> FunctionResponse {
        self.json(&json!({ "error": INTERNAL_ERROR }), status_code)
            .unwrap_or_else(|_| FunctionResponse::internal_error_fallback())
    }
}
