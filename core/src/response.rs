use serde::Serialize;
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

use crate::errors::Result;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_TYPE_OPTIONS: &str = "X-Content-Type-Options";
pub const FRAME_OPTIONS: &str = "X-Frame-Options";

pub const DEFAULT_ERROR_STATUS: u16 = 500;

const INTERNAL_ERROR_BODY: &str = r#"{"error":"Internal server error"}"#;

pub type Headers = BTreeMap<String, String>;

/// A JSON response envelope: status, headers and a serialized body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionResponse {
    status_code: u16,
    headers: Headers,
    body: String,
}

impl FunctionResponse {
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Parses the body back into JSON.
    pub fn json_body(&self) -> Result<Value> {
        Ok(serde_json::from_str(&self.body)?)
    }

    pub fn into_parts(self) -> (u16, Headers, String) {
        (self.status_code, self.headers, self.body)
    }

    /// Pre-serialized 500 envelope for when building one normally fails.
    pub(crate) fn internal_error_fallback() -> Self {
        Self {
            status_code: DEFAULT_ERROR_STATUS,
            headers: base_headers(),
            body: INTERNAL_ERROR_BODY.to_string(),
        }
    }
}

fn base_headers() -> Headers {
    BTreeMap::from([
        (CONTENT_TYPE.to_string(), "application/json".to_string()),
        (CONTENT_TYPE_OPTIONS.to_string(), "nosniff".to_string()),
        (FRAME_OPTIONS.to_string(), "DENY".to_string()),
    ])
}

/// Serializes `data` into a JSON response.
///
/// `headers` are merged over the base set, so a caller can override any of
/// the defaults. Non-ASCII text is written as-is, not `\u` escaped.
///
/// Fails only when `data` itself cannot be serialized, e.g. a map with
/// non-string keys.
pub fn create_json_response<T>(
    data: &T,
    status_code: u16,
    headers: Option<&Headers>,
) -> Result<FunctionResponse>
where
    T: Serialize + ?Sized,
{
    let body = serde_json::to_string(data)?;

    let mut response_headers = base_headers();
    if let Some(headers) = headers {
        response_headers.extend(headers.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    Ok(FunctionResponse {
        status_code,
        headers: response_headers,
        body,
    })
}

/// 200 response with the base headers only.
pub fn json_response<T>(data: &T) -> Result<FunctionResponse>
where
    T: Serialize + ?Sized,
{
    create_json_response(data, 200, None)
}

/// Builds `{"error": {"message", "status_code"[, "code"]}}`.
pub fn create_error_response(
    message: &str,
    status_code: u16,
    error_code: Option<&str>,
) -> Result<FunctionResponse> {
    let mut error = Map::new();
    error.insert("message".to_string(), json!(message));
    error.insert("status_code".to_string(), json!(status_code));
    if let Some(code) = error_code {
        error.insert("code".to_string(), json!(code));
    }

    create_json_response(&json!({ "error": error }), status_code, None)
}
