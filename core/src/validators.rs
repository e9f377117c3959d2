//! Allow-list validation and sanitization for request input.
//!
//! Every function here is total: malformed input yields `false` or an empty
//! string, never an error.

use serde_json::Value;

/// Inclusive bounds on the trimmed length of a name, in characters.
pub const MIN_NAME_LENGTH: usize = 1;
pub const MAX_NAME_LENGTH: usize = 100;

pub const DEFAULT_SANITIZE_MAX_LENGTH: usize = 255;

/// Checks a request payload. Only the `name` field is validated; a payload
/// without one is accepted.
pub fn validate_request_data(data: &Value) -> bool {
    let Some(fields) = data.as_object() else {
        return false;
    };

    match fields.get("name") {
        Some(name) => validate_name(name),
        None => true,
    }
}

/// Returns `false` for anything that is not a JSON string.
pub fn validate_name(name: &Value) -> bool {
    name.as_str().is_some_and(is_valid_name)
}

pub fn is_valid_name(name: &str) -> bool {
    let trimmed = name.trim();
    let length = trimmed.chars().count();
    if !(MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&length) {
        return false;
    }

    trimmed.chars().all(is_name_char)
}

// letters, digits, whitespace, '.', '-', '_'
fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c.is_whitespace() || matches!(c, '.' | '-' | '_')
}

/// Returns an empty string for anything that is not a JSON string.
pub fn sanitize_string(value: &Value, max_length: usize) -> String {
    value
        .as_str()
        .map(|s| sanitize_str(s, max_length))
        .unwrap_or_default()
}

/// Trims, drops C0/C1 control characters, then truncates to `max_length`
/// characters.
pub fn sanitize_str(value: &str, max_length: usize) -> String {
    value
        .trim()
        .chars()
        .filter(|c| !is_stripped_control(*c))
        .take(max_length)
        .collect()
}

fn is_stripped_control(c: char) -> bool {
    matches!(c, '\u{00}'..='\u{1f}' | '\u{7f}'..='\u{9f}')
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_name_valid() {
        for name in ["John", "John Doe", "John-Doe", "John_Doe", "John123", "J.R. Smith"] {
            assert!(validate_name(&json!(name)), "Expected valid: '{}'", name);
        }
    }

    #[test]
    fn test_validate_name_invalid() {
        let too_long = "a".repeat(101);
        let invalid = vec![
            "",
            "   ",
            too_long.as_str(),
            "<script>",
            "John@Doe",
            "{name}",
            "tab\u{0}null",
        ];

        for name in invalid {
            assert!(!validate_name(&json!(name)), "Expected invalid: '{}'", name);
        }
    }

    #[test]
    fn test_validate_name_rejects_non_strings() {
        for value in [json!(123), json!(null), json!(true), json!(["John"]), json!({"name": "John"})] {
            assert!(!validate_name(&value), "Expected invalid: {}", value);
        }
    }

    #[test]
    fn test_validate_name_length_boundary() {
        assert!(is_valid_name(&"a".repeat(100)));
        assert!(!is_valid_name(&"a".repeat(101)));
        assert!(is_valid_name("a"));
        // surrounding whitespace does not count towards the length
        assert!(is_valid_name(&format!("  {}  ", "a".repeat(100))));
    }

    #[test]
    fn test_validate_name_rejects_non_ascii_letters() {
        assert!(!is_valid_name("José"));
        assert!(!is_valid_name("名前"));
    }

    #[test]
    fn test_validate_request_data() {
        assert!(validate_request_data(&json!({"name": "John"})));
        assert!(validate_request_data(&json!({"other": "value"})));
        assert!(validate_request_data(&json!({})));
        assert!(!validate_request_data(&json!({"name": "<script>"})));
        assert!(!validate_request_data(&json!({"name": 42})));
        assert!(!validate_request_data(&json!("not a dict")));
        assert!(!validate_request_data(&json!(["name", "John"])));
    }

    #[test]
    fn test_sanitize_string() {
        let max = DEFAULT_SANITIZE_MAX_LENGTH;
        assert_eq!(sanitize_string(&json!("Hello World"), max), "Hello World");
        assert_eq!(sanitize_string(&json!("  Hello World  "), max), "Hello World");
        assert_eq!(sanitize_string(&json!("Hello\u{0}World"), max), "HelloWorld");
        assert_eq!(sanitize_string(&json!("a".repeat(300)), 10), "a".repeat(10));
        assert_eq!(sanitize_string(&json!(123), max), "");
        assert_eq!(sanitize_string(&json!(null), max), "");
    }

    #[test]
    fn test_sanitize_strips_c0_and_c1_controls() {
        assert_eq!(sanitize_str("a\u{1f}b\u{7f}c\u{85}d\u{9f}e", 255), "abcde");
        assert_eq!(sanitize_str("keep\u{a0}nbsp", 255), "keep\u{a0}nbsp");
    }

    #[test]
    fn test_sanitize_truncates_by_characters() {
        assert_eq!(sanitize_str("ééééé", 3), "ééé");
        assert_eq!(sanitize_str("short", 255), "short");
        assert_eq!(sanitize_str("anything", 0), "");
    }

    #[test]
    fn test_sanitize_trims_before_stripping() {
        // a leading control character shields the whitespace behind it from trimming
        assert_eq!(sanitize_str("\u{0} padded ", 255), " padded");
    }
}
