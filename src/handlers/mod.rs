pub mod admin;
pub mod announcements;
pub mod auth;

use serde_json::Value;

use crate::error::ApiError;

/// Required string field from a JSON body; missing, non-string or blank
/// values are the caller's 400.
pub(crate) fn require_str<'a>(body: &'a Value, field: &str) -> Result<&'a str, ApiError> {
    body.get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::validation_error(format!("{} is required", field)))
}

// MethodRouter fallbacks: wrong verb on a registered route answers 405 with
// the Allow header before any gate runs.
pub async fn method_not_allowed_get() -> ApiError {
    ApiError::method_not_allowed("GET")
}

pub async fn method_not_allowed_post() -> ApiError {
    ApiError::method_not_allowed("POST")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn require_str_accepts_present_fields() {
        let body = json!({"customerId": "abc"});
        assert_eq!(require_str(&body, "customerId").unwrap(), "abc");
    }

    #[test]
    fn require_str_rejects_missing_blank_and_non_string() {
        assert!(require_str(&json!({}), "email").is_err());
        assert!(require_str(&json!({"email": "  "}), "email").is_err());
        assert!(require_str(&json!({"email": 42}), "email").is_err());
    }
}
