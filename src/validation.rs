use serde_json::Value;

use crate::error::{AppError, AppResult};

pub const INVALID_TITLE_MESSAGE: &str = "Invalid title";
pub const INVALID_ID_MESSAGE: &str = "Invalid id";

/// Gate for create and update bodies: `title` must be a non-empty string.
pub fn validate_todo(body: &Value) -> AppResult<()> {
    match body.get("title").and_then(Value::as_str) {
        Some(title) if !title.is_empty() => Ok(()),
        _ => Err(AppError::bad_request(INVALID_TITLE_MESSAGE)),
    }
}

pub fn parse_todo_id(raw: &str) -> AppResult<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::bad_request(INVALID_ID_MESSAGE));
    }
    raw.parse::<u64>()
        .map_err(|_| AppError::bad_request(INVALID_ID_MESSAGE))
}
