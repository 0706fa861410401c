//! Wire envelope and error taxonomy shared by every REST call.
//!
//! Every backend response has the shape
//! `{ "success": bool, "data": T?, "error": { "code": string?, "message": string }? }`.
//! Callers never probe that JSON directly: [`decode_envelope`] and
//! [`decode_ack`] turn the raw status + body into `Result<T, ApiError>`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Machine-readable code returned when the caller's role may not perform the action.
pub const ROLE_ACCESS_DENIED: &str = "ROLE_ACCESS_DENIED";

/// Suffix of conflict codes that mean "this was already done".
const ALREADY_EXISTS_SUFFIX: &str = "_EXISTS";

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Rejected on the client before any request was sent.
    Validation,
    Network,
    Unauthorized,
    AccessDenied,
    NotFound,
    Conflict,
    RateLimited,
    Server,
    /// The response could not be understood.
    Decode,
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
    pub code: Option<String>,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            code: None,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Decode, message)
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Conflict codes such as `ORGANIZATION_EXISTS` mean the action already happened.
    pub fn is_already_done(&self) -> bool {
        self.code
            .as_deref()
            .map(|c| c.ends_with(ALREADY_EXISTS_SUFFIX))
            .unwrap_or(false)
    }

    pub fn is_access_denied(&self) -> bool {
        self.kind == ErrorKind::AccessDenied
    }

    /// Build an error from a non-success HTTP status and the raw response body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<ApiResponse<serde_json::Value>>(body)
            .ok()
            .and_then(|r| r.error);

        let (code, message) = match parsed {
            Some(err) => (err.code, err.message),
            None => (None, format!("Request failed with status {}", status)),
        };

        let kind = kind_for(status, code.as_deref());
        Self {
            kind,
            message,
            code,
        }
    }

    /// Text suitable for a transient notification.
    pub fn user_message(&self) -> String {
        match self.kind {
            ErrorKind::AccessDenied => {
                "You do not have permission to perform this action".to_string()
            }
            ErrorKind::Unauthorized => "Your session has expired, please sign in again".to_string(),
            ErrorKind::Network => format!("Network error: {}", self.message),
            ErrorKind::RateLimited => {
                format!("Too many requests, try again later ({})", self.message)
            }
            _ => self.message.clone(),
        }
    }
}

/// Classify a failure by its error code first, then by HTTP status.
pub fn kind_for(status: u16, code: Option<&str>) -> ErrorKind {
    match code {
        Some(ROLE_ACCESS_DENIED) => return ErrorKind::AccessDenied,
        Some(c) if c.ends_with(ALREADY_EXISTS_SUFFIX) => return ErrorKind::Conflict,
        Some("VALIDATION_ERROR") => return ErrorKind::Validation,
        _ => {}
    }

    match status {
        400 | 422 => ErrorKind::Validation,
        401 => ErrorKind::Unauthorized,
        403 => ErrorKind::AccessDenied,
        404 => ErrorKind::NotFound,
        409 => ErrorKind::Conflict,
        429 => ErrorKind::RateLimited,
        _ => ErrorKind::Server,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ErrorBody>,
}

impl<T> ApiResponse<T> {
    fn failure(self, status: u16) -> ApiError {
        match self.error {
            Some(err) => ApiError {
                kind: kind_for(status, err.code.as_deref()),
                message: err.message,
                code: err.code,
            },
            None => ApiError::new(
                kind_for(status, None),
                format!("Request failed with status {}", status),
            ),
        }
    }

    pub fn into_data(self, status: u16) -> ApiResult<T> {
        if !self.success {
            return Err(self.failure(status));
        }
        self.data
            .ok_or_else(|| ApiError::decode("Response did not contain data"))
    }

    pub fn into_ack(self, status: u16) -> ApiResult<()> {
        if self.success {
            Ok(())
        } else {
            Err(self.failure(status))
        }
    }
}

fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Decode a response carrying a payload.
pub fn decode_envelope<T: DeserializeOwned>(status: u16, body: &str) -> ApiResult<T> {
    if !is_success_status(status) {
        return Err(ApiError::from_status(status, body));
    }
    let envelope: ApiResponse<T> = serde_json::from_str(body)
        .map_err(|e| ApiError::decode(format!("Failed to parse response: {}", e)))?;
    envelope.into_data(status)
}

/// Decode a response where only success matters (delete, toggle acks).
pub fn decode_ack(status: u16, body: &str) -> ApiResult<()> {
    if !is_success_status(status) {
        return Err(ApiError::from_status(status, body));
    }
    if body.trim().is_empty() {
        return Ok(());
    }
    let envelope: ApiResponse<serde_json::Value> = serde_json::from_str(body)
        .map_err(|e| ApiError::decode(format!("Failed to parse response: {}", e)))?;
    envelope.into_ack(status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_payload() {
        let body = r#"{"success":true,"data":{"id":"42"}}"#;
        let value: serde_json::Value = decode_envelope(200, body).unwrap();
        assert_eq!(value["id"], "42");
    }

    #[derive(Debug, PartialEq, Deserialize)]
    struct Ticket {
        id: u32,
        holder: String,
    }

    #[test]
    fn test_decode_payload_without_default() {
        let body = r#"{"success":true,"data":{"id":7,"holder":"Ada"}}"#;
        let ticket: Ticket = decode_envelope(200, body).unwrap();
        assert_eq!(ticket, Ticket { id: 7, holder: "Ada".to_string() });

        let missing = r#"{"success":true}"#;
        let err = decode_envelope::<Ticket>(200, missing).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Decode);
    }

    #[test]
    fn test_role_access_denied_code_wins_over_status() {
        let body = r#"{"success":false,"error":{"code":"ROLE_ACCESS_DENIED","message":"Owners only"}}"#;
        let err = decode_envelope::<serde_json::Value>(400, body).unwrap_err();
        assert_eq!(err.kind, ErrorKind::AccessDenied);
        assert_eq!(err.message, "Owners only");
        assert_eq!(err.code.as_deref(), Some(ROLE_ACCESS_DENIED));
    }

    #[test]
    fn test_exists_code_is_already_done() {
        let body = r#"{"success":false,"error":{"code":"ORGANIZATION_EXISTS","message":"exists"}}"#;
        let err = decode_envelope::<serde_json::Value>(409, body).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert!(err.is_already_done());
    }

    #[test]
    fn test_unparseable_error_body_falls_back_to_status() {
        let err = ApiError::from_status(503, "<html>Bad gateway</html>");
        assert_eq!(err.kind, ErrorKind::Server);
        assert!(err.code.is_none());
        assert!(err.message.contains("503"));

        assert_eq!(ApiError::from_status(404, "").kind, ErrorKind::NotFound);
        assert_eq!(ApiError::from_status(401, "").kind, ErrorKind::Unauthorized);
        assert_eq!(ApiError::from_status(429, "").kind, ErrorKind::RateLimited);
    }

    #[test]
    fn test_success_status_with_failed_envelope() {
        let body = r#"{"success":false,"error":{"message":"Quota reached"}}"#;
        let err = decode_ack(200, body).unwrap_err();
        assert_eq!(err.message, "Quota reached");
    }

    #[test]
    fn test_missing_data_is_decode_error() {
        let err = decode_envelope::<serde_json::Value>(200, r#"{"success":true}"#).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Decode);
    }

    #[test]
    fn test_ack_accepts_empty_body() {
        assert!(decode_ack(204, "").is_ok());
        assert!(decode_ack(200, r#"{"success":true}"#).is_ok());
    }
}
