//! Uniform response envelope
//!
//! Every response under `/api/v1/` is `{code, message, data, requestId}`,
//! with the HTTP status mirroring `code`.

use axum::{
    http::{header::HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::error::AppError;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub code: u16,
    pub message: String,
    pub data: Value,
    pub request_id: String,
}

impl Envelope {
    /// Build an envelope. Missing `data` becomes `{}`, a missing request id
    /// is generated fresh.
    pub fn build(
        code: u16,
        message: impl Into<String>,
        data: Option<Value>,
        request_id: Option<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            data: data.unwrap_or_else(|| Value::Object(Map::new())),
            request_id: request_id.unwrap_or_else(new_request_id),
        }
    }

    /// 200 envelope carrying `data`.
    pub fn ok<T: Serialize>(data: T) -> Result<Self, AppError> {
        let data = serde_json::to_value(data)
            .map_err(|e| AppError::Internal(format!("failed to encode response data: {}", e)))?;
        Ok(Self::build(200, "OK", Some(data), None))
    }

    pub fn error(code: u16, message: impl Into<String>) -> Self {
        Self::build(code, message, None, None)
    }
}

pub fn new_request_id() -> String {
    Uuid::new_v4().to_string()
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let request_id = HeaderValue::from_str(&self.request_id).ok();

        let mut response = (status, Json(self)).into_response();
        if let Some(value) = request_id {
            response
                .headers_mut()
                .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_defaults() {
        let envelope = Envelope::build(401, "nope", None, None);
        assert_eq!(envelope.code, 401);
        assert_eq!(envelope.data, serde_json::json!({}));
        assert!(Uuid::parse_str(&envelope.request_id).is_ok());
    }

    #[test]
    fn test_build_keeps_given_request_id() {
        let envelope = Envelope::build(200, "OK", Some(serde_json::json!({"a": 1})), Some("rid".into()));
        assert_eq!(envelope.request_id, "rid");
        assert_eq!(envelope.data["a"], 1);
    }

    #[test]
    fn test_request_ids_are_fresh() {
        let a = Envelope::error(400, "x");
        let b = Envelope::error(400, "x");
        assert_ne!(a.request_id, b.request_id);
    }

    #[test]
    fn test_serializes_camel_case() {
        let envelope = Envelope::build(200, "OK", None, Some("rid".into()));
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"code": 200, "message": "OK", "data": {}, "requestId": "rid"})
        );
    }

    #[test]
    fn test_response_status_and_header() {
        let response = Envelope::build(400, "bad", None, Some("rid-1".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()[REQUEST_ID_HEADER], "rid-1");
    }
}
