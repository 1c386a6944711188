//! JSON body extraction
//!
//! A body that is missing or is not a JSON object is read as `{}` so the
//! endpoint validator reports the missing field. A JSON object whose fields
//! have the wrong types is rejected with a 400 envelope.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::AppError;

pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Rejected {
                code: rejection.status().as_u16(),
                message: rejection.body_text(),
            })?;
        parse_body(&bytes).map(JsonBody)
    }
}

pub fn parse_body<T>(bytes: &[u8]) -> Result<T, AppError>
where
    T: DeserializeOwned + Default,
{
    match serde_json::from_slice::<Value>(bytes) {
        Ok(value @ Value::Object(_)) => serde_json::from_value(value)
            .map_err(|e| AppError::BadRequest(format!("invalid request body: {}", e))),
        _ => Ok(T::default()),
    }
}

/// `true` when an optional string is absent or empty.
pub fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize)]
    struct Probe {
        query: Option<String>,
        page: Option<i64>,
    }

    #[test]
    fn test_object_body() {
        let probe: Probe = parse_body(br#"{"query":"q","page":2}"#).unwrap();
        assert_eq!(probe.query.as_deref(), Some("q"));
        assert_eq!(probe.page, Some(2));
    }

    #[test]
    fn test_non_object_bodies_read_as_empty() {
        for body in [&b""[..], b"not json", b"[1,2]", b"null", b"\"query\""] {
            let probe: Probe = parse_body(body).unwrap();
            assert!(probe.query.is_none());
        }
    }

    #[test]
    fn test_wrong_field_type_rejected() {
        let result = parse_body::<Probe>(br#"{"query":"q","page":"two"}"#);
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(&None));
        assert!(is_blank(&Some(String::new())));
        assert!(!is_blank(&Some(" ".to_string())));
    }
}
