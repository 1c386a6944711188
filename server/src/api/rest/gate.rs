//! Bearer token gate for the protected prefix
//!
//! Every request under `/api/v1/` is reported to the configured
//! `RequestObserver` and must carry `Authorization: Bearer <token>` matching
//! the static credential. Failures short-circuit with a 401 envelope.

use crate::api::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::error::AppError;
use super::PROTECTED_PREFIX;

/// Receives every request entering the protected prefix, before the
/// credential is checked. Must not influence the outcome.
pub trait RequestObserver: Send + Sync {
    fn observe(&self, method: &Method, path: &str, headers: &HeaderMap);
}

/// Emits one `tracing` event per request with the full header set.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl RequestObserver for TracingObserver {
    fn observe(&self, method: &Method, path: &str, headers: &HeaderMap) {
        let headers: Vec<String> = headers
            .iter()
            .map(|(name, value)| {
                format!("{}: {}", name, String::from_utf8_lossy(value.as_bytes()))
            })
            .collect();
        tracing::info!(
            target: "ainasd::request",
            %method,
            path,
            headers = ?headers,
            "API request"
        );
    }
}

pub async fn require_bearer_token(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_owned();
    if !path.starts_with(PROTECTED_PREFIX) {
        return next.run(req).await;
    }

    if let Some(observer) = &state.observer {
        observer.observe(req.method(), &path, req.headers());
    }

    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    match state.credential.verify(authorization) {
        Ok(()) => next.run(req).await,
        Err(err) => {
            tracing::warn!(path = %path, reason = %err, "rejected unauthenticated request");
            AppError::from(err).into_response()
        }
    }
}
