//! Permission routes
//!
//! Answers whether an action on a resource would be allowed. The decision
//! comes from the `PermissionPolicy` held in `AppState`.

use crate::api::AppState;
use axum::{extract::State, routing::post, Router};
use serde::{Deserialize, Serialize};

use super::envelope::Envelope;
use super::error::AppError;
use super::extract::JsonBody;

pub fn permission_routes() -> Router<AppState> {
    Router::new().route("/api/v1/auth/check-permission", post(check_permission))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionCheckRequest {
    pub action: Option<String>,
    pub resource_type: Option<String>,
    pub resource_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PermissionCheckResponse {
    pub granted: bool,
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

async fn check_permission(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<PermissionCheckRequest>,
) -> Result<Envelope, AppError> {
    let (Some(action), Some(resource_type), Some(resource_id)) = (
        required(req.action),
        required(req.resource_type),
        required(req.resource_id),
    ) else {
        return Err(AppError::missing("action / resourceType / resourceId"));
    };

    let granted = state.policy.evaluate(&action, &resource_type, &resource_id);
    tracing::debug!(%action, %resource_type, %resource_id, granted, "permission evaluated");

    Envelope::ok(PermissionCheckResponse { granted })
}
