//! System routes
//!
//! Appliance status snapshot and unauthenticated server info.

use crate::api::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use super::envelope::Envelope;
use super::error::AppError;
use super::fixtures::system_status;
use super::PROTECTED_PREFIX;

// ============================================================================
// ROUTES
// ============================================================================

pub fn system_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/system/status", get(get_system_status))
        .route("/server/info", get(get_server_info))
}

// ============================================================================
// TYPES
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ServerInfo {
    name: String,
    version: String,
    api_prefix: &'static str,
}

// ============================================================================
// HANDLERS
// ============================================================================

async fn get_system_status() -> Result<Envelope, AppError> {
    Envelope::ok(system_status())
}

async fn get_server_info(State(state): State<AppState>) -> Json<ServerInfo> {
    Json(ServerInfo {
        name: state.config.server_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        api_prefix: PROTECTED_PREFIX,
    })
}
