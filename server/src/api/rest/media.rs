//! Media routes
//!
//! Semantic photo/video search and album category listing.

use crate::api::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query},
    routing::{get, post},
    Router,
};
use serde::Serialize;

use super::envelope::Envelope;
use super::error::AppError;
use super::extract::{is_blank, JsonBody};
use super::fixtures::{sample_media, AlbumCategory, MediaItem, ALBUM_CATEGORIES};
use super::types::{SearchQuery, SearchResponse};

// ============================================================================
// ROUTES
// ============================================================================

pub fn media_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/media/ai-search", post(search_media))
        .route("/api/v1/media/albums/categories", get(list_categories))
}

// ============================================================================
// TYPES
// ============================================================================

/// Query parameter naming the category kind: person, pet, scene or location.
const KIND_PARAM: &str = "type";

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<AlbumCategory>,
}

/// Categories matching `kind` exactly; an absent or empty filter keeps all.
pub fn filter_categories(kind: Option<&str>) -> Vec<AlbumCategory> {
    ALBUM_CATEGORIES
        .iter()
        .filter(|category| match kind {
            Some(kind) if !kind.is_empty() => category.kind == kind,
            _ => true,
        })
        .cloned()
        .collect()
}

// ============================================================================
// HANDLERS
// ============================================================================

async fn search_media(JsonBody(req): JsonBody<SearchQuery>) -> Result<Envelope, AppError> {
    if is_blank(&req.query) {
        return Err(AppError::missing("query"));
    }

    let response: SearchResponse<MediaItem> = SearchResponse {
        items: vec![sample_media(req.media_type.as_deref())],
        pagination: req.pagination(),
    };
    Envelope::ok(response)
}

/// First `type` value in the query pairs; later repeats are ignored.
pub fn first_kind(pairs: &[(String, String)]) -> Option<&str> {
    pairs
        .iter()
        .find(|(key, _)| key == KIND_PARAM)
        .map(|(_, value)| value.as_str())
}

async fn list_categories(
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Envelope, AppError> {
    // An unreadable query string is treated as no filter.
    let pairs = match query {
        Ok(Query(pairs)) => pairs,
        Err(rejection) => {
            tracing::debug!("ignoring unreadable category query: {}", rejection);
            Vec::new()
        }
    };
    Envelope::ok(CategoriesResponse {
        categories: filter_categories(first_kind(&pairs)),
    })
}
