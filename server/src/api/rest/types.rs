//! Shared types for REST API
//!
//! Request/response structs used by more than one endpoint module.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Total reported by every search fixture.
pub const FIXTURE_TOTAL: i64 = 150;

// ============================================================================
// SEARCH
// ============================================================================

/// Body of `files/search` and `media/ai-search`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub query: Option<String>,
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub space_type: Option<String>,
    pub media_type: Option<String>,
}

impl SearchQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page.unwrap_or(DEFAULT_PAGE),
            size: self.size.unwrap_or(DEFAULT_PAGE_SIZE),
            total: FIXTURE_TOTAL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub size: i64,
    pub total: i64,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}
