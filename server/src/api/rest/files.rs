//! File routes
//!
//! Smart file search and batch file operations. Operations are validated and
//! reported as successful; nothing is moved, copied or deleted.

use crate::api::AppState;
use axum::{routing::post, Router};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::envelope::Envelope;
use super::error::AppError;
use super::extract::{is_blank, JsonBody};
use super::fixtures::{sample_file, FileItem};
use super::types::{SearchQuery, SearchResponse};

// ============================================================================
// ROUTES
// ============================================================================

pub fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/files/search", post(search_files))
        .route("/api/v1/files/actions", post(file_actions))
}

// ============================================================================
// TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    Move,
    Copy,
    Rename,
    Delete,
    CreateFolder,
}

impl FileAction {
    pub const ALL: [FileAction; 5] = [
        FileAction::Move,
        FileAction::Copy,
        FileAction::Rename,
        FileAction::Delete,
        FileAction::CreateFolder,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FileAction::Move => "move",
            FileAction::Copy => "copy",
            FileAction::Rename => "rename",
            FileAction::Delete => "delete",
            FileAction::CreateFolder => "create_folder",
        }
    }

    fn needs_sources(self) -> bool {
        matches!(
            self,
            FileAction::Delete | FileAction::Rename | FileAction::Move | FileAction::Copy
        )
    }

    fn needs_target(self) -> bool {
        matches!(
            self,
            FileAction::Move | FileAction::Copy | FileAction::CreateFolder
        )
    }

    fn needs_name(self) -> bool {
        matches!(self, FileAction::Rename | FileAction::CreateFolder)
    }
}

impl fmt::Display for FileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FileAction::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = FileAction::ALL.iter().map(|a| a.as_str()).collect();
                AppError::BadRequest(format!(
                    "invalid action '{}': expected one of {}",
                    s,
                    valid.join(", ")
                ))
            })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileActionRequest {
    pub action: Option<String>,
    pub source_file_ids: Option<Vec<String>>,
    pub target_folder_id: Option<String>,
    pub new_name: Option<String>,
}

/// A file action request that passed validation.
#[derive(Debug)]
pub struct ValidatedFileAction {
    pub action: FileAction,
    pub source_file_ids: Option<Vec<String>>,
}

impl FileActionRequest {
    /// Check the request; the first violation wins.
    pub fn validate(self) -> Result<ValidatedFileAction, AppError> {
        let action = match self.action.as_deref() {
            None | Some("") => return Err(AppError::missing("action")),
            Some(raw) => raw.parse::<FileAction>()?,
        };

        let has_sources = self
            .source_file_ids
            .as_ref()
            .map_or(false, |ids| !ids.is_empty());
        if action.needs_sources() && !has_sources {
            return Err(AppError::missing("sourceFileIds"));
        }
        if action.needs_target() && is_blank(&self.target_folder_id) {
            return Err(AppError::missing("targetFolderId"));
        }
        if action.needs_name() && is_blank(&self.new_name) {
            return Err(AppError::missing("newName"));
        }

        Ok(ValidatedFileAction {
            action,
            source_file_ids: self.source_file_ids,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileActionResponse {
    pub success_count: usize,
    pub fail_count: usize,
    pub failed_items: Vec<String>,
    pub operation_id: String,
}

/// `op_` followed by 12 lowercase hex characters.
pub fn new_operation_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("op_{}", &hex[..12])
}

// ============================================================================
// HANDLERS
// ============================================================================

async fn search_files(JsonBody(req): JsonBody<SearchQuery>) -> Result<Envelope, AppError> {
    if is_blank(&req.query) {
        return Err(AppError::missing("query"));
    }

    let response: SearchResponse<FileItem> = SearchResponse {
        items: vec![sample_file(req.space_type.as_deref())],
        pagination: req.pagination(),
    };
    Envelope::ok(response)
}

async fn file_actions(JsonBody(req): JsonBody<FileActionRequest>) -> Result<Envelope, AppError> {
    let validated = req.validate()?;
    let success_count = validated.source_file_ids.as_ref().map_or(1, Vec::len);

    tracing::debug!(action = %validated.action, success_count, "file action accepted");

    Envelope::ok(FileActionResponse {
        success_count,
        fail_count: 0,
        failed_items: Vec::new(),
        operation_id: new_operation_id(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(action: &str) -> FileActionRequest {
        FileActionRequest {
            action: Some(action.to_string()),
            ..Default::default()
        }
    }

    fn message(result: Result<ValidatedFileAction, AppError>) -> String {
        result.unwrap_err().to_string()
    }

    #[test]
    fn test_action_parse() {
        assert_eq!("create_folder".parse::<FileAction>().unwrap(), FileAction::CreateFolder);
        assert!("MOVE".parse::<FileAction>().is_err());
    }

    #[test]
    fn test_missing_action() {
        assert!(message(FileActionRequest::default().validate()).contains("action is required"));
        assert!(message(request("").validate()).contains("action is required"));
    }

    #[test]
    fn test_invalid_action_lists_enum() {
        let msg = message(request("archive").validate());
        assert!(msg.contains("move, copy, rename, delete, create_folder"));
    }

    #[test]
    fn test_invalid_action_wins_over_missing_fields() {
        let msg = message(request("shred").validate());
        assert!(msg.starts_with("invalid action"));
    }

    #[test]
    fn test_move_requires_sources_then_target() {
        assert!(message(request("move").validate()).contains("sourceFileIds"));

        let mut req = request("move");
        req.source_file_ids = Some(vec!["f1".into()]);
        assert!(message(req.validate()).contains("targetFolderId"));
    }

    #[test]
    fn test_empty_sources_count_as_missing() {
        let mut req = request("delete");
        req.source_file_ids = Some(Vec::new());
        assert!(message(req.validate()).contains("sourceFileIds"));
    }

    #[test]
    fn test_rename_requires_new_name() {
        let mut req = request("rename");
        req.source_file_ids = Some(vec!["f1".into()]);
        assert!(message(req.validate()).contains("newName"));
        req = request("rename");
        req.source_file_ids = Some(vec!["f1".into()]);
        req.new_name = Some("new.txt".into());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_folder_needs_no_sources() {
        let mut req = request("create_folder");
        req.target_folder_id = Some("folder_000".into());
        assert!(message(req.validate()).contains("newName"));

        let mut req = request("create_folder");
        req.target_folder_id = Some("folder_000".into());
        req.new_name = Some("New folder".into());
        let validated = req.validate().unwrap();
        assert_eq!(validated.action, FileAction::CreateFolder);
        assert!(validated.source_file_ids.is_none());
    }

    #[test]
    fn test_delete_only_needs_sources() {
        let mut req = request("delete");
        req.source_file_ids = Some(vec!["file_789".into()]);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_operation_id_format() {
        let id = new_operation_id();
        assert_eq!(id.len(), 15);
        assert!(id.starts_with("op_"));
        assert!(id[3..].chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
        assert_ne!(id, new_operation_id());
    }
}
