//! Permission decisions for `auth/check-permission`.

/// Decides whether an action on a resource is allowed.
pub trait PermissionPolicy: Send + Sync {
    fn evaluate(&self, action: &str, resource_type: &str, resource_id: &str) -> bool;
}

/// Resource ids with this prefix are system files.
pub const SYSTEM_FILE_PREFIX: &str = "file_system_";

/// Grants everything except deleting system files.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemFilePolicy;

impl PermissionPolicy for SystemFilePolicy {
    fn evaluate(&self, action: &str, _resource_type: &str, resource_id: &str) -> bool {
        !(action == "delete" && resource_id.starts_with(SYSTEM_FILE_PREFIX))
    }
}
