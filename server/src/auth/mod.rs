pub mod policy;
pub mod token;

pub use policy::{PermissionPolicy, SystemFilePolicy};
pub use token::{mask, AuthError, StaticCredential};
