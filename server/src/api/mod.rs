pub mod rest;

use crate::auth::{PermissionPolicy, StaticCredential, SystemFilePolicy};
use crate::config::Config;
use std::sync::Arc;

pub use rest::{RequestObserver, TracingObserver};

/// Read-only context shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub credential: StaticCredential,
    pub policy: Arc<dyn PermissionPolicy>,
    /// Header logging hook for the protected prefix; `None` disables it.
    pub observer: Option<Arc<dyn RequestObserver>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let observer: Option<Arc<dyn RequestObserver>> = if config.log_request_headers {
            Some(Arc::new(TracingObserver))
        } else {
            None
        };

        Self {
            credential: StaticCredential::new(config.access_token.clone()),
            policy: Arc::new(SystemFilePolicy),
            observer,
            config,
        }
    }

    #[cfg(test)]
    pub fn with_policy(mut self, policy: Arc<dyn PermissionPolicy>) -> Self {
        self.policy = policy;
        self
    }

    #[cfg(test)]
    pub fn with_observer(mut self, observer: Arc<dyn RequestObserver>) -> Self {
        self.observer = Some(observer);
        self
    }
}
