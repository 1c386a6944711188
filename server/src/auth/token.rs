use thiserror::Error;

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("authentication failed: missing access token")]
    MissingToken,
    #[error("authentication failed: invalid or expired access token")]
    InvalidToken,
}

/// Extract the bearer value from an `Authorization` header.
///
/// Returns `None` when the header is absent, uses another scheme, or carries
/// only whitespace after the scheme.
pub fn parse_bearer(header: Option<&str>) -> Option<&str> {
    let token = header?.strip_prefix(BEARER_PREFIX)?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// The single static credential accepted by the gate.
#[derive(Clone)]
pub struct StaticCredential {
    token: String,
}

impl StaticCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }

    /// Verify the raw `Authorization` header value against the credential.
    pub fn verify(&self, header: Option<&str>) -> Result<(), AuthError> {
        let token = parse_bearer(header).ok_or(AuthError::MissingToken)?;
        if token != self.token {
            return Err(AuthError::InvalidToken);
        }
        Ok(())
    }
}

impl std::fmt::Debug for StaticCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredential")
            .field("token", &mask(&self.token))
            .finish()
    }
}

/// Render a token with everything but its first two characters hidden.
pub fn mask(token: &str) -> String {
    let visible: String = token.chars().take(2).collect();
    let hidden = token.chars().count().saturating_sub(2);
    format!("{}{}", visible, "*".repeat(hidden))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bearer() {
        assert_eq!(parse_bearer(Some("Bearer abc")), Some("abc"));
        assert_eq!(parse_bearer(Some("Bearer   abc  ")), Some("abc"));
        assert_eq!(parse_bearer(Some("Bearer ")), None);
        assert_eq!(parse_bearer(Some("Bearer    ")), None);
        assert_eq!(parse_bearer(Some("bearer abc")), None);
        assert_eq!(parse_bearer(Some("Basic abc")), None);
        assert_eq!(parse_bearer(None), None);
    }

    #[test]
    fn test_verify() {
        let credential = StaticCredential::new("ainas-token");
        assert_eq!(credential.verify(Some("Bearer ainas-token")), Ok(()));
        assert_eq!(credential.verify(None), Err(AuthError::MissingToken));
        assert_eq!(credential.verify(Some("Token ainas-token")), Err(AuthError::MissingToken));
        assert_eq!(credential.verify(Some("Bearer wrong")), Err(AuthError::InvalidToken));
        assert_eq!(credential.verify(Some("Bearer ainas-token2")), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_debug_masks_token() {
        let credential = StaticCredential::new("secret");
        let rendered = format!("{:?}", credential);
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("se****"));
    }
}
