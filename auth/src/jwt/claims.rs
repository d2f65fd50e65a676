use std::fmt;

use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Purpose of a token, carried as the `category` claim.
///
/// An access token must never be accepted where a refresh token is required,
/// and vice versa; every validation path checks this claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenCategory {
    /// Short-lived bearer credential authorizing API calls.
    Access,
    /// Long-lived credential exchanged for a fresh token pair; single-use.
    Refresh,
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenCategory::Access => write!(f, "access"),
            TokenCategory::Refresh => write!(f, "refresh"),
        }
    }
}

/// Claims carried inside every signed token.
///
/// Tokens are immutable once minted; validity is a pure function of the
/// signature and the current time against `exp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Token purpose (access vs refresh).
    pub category: TokenCategory,

    /// Owning user identity.
    pub username: String,

    /// The single authority granted to this user (e.g. "ROLE_USER").
    pub role: String,

    /// Issued at (Unix timestamp, seconds).
    pub iat: i64,

    /// Expiration time (Unix timestamp, seconds). Always greater than `iat`
    /// for any positive ttl.
    pub exp: i64,
}

impl TokenClaims {
    /// Build claims for a token minted now with the given lifetime.
    pub fn new(
        category: TokenCategory,
        username: impl Into<String>,
        role: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        let now = Utc::now();
        Self {
            category,
            username: username.into(),
            role: role.into(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims_lifetime() {
        let claims = TokenClaims::new(
            TokenCategory::Access,
            "alice",
            "ROLE_USER",
            Duration::seconds(600),
        );

        assert_eq!(claims.category, TokenCategory::Access);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.role, "ROLE_USER");
        assert_eq!(claims.exp - claims.iat, 600);
    }

    #[test]
    fn test_category_serializes_lowercase() {
        let access = serde_json::to_value(TokenCategory::Access).unwrap();
        let refresh = serde_json::to_value(TokenCategory::Refresh).unwrap();

        assert_eq!(access, "access");
        assert_eq!(refresh, "refresh");
    }

    #[test]
    fn test_category_display() {
        assert_eq!(TokenCategory::Access.to_string(), "access");
        assert_eq!(TokenCategory::Refresh.to_string(), "refresh");
    }
}
