use auth::PasswordError;
use auth::TokenError;
use thiserror::Error;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error(
        "Username contains invalid characters (only alphanumeric, underscore, and hyphen allowed)"
    )]
    InvalidCharacters,
}

/// Top-level error for the authentication protocols.
///
/// The three refresh-token variants render as the exact reason strings the
/// reissue endpoint returns in its 400 body; unknown vs forged tokens are
/// deliberately not distinguished to the client.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // Client faults
    #[error("Invalid credentials")]
    BadCredentials,

    #[error("Account is disabled: {0}")]
    AccountDisabled(String),

    #[error("refresh token null")]
    MissingRefreshToken,

    #[error("refresh token expired")]
    ExpiredRefreshToken,

    #[error("invalid refresh token")]
    InvalidRefreshToken,

    #[error("Username already exists: {0}")]
    UsernameAlreadyExists(String),

    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Password must not be empty")]
    EmptyPassword,

    // Server-side faults
    #[error("User {username} has {count} authorities, expected exactly one")]
    RoleConfiguration { username: String, count: usize },

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("Refresh store error: {0}")]
    Store(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            // Minting is the only codec operation the protocols surface as a
            // server fault; validation failures are mapped at the call site.
            TokenError::SigningFailed(msg) => AuthError::Signing(msg),
            TokenError::Expired => AuthError::ExpiredRefreshToken,
            TokenError::InvalidSignature | TokenError::Malformed(_) => {
                AuthError::InvalidRefreshToken
            }
        }
    }
}
