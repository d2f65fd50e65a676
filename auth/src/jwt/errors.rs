use thiserror::Error;

/// Error type for token operations.
///
/// `Expired` is kept distinct from `Malformed` so callers can branch on
/// stale versus garbage input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Token is malformed or not parseable: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,
}
