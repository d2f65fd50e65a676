//! Authentication utilities library
//!
//! Provides the stateless building blocks of the token lifecycle:
//! - JWT minting and validation with an access/refresh category claim
//! - Password hashing (Argon2id)
//!
//! The service crate composes these with its credential and refresh-token
//! stores; nothing in this library performs I/O.
//!
//! # Examples
//!
//! ```
//! use auth::{TokenCategory, TokenCodec};
//! use chrono::Duration;
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let token = codec
//!     .mint(TokenCategory::Access, "alice", "ROLE_USER", Duration::seconds(600))
//!     .unwrap();
//!
//! let claims = codec.verify(&token).unwrap();
//! assert_eq!(claims.username, "alice");
//! assert!(!codec.is_expired(&token).unwrap());
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::TokenCategory;
pub use jwt::TokenClaims;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use password::PasswordError;
pub use password::PasswordHasher;
