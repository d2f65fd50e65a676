use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::TokenCategory;
use super::claims::TokenClaims;
use super::errors::TokenError;

/// Codec for minting and validating signed tokens.
///
/// Owns the process-wide signing secret; constructed once at startup and
/// shared immutably, so no locking is required. Uses HS256 (HMAC with
/// SHA-256). Signature verification is pure cryptographic work with no
/// external I/O, which is what keeps token validation stateless and
/// horizontally scalable.
///
/// # Security Notes
/// - The secret should be at least 256 bits (32 bytes) for HS256
/// - Store secrets in environment variables or secure vaults, never in code
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenCodec {
    /// Create a new codec from the signing secret.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Mint a signed token carrying the given identity and lifetime.
    ///
    /// # Errors
    /// * `SigningFailed` - Token could not be signed
    pub fn mint(
        &self,
        category: TokenCategory,
        username: &str,
        role: &str,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let claims = TokenClaims::new(category, username, role, ttl);
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    /// Verify structure and signature, returning the claims.
    ///
    /// Does *not* check expiry; use [`TokenCodec::is_expired`] for that, so
    /// callers can distinguish a stale token from garbage input.
    ///
    /// # Errors
    /// * `InvalidSignature` - Signature does not match the secret
    /// * `Malformed` - Token is structurally invalid
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;

        let token_data = decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed(e.to_string()),
            })?;

        Ok(token_data.claims)
    }

    /// Report whether a verified token has expired.
    ///
    /// A token is expired once the current time reaches `exp`, so a token
    /// minted with a zero ttl is immediately expired.
    ///
    /// # Errors
    /// * `InvalidSignature` / `Malformed` - Token failed verification
    pub fn is_expired(&self, token: &str) -> Result<bool, TokenError> {
        let claims = self.verify(token)?;
        Ok(claims.exp <= Utc::now().timestamp())
    }

    /// Extract the `category` claim from a verified token.
    pub fn category(&self, token: &str) -> Result<TokenCategory, TokenError> {
        self.verify(token).map(|claims| claims.category)
    }

    /// Extract the `username` claim from a verified token.
    pub fn username(&self, token: &str) -> Result<String, TokenError> {
        self.verify(token).map(|claims| claims.username)
    }

    /// Extract the `role` claim from a verified token.
    pub fn role(&self, token: &str) -> Result<String, TokenError> {
        self.verify(token).map(|claims| claims.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_mint_and_verify_roundtrip() {
        let codec = TokenCodec::new(SECRET);

        let token = codec
            .mint(
                TokenCategory::Access,
                "alice",
                "ROLE_ADMIN",
                Duration::seconds(600),
            )
            .expect("Failed to mint token");

        let claims = codec.verify(&token).expect("Failed to verify token");
        assert_eq!(claims.category, TokenCategory::Access);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.role, "ROLE_ADMIN");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_accessors() {
        let codec = TokenCodec::new(SECRET);

        let token = codec
            .mint(
                TokenCategory::Refresh,
                "bob",
                "ROLE_USER",
                Duration::seconds(86400),
            )
            .expect("Failed to mint token");

        assert_eq!(codec.category(&token).unwrap(), TokenCategory::Refresh);
        assert_eq!(codec.username(&token).unwrap(), "bob");
        assert_eq!(codec.role(&token).unwrap(), "ROLE_USER");
    }

    #[test]
    fn test_zero_ttl_is_immediately_expired() {
        let codec = TokenCodec::new(SECRET);

        let token = codec
            .mint(TokenCategory::Access, "alice", "ROLE_USER", Duration::zero())
            .expect("Failed to mint token");

        assert!(codec.is_expired(&token).expect("Failed to check expiry"));
    }

    #[test]
    fn test_unexpired_token_reported_live() {
        let codec = TokenCodec::new(SECRET);

        let token = codec
            .mint(
                TokenCategory::Refresh,
                "alice",
                "ROLE_USER",
                Duration::seconds(86400),
            )
            .expect("Failed to mint token");

        assert!(!codec.is_expired(&token).expect("Failed to check expiry"));
    }

    #[test]
    fn test_verify_garbage_is_malformed() {
        let codec = TokenCodec::new(SECRET);

        let result = codec.verify("not.a.token");
        assert!(matches!(result, Err(TokenError::Malformed(_))));
    }

    #[test]
    fn test_verify_with_wrong_secret_fails() {
        let codec1 = TokenCodec::new(b"secret1_at_least_32_bytes_long_key!");
        let codec2 = TokenCodec::new(b"secret2_at_least_32_bytes_long_key!");

        let token = codec1
            .mint(
                TokenCategory::Access,
                "alice",
                "ROLE_USER",
                Duration::seconds(600),
            )
            .expect("Failed to mint token");

        assert_eq!(codec2.verify(&token), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_expiry_check_on_malformed_token_is_distinct() {
        let codec = TokenCodec::new(SECRET);

        // Stale vs garbage must be distinguishable by callers.
        let result = codec.is_expired("garbage");
        assert!(matches!(result, Err(TokenError::Malformed(_))));
    }
}
