use async_trait::async_trait;
use chrono::Duration;
#[cfg(test)]
use mockall::automock;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::RegisterUserCommand;
use crate::domain::auth::models::StoredUser;
use crate::domain::auth::models::TokenPair;
use crate::domain::auth::models::Username;

/// Port for the authentication protocols (the two entry points of the core,
/// plus registration).
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify credentials and mint an access/refresh token pair.
    ///
    /// The refresh token is persisted to the store before the pair is
    /// returned; a persistence failure fails the whole login.
    ///
    /// # Errors
    /// * `BadCredentials` - Unknown user, wrong password, or empty input
    /// * `AccountDisabled` - User exists but is disabled
    /// * `RoleConfiguration` - User does not have exactly one authority
    /// * `Signing` / `Store` / `Database` - Infrastructure failure
    async fn login(&self, username: &str, password: &str) -> Result<TokenPair, AuthError>;

    /// Exchange a valid, store-present refresh token for a fresh pair,
    /// retiring the old token (rotation).
    ///
    /// # Errors
    /// * `ExpiredRefreshToken` - Token is well-formed but past its expiry
    /// * `InvalidRefreshToken` - Malformed, wrong category, or already
    ///   redeemed / never issued
    /// * `Signing` / `Store` - Infrastructure failure
    async fn reissue(&self, refresh_token: &str) -> Result<TokenPair, AuthError>;

    /// Register a new user with the default role.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is taken
    /// * `EmptyPassword` - Password was empty
    /// * `Password` / `Database` - Infrastructure failure
    async fn register(&self, command: RegisterUserCommand) -> Result<StoredUser, AuthError>;
}

/// Persistence port for registered users (the credential collaborator).
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CredentialRepository: Send + Sync + 'static {
    /// Retrieve a user by username; None if not registered.
    async fn find_by_username(&self, username: &str) -> Result<Option<StoredUser>, AuthError>;

    /// Persist a new user.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is taken
    /// * `Database` - Storage failure
    async fn create(&self, user: StoredUser) -> Result<StoredUser, AuthError>;

    /// Check whether a username is already registered.
    async fn exists_by_username(&self, username: &Username) -> Result<bool, AuthError>;
}

/// Port over the external TTL-keyed map holding live refresh tokens.
///
/// Membership here is the operational anti-replay control: a refresh token
/// that passes signature and expiry checks is still unusable once its record
/// is gone. Correct rotation depends on read-your-write consistency between
/// `put`, `delete`, and `exists` for a single key.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RefreshStore: Send + Sync + 'static {
    /// Upsert a refresh record with the given time-to-live.
    async fn put(&self, refresh_token: &str, username: &str, ttl: Duration)
        -> Result<(), AuthError>;

    /// Membership check.
    async fn exists(&self, refresh_token: &str) -> Result<bool, AuthError>;

    /// Idempotent removal; absent keys are not an error.
    async fn delete(&self, refresh_token: &str) -> Result<(), AuthError>;
}
