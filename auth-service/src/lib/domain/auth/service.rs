use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenCategory;
use auth::TokenCodec;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::Identity;
use crate::domain::auth::models::RegisterUserCommand;
use crate::domain::auth::models::StoredUser;
use crate::domain::auth::models::TokenPair;
use crate::domain::auth::models::TokenPolicy;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::CredentialRepository;
use crate::domain::auth::ports::RefreshStore;

/// Role granted to newly registered users.
const DEFAULT_ROLE: &str = "ROLE_USER";

/// Domain service implementing the token lifecycle protocols.
///
/// Holds no mutable state; the codec's signing key is immutable and the
/// refresh store is the only shared resource, external behind its port.
pub struct AuthService<CR, RS>
where
    CR: CredentialRepository,
    RS: RefreshStore,
{
    credentials: Arc<CR>,
    refresh_store: Arc<RS>,
    codec: Arc<TokenCodec>,
    password_hasher: PasswordHasher,
    policy: TokenPolicy,
}

impl<CR, RS> AuthService<CR, RS>
where
    CR: CredentialRepository,
    RS: RefreshStore,
{
    pub fn new(
        credentials: Arc<CR>,
        refresh_store: Arc<RS>,
        codec: Arc<TokenCodec>,
        policy: TokenPolicy,
    ) -> Self {
        Self {
            credentials,
            refresh_store,
            codec,
            password_hasher: PasswordHasher::new(),
            policy,
        }
    }

    /// The authentication gate: verify submitted credentials against the
    /// credential store and produce an identity with its single authority.
    async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Identity, AuthError> {
        // Empty input is rejected before any storage round trip.
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::BadCredentials);
        }

        let user = self
            .credentials
            .find_by_username(username)
            .await?
            .ok_or(AuthError::BadCredentials)?;

        if !user.enabled {
            return Err(AuthError::AccountDisabled(username.to_string()));
        }

        if !self.password_hasher.verify(password, &user.password_hash)? {
            return Err(AuthError::BadCredentials);
        }

        // Exactly one role per user; anything else is a provisioning fault,
        // not a client error.
        let role = match user.roles.as_slice() {
            [role] => role.clone(),
            roles => {
                return Err(AuthError::RoleConfiguration {
                    username: user.username.to_string(),
                    count: roles.len(),
                })
            }
        };

        Ok(Identity {
            username: user.username.to_string(),
            role,
        })
    }

    fn mint_pair(&self, username: &str, role: &str) -> Result<TokenPair, AuthError> {
        let access = self
            .codec
            .mint(TokenCategory::Access, username, role, self.policy.access_ttl)?;
        let refresh = self.codec.mint(
            TokenCategory::Refresh,
            username,
            role,
            self.policy.refresh_ttl,
        )?;

        Ok(TokenPair { access, refresh })
    }
}

#[async_trait]
impl<CR, RS> AuthServicePort for AuthService<CR, RS>
where
    CR: CredentialRepository,
    RS: RefreshStore,
{
    async fn login(&self, username: &str, password: &str) -> Result<TokenPair, AuthError> {
        let identity = match self.verify_credentials(username, password).await {
            Ok(identity) => identity,
            Err(e) => {
                tracing::warn!(username, error = %e, "Login rejected");
                return Err(e);
            }
        };

        let pair = self.mint_pair(&identity.username, &identity.role)?;

        // A minted refresh token that is never persisted would pass the
        // signature and expiry checks at reissue but fail the membership
        // check, silently locking the client out. A put failure therefore
        // fails the whole login.
        self.refresh_store
            .put(&pair.refresh, &identity.username, self.policy.refresh_ttl)
            .await?;

        tracing::info!(username = %identity.username, role = %identity.role, "Login succeeded");

        Ok(pair)
    }

    async fn reissue(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        // Structural checks run before the store round trip.
        match self.codec.is_expired(refresh_token) {
            Ok(false) => {}
            Ok(true) => return Err(AuthError::ExpiredRefreshToken),
            // Malformed or badly signed input is a client fault here.
            Err(_) => return Err(AuthError::InvalidRefreshToken),
        }

        let claims = self
            .codec
            .verify(refresh_token)
            .map_err(|_| AuthError::InvalidRefreshToken)?;

        // Blocks an access token from ever minting new tokens.
        if claims.category != TokenCategory::Refresh {
            return Err(AuthError::InvalidRefreshToken);
        }

        // Membership is the anti-replay checkpoint: a cryptographically valid
        // and unexpired token that was already redeemed is gone from here.
        if !self.refresh_store.exists(refresh_token).await? {
            tracing::warn!("Reissue rejected: refresh token not present in store");
            return Err(AuthError::InvalidRefreshToken);
        }

        let pair = self.mint_pair(&claims.username, &claims.role)?;

        // Old and new keys are distinct values, so delete-then-insert leaves
        // no window in which a concurrent request on a different token sees
        // neither record.
        self.refresh_store.delete(refresh_token).await?;
        self.refresh_store
            .put(&pair.refresh, &claims.username, self.policy.refresh_ttl)
            .await?;

        tracing::info!(username = %claims.username, "Refresh token rotated");

        Ok(pair)
    }

    async fn register(&self, command: RegisterUserCommand) -> Result<StoredUser, AuthError> {
        if command.password.is_empty() {
            return Err(AuthError::EmptyPassword);
        }

        if self
            .credentials
            .exists_by_username(&command.username)
            .await?
        {
            return Err(AuthError::UsernameAlreadyExists(command.username.to_string()));
        }

        let password_hash = self.password_hasher.hash(&command.password)?;

        let user = StoredUser {
            id: Uuid::new_v4(),
            username: command.username,
            password_hash,
            roles: vec![DEFAULT_ROLE.to_string()],
            enabled: true,
            created_at: Utc::now(),
        };

        let created = self.credentials.create(user).await?;

        tracing::info!(username = %created.username, "User registered");

        Ok(created)
    }
}
