use async_trait::async_trait;
use chrono::Duration;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::RefreshStore;

/// Refresh-record store adapter over Redis.
///
/// Redis enforces the record lifetime through native key expiry, so the
/// store stays in lockstep with the refresh token's own validity window
/// without a reaper. Per-key atomicity of SET/EXISTS/DEL gives the
/// read-your-write consistency rotation depends on.
pub struct RedisRefreshStore {
    conn: ConnectionManager,
    prefix: String,
}

impl RedisRefreshStore {
    pub fn new(conn: ConnectionManager, prefix: impl Into<String>) -> Self {
        Self {
            conn,
            prefix: prefix.into(),
        }
    }

    fn key(&self, refresh_token: &str) -> String {
        format!("{}:{}", self.prefix, refresh_token)
    }
}

#[async_trait]
impl RefreshStore for RedisRefreshStore {
    async fn put(
        &self,
        refresh_token: &str,
        username: &str,
        ttl: Duration,
    ) -> Result<(), AuthError> {
        let key = self.key(refresh_token);
        let mut conn = self.conn.clone();
        let _: () = conn
            .set_ex(&key, username, ttl.num_seconds().max(1) as u64)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;
        Ok(())
    }

    async fn exists(&self, refresh_token: &str) -> Result<bool, AuthError> {
        let key = self.key(refresh_token);
        let mut conn = self.conn.clone();
        conn.exists(&key)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))
    }

    async fn delete(&self, refresh_token: &str) -> Result<(), AuthError> {
        let key = self.key(refresh_token);
        let mut conn = self.conn.clone();
        let _: () = conn
            .del(&key)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;
        Ok(())
    }
}
