//! Session tokens stored in Redis.
//!
//! Each token is a key holding the session payload, expiring after the
//! session timeout. A per-user set lists the user's tokens so that every
//! session can be ended at once.

use account_core::traits::{RepoResult, SessionAuthority};
use account_core::UserId;
use async_trait::async_trait;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::generate_token;
use crate::pool::{RedisPool, RedisResult};

/// Key prefix for session tokens
const SESSION_PREFIX: &str = "session:";

/// Key prefix for a user's token set
const USER_SESSIONS_PREFIX: &str = "user_sessions:";

/// Stored session payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    /// Subject this token belongs to
    pub user_id: UserId,
    /// Issue timestamp (Unix epoch seconds)
    pub created_at: i64,
}

impl SessionData {
    #[must_use]
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            created_at: chrono::Utc::now().timestamp(),
        }
    }
}

/// Redis-backed session authority
#[derive(Clone)]
pub struct RedisSessionStore {
    pool: RedisPool,
    ttl_seconds: u64,
}

impl RedisSessionStore {
    /// Create a store whose sessions expire after `ttl_seconds`
    #[must_use]
    pub fn new(pool: RedisPool, ttl_seconds: u64) -> Self {
        Self { pool, ttl_seconds }
    }

    /// Generate Redis key for a session token
    fn key(token: &str) -> String {
        format!("{SESSION_PREFIX}{token}")
    }

    /// Generate Redis key for a user's token set
    fn user_key(user_id: UserId) -> String {
        format!("{USER_SESSIONS_PREFIX}{user_id}")
    }

    async fn store(&self, token: &str, data: &SessionData) -> RedisResult<()> {
        self.pool
            .set(&Self::key(token), data, Some(self.ttl_seconds))
            .await?;

        let user_key = Self::user_key(data.user_id);
        let mut conn = self.pool.get().await?;
        conn.sadd::<_, _, ()>(&user_key, token).await?;
        conn.expire::<_, ()>(&user_key, i64::try_from(self.ttl_seconds).unwrap_or(i64::MAX))
            .await?;
        Ok(())
    }

    async fn remove(&self, token: &str) -> RedisResult<bool> {
        if let Some(data) = self.pool.get_value::<SessionData>(&Self::key(token)).await? {
            let mut conn = self.pool.get().await?;
            conn.srem::<_, _, ()>(Self::user_key(data.user_id), token)
                .await?;
        }
        self.pool.delete(&Self::key(token)).await
    }

    async fn remove_all(&self, user_id: UserId) -> RedisResult<usize> {
        let user_key = Self::user_key(user_id);
        let mut conn = self.pool.get().await?;

        let tokens: Vec<String> = conn.smembers(&user_key).await?;
        let keys: Vec<String> = tokens.iter().map(|t| Self::key(t)).collect();
        // Set members may outlive their expired tokens; count what was live
        let count = self.pool.delete_many(&keys).await?;

        conn.del::<_, ()>(&user_key).await?;
        Ok(count)
    }
}

#[async_trait]
impl SessionAuthority for RedisSessionStore {
    #[instrument(skip(self))]
    async fn issue(&self, subject: UserId) -> RepoResult<String> {
        let token = generate_token();
        self.store(&token, &SessionData::new(subject)).await?;
        tracing::debug!(user_id = %subject, "Session issued");
        Ok(token)
    }

    #[instrument(skip_all)]
    async fn resolve(&self, token: &str) -> RepoResult<Option<UserId>> {
        let data = self
            .pool
            .get_value::<SessionData>(&Self::key(token))
            .await?;
        Ok(data.map(|d| d.user_id))
    }

    #[instrument(skip_all)]
    async fn invalidate(&self, token: &str) -> RepoResult<bool> {
        let removed = self.remove(token).await?;
        if removed {
            tracing::debug!("Session invalidated");
        }
        Ok(removed)
    }

    #[instrument(skip(self))]
    async fn force_invalidate(&self, subject: UserId) -> RepoResult<usize> {
        let count = self.remove_all(subject).await?;
        tracing::info!(user_id = %subject, count, "Ended all sessions for user");
        Ok(count)
    }

    async fn health_check(&self) -> RepoResult<()> {
        self.pool.health_check().await?;
        Ok(())
    }
}
