//! Session tokens held in process memory.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use account_core::traits::{RepoResult, SessionAuthority};
use account_core::UserId;
use async_trait::async_trait;
use dashmap::DashMap;
use tracing::instrument;

use super::generate_token;

#[derive(Debug, Clone, Copy)]
struct SessionEntry {
    user_id: UserId,
    /// `None` when the lifetime is past what `Instant` can represent
    expires_at: Option<Instant>,
}

impl SessionEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// In-process session authority with per-token expiry
#[derive(Debug)]
pub struct MemorySessionStore {
    sessions: DashMap<String, SessionEntry>,
    user_sessions: DashMap<UserId, HashSet<String>>,
    ttl: Duration,
}

impl MemorySessionStore {
    /// Create a store whose sessions expire after `ttl_seconds`
    #[must_use]
    pub fn new(ttl_seconds: u64) -> Self {
        Self::with_ttl(Duration::from_secs(ttl_seconds))
    }

    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            user_sessions: DashMap::new(),
            ttl,
        }
    }

    /// Number of stored tokens, expired ones not yet pruned included
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn unlink(&self, user_id: UserId, token: &str) {
        if let Some(mut tokens) = self.user_sessions.get_mut(&user_id) {
            tokens.remove(token);
        }
        self.user_sessions
            .remove_if(&user_id, |_, tokens| tokens.is_empty());
    }
}

#[async_trait]
impl SessionAuthority for MemorySessionStore {
    #[instrument(skip(self))]
    async fn issue(&self, subject: UserId) -> RepoResult<String> {
        let token = generate_token();
        self.sessions.insert(
            token.clone(),
            SessionEntry {
                user_id: subject,
                expires_at: Instant::now().checked_add(self.ttl),
            },
        );
        self.user_sessions
            .entry(subject)
            .or_default()
            .insert(token.clone());

        tracing::debug!(user_id = %subject, "Session issued");
        Ok(token)
    }

    #[instrument(skip_all)]
    async fn resolve(&self, token: &str) -> RepoResult<Option<UserId>> {
        let now = Instant::now();
        let Some(entry) = self.sessions.get(token).map(|e| *e) else {
            return Ok(None);
        };

        if entry.is_expired(now) {
            self.sessions.remove(token);
            self.unlink(entry.user_id, token);
            return Ok(None);
        }
        Ok(Some(entry.user_id))
    }

    #[instrument(skip_all)]
    async fn invalidate(&self, token: &str) -> RepoResult<bool> {
        let Some((_, entry)) = self.sessions.remove(token) else {
            return Ok(false);
        };
        self.unlink(entry.user_id, token);
        Ok(!entry.is_expired(Instant::now()))
    }

    #[instrument(skip(self))]
    async fn force_invalidate(&self, subject: UserId) -> RepoResult<usize> {
        let now = Instant::now();
        let tokens = self
            .user_sessions
            .remove(&subject)
            .map(|(_, tokens)| tokens)
            .unwrap_or_default();

        let count = tokens
            .iter()
            .filter_map(|token| self.sessions.remove(token))
            .filter(|(_, entry)| !entry.is_expired(now))
            .count();

        tracing::info!(user_id = %subject, count, "Ended all sessions for user");
        Ok(count)
    }

    async fn health_check(&self) -> RepoResult<()> {
        Ok(())
    }
}
