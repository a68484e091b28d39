//! # account-cache
//!
//! Session storage implementing [`SessionAuthority`](account_core::SessionAuthority).
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Redis sessions**: tokens stored with a TTL, plus a per-user token set
//!   for forced logout
//! - **In-process sessions**: the same contract in a concurrent map, for
//!   single-node runs and tests
//!
//! ## Example
//!
//! ```ignore
//! use account_cache::{RedisPool, RedisPoolConfig, RedisSessionStore};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let sessions = RedisSessionStore::new(pool, 2_592_000);
//!
//! let token = sessions.issue(user_id).await?;
//! assert_eq!(sessions.resolve(&token).await?, Some(user_id));
//! ```

pub mod pool;
pub mod session;

// Re-export pool types
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};

// Re-export session types
pub use session::{generate_token, MemorySessionStore, RedisSessionStore, SessionData};
