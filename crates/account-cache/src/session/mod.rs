//! Session storage module.
//!
//! Two implementations of the session authority:
//! - [`RedisSessionStore`]: tokens shared by every node
//! - [`MemorySessionStore`]: tokens held by this process

mod memory_store;
mod redis_store;

pub use memory_store::MemorySessionStore;
pub use redis_store::{RedisSessionStore, SessionData};

/// Generate a new opaque session token
pub fn generate_token() -> String {
    uuid::Uuid::new_v4().to_string()
}
