//! # account-core
//!
//! Domain layer containing the user entity, value objects, the access policy,
//! and the ports (record store, session authority) implemented by the
//! infrastructure crates. This crate has zero dependencies on infrastructure
//! (database, cache, web framework).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{AccountStatus, NewUser, User};
pub use error::DomainError;
pub use traits::{RepoResult, SessionAuthority, UserRepository};
pub use value_objects::{
    AccessPolicy, Subject, UserId, UserIdParseError, permission, role,
};
