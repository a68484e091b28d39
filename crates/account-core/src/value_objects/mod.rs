//! Value objects - immutable types that represent domain concepts

mod access;
mod user_id;

pub use access::{AccessPolicy, permission, role};
pub use user_id::{Subject, UserId, UserIdParseError};
