//! Axum extractors for request handling
//!
//! Custom extractors for the session token, validation, and path ids.

mod path;
mod session;
mod validated;

pub use path::UserIdPath;
pub use session::{presented_token, Session};
pub use validated::ValidatedJson;
