//! Ports implemented by the infrastructure crates

mod repositories;
mod session;

pub use repositories::{RepoResult, UserRepository};
pub use session::SessionAuthority;
