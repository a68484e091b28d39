//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod auth;
pub mod bootstrap;
pub mod context;
pub mod directory;
pub mod error;
pub mod policy;
pub mod session;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

// Re-export all services for convenience
pub use auth::AuthService;
pub use bootstrap::{BootstrapService, SeedAccount, DEFAULT_ACCOUNTS};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use directory::DirectoryService;
pub use error::{ServiceError, ServiceResult};
pub use policy::PolicyResolver;
pub use session::RequestSession;
pub use user::UserService;
