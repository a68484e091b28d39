//! # account-service
//!
//! Application layer: the user directory, the authorization policy
//! resolver, the account lifecycle services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    AuthService, BootstrapService, DirectoryService, PolicyResolver, RequestSession,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, UserService,
};
