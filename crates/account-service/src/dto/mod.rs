//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    FieldOrder, KickoutQuery, LoginRequest, RegisterRequest, UpdateProfileRequest,
};

pub use responses::{
    ApiResponse, DashboardResponse, HealthChecks, HealthResponse, LoginResponse,
    LoginStatusResponse, PermissionsResponse, ReadinessResponse, RegisterResponse, UserResponse,
};
