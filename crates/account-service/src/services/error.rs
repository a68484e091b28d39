//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use account_common::AppError;
use account_core::DomainError;
use std::fmt;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation
    Domain(DomainError),

    /// Application error (auth, validation, etc.)
    App(AppError),

    /// Unknown username or wrong password; deliberately indistinguishable
    InvalidCredentials,

    /// Account is soft-deleted
    AccountDisabled,

    /// No valid session on the request
    NotAuthenticated,

    /// Authenticated, but lacking a permission
    PermissionDenied { permission: String },

    /// Authenticated, but lacking a role
    RoleRequired { role: String },

    /// Resource not found
    NotFound { resource: &'static str, id: String },

    /// Validation error
    Validation(String),

    /// Conflict (e.g., duplicate resource)
    Conflict(String),

    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::App(e) => write!(f, "{e}"),
            Self::InvalidCredentials => f.write_str("invalid username or password"),
            Self::AccountDisabled => f.write_str("account disabled"),
            Self::NotAuthenticated => f.write_str("not logged in"),
            Self::PermissionDenied { permission } => {
                write!(f, "missing permission: {permission}")
            }
            Self::RoleRequired { role } => write!(f, "missing role: {role}"),
            Self::NotFound { resource, id } => write!(f, "{resource} not found: {id}"),
            Self::Validation(msg) | Self::Conflict(msg) => f.write_str(msg),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::App(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a not found error
    pub fn not_found(resource: &'static str, id: impl fmt::Display) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(permission: impl Into<String>) -> Self {
        Self::PermissionDenied {
            permission: permission.into(),
        }
    }

    /// Create a missing role error
    pub fn role_required(role: impl Into<String>) -> Self {
        Self::RoleRequired { role: role.into() }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => e.status_code(),
            Self::App(e) => e.status_code(),
            Self::Validation(_) => 400,
            Self::InvalidCredentials | Self::NotAuthenticated => 401,
            Self::AccountDisabled | Self::PermissionDenied { .. } | Self::RoleRequired { .. } => {
                403
            }
            Self::NotFound { .. } => 404,
            Self::Conflict(_) => 409,
            Self::Internal(_) => 500,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::AccountDisabled => "ACCOUNT_DISABLED",
            Self::NotAuthenticated => "NOT_LOGGED_IN",
            Self::PermissionDenied { .. } => "MISSING_PERMISSION",
            Self::RoleRequired { .. } => "MISSING_ROLE",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::UsernameTaken => Self::conflict("username already exists"),
            DomainError::EmailTaken => Self::conflict("email already registered"),
            other => Self::Domain(other),
        }
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::App(e) => e,
            ServiceError::InvalidCredentials => AppError::InvalidCredentials,
            ServiceError::AccountDisabled => AppError::AccountDisabled,
            ServiceError::NotAuthenticated => AppError::MissingAuth,
            ServiceError::PermissionDenied { permission } => {
                AppError::InsufficientPermissions(permission)
            }
            ServiceError::RoleRequired { role } => {
                AppError::InsufficientPermissions(format!("role {role}"))
            }
            ServiceError::NotFound { resource, id } => {
                AppError::NotFound(format!("{resource} {id}"))
            }
            ServiceError::Validation(msg) => AppError::Validation(msg),
            ServiceError::Conflict(msg) => AppError::Conflict(msg),
            ServiceError::Internal(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
