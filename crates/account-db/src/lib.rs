//! # account-db
//!
//! Record store layer implementing [`UserRepository`](account_core::UserRepository).
//!
//! ## Overview
//!
//! - PostgreSQL via SQLx: connection pool, schema migration, `FromRow` models,
//!   entity ↔ model mappers, and [`PgUserRepository`]
//! - [`MemoryUserRepository`], an in-process store with the same uniqueness
//!   guarantees, for local runs and tests
//!
//! ## Usage
//!
//! ```rust,ignore
//! use account_common::AppConfig;
//! use account_db::{create_pool, run_migrations, DatabaseConfig, PgUserRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let app = AppConfig::from_env()?;
//!     let database = app.storage.database.ok_or("DATABASE_URL is not set")?;
//!     let pool = create_pool(&DatabaseConfig::from(&database)).await?;
//!     run_migrations(&pool).await?;
//!     let users = PgUserRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{MemoryUserRepository, PgUserRepository};
