//! Repository implementations
//!
//! Implementations of the [`UserRepository`](account_core::UserRepository)
//! port: PostgreSQL and in-process.

mod error;
mod memory;
mod user;

pub use memory::MemoryUserRepository;
pub use user::PgUserRepository;
