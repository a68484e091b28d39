//! Domain entities

mod user;

pub use user::{AccountStatus, NewUser, User};
