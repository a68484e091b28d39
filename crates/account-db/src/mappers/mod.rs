//! Entity to model mappers
//!
//! - `From<Model> for Entity`: convert database rows to domain objects

mod user;
