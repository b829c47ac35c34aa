//! Document structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` document struct matching the database row
//! - A create DTO carrying the caller-supplied fields
//!
//! JSON uses camelCase field names (`fullName`, `createdAt`).

pub mod client;
pub mod contact;
pub mod project;
pub mod subscriber;
