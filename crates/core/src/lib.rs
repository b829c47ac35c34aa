//! Domain building blocks shared by every landing backend crate.
//!
//! Nothing in here touches the database, the filesystem or HTTP.

pub mod error;
pub mod media;
pub mod types;
pub mod validation;
