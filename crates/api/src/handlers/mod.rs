//! Request handlers for the landing page documents.
//!
//! Each submodule provides the async handler functions for a single document
//! type. Handlers talk to the shared [`Store`](landing_db::Store), run image
//! uploads through the pipeline, and map errors via
//! [`AppError`](crate::error::AppError).

pub mod client;
pub mod contact;
pub mod project;
pub mod subscriber;
pub mod upload_form;
