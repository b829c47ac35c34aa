//! Landing page API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes) so the
//! integration tests and the binary entrypoint share one router.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod state;
