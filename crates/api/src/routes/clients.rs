//! Route definitions for the `/clients` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::client;
use crate::state::AppState;

/// Routes mounted at `/clients`.
///
/// ```text
/// GET    /    -> list
/// POST   /    -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(client::list).post(client::create))
}
