pub mod clients;
pub mod contact;
pub mod health;
pub mod projects;
pub mod subscribers;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                 list, create (multipart, 450x350 image)
/// /clients                  list, create (multipart, 300x300 image)
/// /contact                  list, create (JSON)
/// /subscribers              list, subscribe (JSON, idempotent)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", projects::router())
        .nest("/clients", clients::router())
        .nest("/contact", contact::router())
        .nest("/subscribers", subscribers::router())
}
