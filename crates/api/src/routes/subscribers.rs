use axum::routing::get;
use axum::Router;

use crate::handlers::subscriber;
use crate::state::AppState;

/// Routes mounted at `/subscribers`.
///
/// ```text
/// GET    /    -> list
/// POST   /    -> subscribe (201 new, 200 already subscribed)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(subscriber::list).post(subscriber::subscribe))
}
