pub mod endpoints;
pub mod root;

use axum::routing::get;
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(root::welcome))
        .route("/endpoints", get(endpoints::list))
        // Prefix used by the desktop client
        .route("/api/endpoint-management/endpoints", get(endpoints::list))
}
