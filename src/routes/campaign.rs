//! Campaign CRUD routes. Every path is served with and without a trailing slash.

use crate::handlers::campaign::{create, delete as delete_handler, list, partial_update, read, replace};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn campaign_routes(state: AppState) -> Router {
    Router::new()
        .route("/campaigns", get(list).post(create))
        .route("/campaigns/", get(list).post(create))
        .route(
            "/campaigns/:id",
            get(read).put(replace).patch(partial_update).delete(delete_handler),
        )
        .route(
            "/campaigns/:id/",
            get(read).put(replace).patch(partial_update).delete(delete_handler),
        )
        .with_state(state)
}
