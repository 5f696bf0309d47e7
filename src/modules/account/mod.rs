use axum::middleware;
use axum::routing::get;
use axum::Router;
use crate::state::AppState;

pub mod dto;
pub mod handler;
pub mod model;
pub mod repository;

pub fn router(state: AppState) -> axum::Router<AppState> {
    Router::new()
        .route("/me/usage", get(handler::get_my_usage))
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth::auth_middleware,
        ))
}
