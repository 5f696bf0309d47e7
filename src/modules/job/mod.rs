use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use crate::state::AppState;

pub mod dto;
pub mod error;
pub mod events;
pub mod handler;
pub mod model;
pub mod quota;
pub mod repository;
pub mod service;
pub mod title;

pub fn router(state: AppState) -> axum::Router<AppState> {
    // Creation accepts anonymous callers; the webhook authenticates with a
    // body signature instead of a bearer token.
    let create_routes = Router::new()
        .route("/", post(handler::create_job))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::auth::optional_auth_middleware,
        ));

    let protected_routes = Router::new()
        .route("/", get(handler::list_jobs))
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth::auth_middleware,
        ));

    let public_routes = Router::new()
        .route("/{id}", get(handler::get_job))
        .route("/{id}/webhook", post(handler::transcription_webhook));

    create_routes.merge(protected_routes).merge(public_routes)
}
