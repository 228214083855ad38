//! HTTP surface for the task list.
//!
//! # Responsibility
//! - Map `/v1/todos` routes onto `todo_core` commands and queries.
//! - Inject the authenticated owner into every command; never trust the body.
//! - Translate `CommandResult` outcomes into status codes.
//!
//! # Invariants
//! - Validation failures are 400, lookup misses 404, storage failures 500.
//! - Requests without a principal are rejected with 401 before any I/O.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, put};
use axum::Router;
use tokio::net::TcpListener;

pub use auth::AuthenticatedUser;
pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;
pub use state::{AppState, Clock, FixedClock, SystemClock};

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::app_info))
        .route(
            "/v1/todos",
            get(routes::list_all)
                .post(routes::create_todo)
                .put(routes::update_todo),
        )
        .route("/v1/todos/done", get(routes::list_done))
        .route("/v1/todos/undone", get(routes::list_undone))
        .route("/v1/todos/done/today", get(routes::done_today))
        .route("/v1/todos/undone/today", get(routes::undone_today))
        .route("/v1/todos/done/tomorrow", get(routes::done_tomorrow))
        .route("/v1/todos/undone/tomorrow", get(routes::undone_tomorrow))
        .route("/v1/todos/mark-as-done", put(routes::mark_as_done))
        .route("/v1/todos/mark-as-undone", put(routes::mark_as_undone))
        .with_state(state)
}

pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state)).await
}
