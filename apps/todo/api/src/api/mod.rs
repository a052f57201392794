use axum::Router;

pub mod health;
pub mod todo_items;

/// Creates the API routes.
///
/// Returns a stateless Router (all sub-routers have state already applied).
/// Domain routers carry absolute paths, so they are merged, not nested.
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new().merge(todo_items::router(state))
}

/// Creates a router with the /ready endpoint that performs actual health checks.
///
/// This router has state applied and can be merged with the stateless app router
/// from `create_router`.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
