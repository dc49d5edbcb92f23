use axum::Router;

use api::routes::routes;
use common::state::AppState;
use db::test_utils::setup_test_db;

/// Router backed by a fresh in-memory database, plus the state for seeding.
pub async fn make_test_app() -> (Router, AppState) {
    let app_state = AppState::new(setup_test_db().await);

    let router = Router::new()
        .nest("/api", routes())
        .with_state(app_state.clone());

    (router, app_state)
}
