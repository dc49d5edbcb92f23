//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → Health check endpoint (public)
//! - `/courses/{course_id}/reviews` → Review submission (authenticated) and
//!   average rating (public)
//! - `/reviews` → Full review listing with reviewer/course details (public)

use axum::Router;
use common::state::AppState;

pub mod courses;
pub mod health;
pub mod reviews;

/// Builds the complete application router for all HTTP endpoints.
///
/// The returned router has `AppState` as its state type and mounts all core
/// API routes under their respective base paths. Authentication is applied
/// per route rather than per group: only review submission requires a caller.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/health", health::health_routes())
        .nest("/courses", courses::course_routes())
        .nest("/reviews", reviews::review_routes())
}
