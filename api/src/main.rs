use std::net::SocketAddr;

use axum::{
    Router,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    middleware::from_fn,
};
use tower_http::cors::CorsLayer;

use api::auth::middleware::log_request;
use api::routes::routes;
use common::state::AppState;
use common::{config, logger};

#[tokio::main]
async fn main() {
    // The guard must outlive the server or the file writer flushes early.
    let _log_guard = logger::init_logging();

    let app_state = AppState::new(db::connect().await);

    let cors = CorsLayer::very_permissive().expose_headers([CONTENT_DISPOSITION, CONTENT_TYPE]);

    let app = Router::new()
        .nest("/api", routes())
        .layer(from_fn(log_request))
        .layer(cors)
        .with_state(app_state);

    let addr: SocketAddr = format!("{}:{}", config::host(), config::port())
        .parse()
        .expect("Invalid address");

    println!(
        "Starting {} on http://{}:{}",
        config::project_name(),
        config::host(),
        config::port()
    );

    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server crashed");
}
