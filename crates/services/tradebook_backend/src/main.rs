// File: services/tradebook_backend/src/main.rs
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tradebook_backend::{build_app, build_booking_state};
use tradebook_common::logging;
use tradebook_config::load_config;

#[tokio::main]
async fn main() {
    let config = load_config().expect("Failed to load config");
    // keep the guard alive so the file writer flushes on shutdown
    let _log_guard = logging::init_from_config(&config.log);

    let state = build_booking_state(&config)
        .await
        .expect("Failed to initialise booking services");
    let app = build_app(Arc::new(state));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind listener");
    info!("Starting server at http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}
