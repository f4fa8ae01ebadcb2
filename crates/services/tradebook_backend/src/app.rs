// --- File: crates/services/tradebook_backend/src/app.rs ---
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tradebook_booking::{routes as booking_routes, BookingState};

pub const WELCOME_MESSAGE: &str = "Welcome to Tradebook API!";

/// Assembles the full HTTP application around an already-built booking state.
pub fn build_app(state: Arc<BookingState>) -> Router {
    #[allow(unused_mut)] // mutated only with the openapi feature
    let mut app = Router::new()
        .route("/", get(|| async { WELCOME_MESSAGE }))
        .merge(booking_routes(state));

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use tradebook_booking::doc::BookingApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Tradebook API",
                version = "0.1.0",
                description = "Tradebook availability API",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            tags((name = "Tradebook", description = "Core service endpoints")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(BookingApiDoc::openapi());
        tracing::info!("Adding Swagger UI at /docs");

        app = app.merge(SwaggerUi::new("/docs").url("/docs/openapi.json", openapi_doc));
    }

    app.layer(TraceLayer::new_for_http())
}
