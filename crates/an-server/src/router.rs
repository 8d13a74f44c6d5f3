//! Axum router construction.
//!
//! Builds the application router: the annotation endpoints the browser
//! client calls, static file serving for the client itself, and the
//! middleware stack.

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::middleware;
use axum::routing::{get, get_service, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use an_core::config::CorsConfig;

use crate::context::AppContext;
use crate::middleware::request_id::request_id_middleware;
use crate::routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::health::health_check,
        routes::images::list_images,
        routes::uploads::save_binary,
        routes::uploads::save_masked_image,
        routes::predictions::save_prediction,
    ),
    components(schemas(
        routes::MessageResponse,
        routes::predictions::SavePredictionRequest,
    ))
)]
struct ApiDoc;

/// Build the complete Axum router.
pub fn build_router(ctx: AppContext) -> Router {
    let server = &ctx.config.server;
    let static_dir = server.static_dir.clone();
    let cors = cors_layer(&ctx.config.cors);

    // Uploads carry whole canvases; everything else keeps axum's default limit.
    let upload_routes = Router::new()
        .route("/save_binary", post(routes::uploads::save_binary))
        .route("/save_masked_image", post(routes::uploads::save_masked_image))
        .layer(DefaultBodyLimit::max(server.max_upload_bytes));

    Router::new()
        .route(
            "/",
            get_service(ServeFile::new(static_dir.join("index.html"))),
        )
        .route("/health", get(routes::health::health_check))
        .route("/static/images", get(routes::images::list_images))
        .route(
            "/save_prediction",
            post(routes::predictions::save_prediction),
        )
        .merge(upload_routes)
        .nest_service("/static", ServeDir::new(&static_dir))
        .merge(SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

/// Any origin unless specific origins are configured.
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.allowed_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring invalid CORS origin {origin:?}: {e}");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}
