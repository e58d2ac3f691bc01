use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth,
    config::Config,
    middleware::logging,
    routes::{self, health, pdf},
    state::AppState,
};

pub fn build_router(state: Arc<AppState>) -> Router {
    // Everything under /pdf sits behind the access-control gate.
    let pdf_routes = Router::new()
        .route("/pdf/upload", post(pdf::upload_pdf))
        .route("/pdf/chat", post(pdf::chat_with_pdf))
        .route("/pdf/all", get(pdf::list_pdfs))
        .route("/pdf/:id", delete(pdf::delete_pdf))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    Router::new()
        .merge(pdf_routes)
        .route("/health", get(health::health_check))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", routes::ApiDoc::openapi()))
        .layer(middleware::from_fn(logging::log_request))
        .layer(TimeoutLayer::new(std::time::Duration::from_secs(300)))
        .layer(build_cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn build_cors_layer(config: &Config) -> CorsLayer {
    if config.cors.enabled {
        let cors = CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers(Any);

        if config.cors.origins.iter().any(|o| o == "*") {
            cors.allow_origin(Any)
        } else {
            let parsed_origins: Vec<axum::http::HeaderValue> = config
                .cors
                .origins
                .iter()
                .filter_map(|o| o.parse::<axum::http::HeaderValue>().ok())
                .collect();

            cors.allow_origin(parsed_origins)
        }
    } else {
        CorsLayer::permissive()
    }
}
