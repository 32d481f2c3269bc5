//! Route configuration.

use axum::{response::Html, response::Json, routing::get, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::handlers::{health_routes, user_routes};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Static greeting served at `/`
pub const ROOT_GREETING: &str = "<h1>Hello World</h1><div>User records service</div>";

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        // Health check (store connectivity)
        .nest("/health", health_routes())
        // OpenAPI document
        .route("/api-docs/openapi.json", get(openapi_json))
        // User record routes
        .merge(user_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Root endpoint
async fn root() -> Html<&'static str> {
    Html(ROOT_GREETING)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
