pub mod handlers;
pub mod models;
pub mod openapi;

use axum::Router;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use handlers::AppService;

/// The `/api` routes plus the Swagger UI, without middleware layers.
pub fn router(service: Arc<AppService>) -> Router {
    Router::new()
        .nest("/api", handlers::api_routes(service))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
}
