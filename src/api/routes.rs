use axum::{
    routing::{delete, get, post, put},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{self, AppState};
use super::openapi::ApiDoc;

/// Create the API router with Swagger UI
///
/// Paths keep their trailing slashes; clients were written against them.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Health endpoint
        .route("/health", get(handlers::health_check))
        // Custom company actions
        .route(
            "/api/companies/get_company/:symbol/",
            get(handlers::get_company),
        )
        .route("/api/companies/add_company/", post(handlers::add_company))
        .route(
            "/api/companies/update_company/:symbol/",
            put(handlers::update_company),
        )
        .route(
            "/api/companies/delete_company/:symbol/",
            delete(handlers::delete_company),
        )
        .route("/api/companies/export/", get(handlers::export_companies))
        // Generic CRUD
        .route(
            "/api/companies/",
            get(handlers::list_companies).post(handlers::create_company),
        )
        .route(
            "/api/companies/:id/",
            get(handlers::retrieve_company)
                .put(handlers::replace_company)
                .delete(handlers::destroy_company),
        )
        .with_state(state)
}
