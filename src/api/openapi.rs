use utoipa::OpenApi;

use crate::api::handlers;
use crate::api::responses::*;
use crate::database::models::{Company, NewCompany};

/// OpenAPI specification
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Company Registry API",
        version = "1.0.0",
        description = "CRUD service for tracked companies with hourly market-data refresh",
        license(
            name = "MIT"
        )
    ),
    paths(
        handlers::health_check,
        handlers::get_company,
        handlers::add_company,
        handlers::update_company,
        handlers::delete_company,
        handlers::export_companies,
        handlers::list_companies,
        handlers::create_company,
        handlers::retrieve_company,
        handlers::replace_company,
        handlers::destroy_company,
    ),
    components(
        schemas(
            Company,
            NewCompany,
            StatusMessage,
            AddCompanyRequest,
            UpdateCompanyRequest,
            CompanyPayload,
            ExportQuery,
        )
    ),
    tags(
        (name = "companies", description = "Company registry endpoints"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;
