use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use std::sync::Arc;

use crate::database::models::{Company, NewCompany};
use crate::database::repositories::CompanyRepository;
use crate::provider::MarketDataProvider;

use super::error::ApiError;
use super::responses::*;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub company_repository: Arc<dyn CompanyRepository>,
    pub provider: Arc<dyn MarketDataProvider>,
}

// ============================================================================
// Custom company actions
// ============================================================================

/// Get a company by ticker symbol
#[utoipa::path(
    get,
    path = "/api/companies/get_company/{symbol}/",
    tag = "companies",
    params(
        ("symbol" = String, Path, description = "Ticker symbol (e.g., AAPL)")
    ),
    responses(
        (status = 200, description = "Company details", body = Company),
        (status = 404, description = "Company not found", body = StatusMessage)
    )
)]
pub async fn get_company(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<Company>, ApiError> {
    state
        .company_repository
        .find_by_symbol(&symbol)?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// Register a new company by ticker symbol
///
/// The display name is resolved from the market data provider inline with
/// the request; a symbol the provider cannot resolve creates no record.
#[utoipa::path(
    post,
    path = "/api/companies/add_company/",
    tag = "companies",
    request_body = AddCompanyRequest,
    responses(
        (status = 201, description = "Company added", body = StatusMessage),
        (status = 400, description = "Missing symbol, unresolvable symbol, or already exists", body = StatusMessage)
    )
)]
pub async fn add_company(
    State(state): State<AppState>,
    Json(request): Json<AddCompanyRequest>,
) -> Result<(StatusCode, Json<StatusMessage>), ApiError> {
    let symbol = request
        .symbol
        .filter(|s| !s.is_empty())
        .ok_or(ApiError::MissingField)?;

    let name = state
        .provider
        .lookup_name(&symbol)
        .await?
        .ok_or(ApiError::ProviderLookupFailed)?;

    if state.company_repository.find_by_symbol(&symbol)?.is_some() {
        return Err(ApiError::Conflict);
    }

    state
        .company_repository
        .insert(NewCompany::new(symbol).with_name(name))?;

    Ok((
        StatusCode::CREATED,
        Json(StatusMessage::new("company added")),
    ))
}

/// Rename and refresh a company
///
/// Looks up the record by the path symbol, replaces its symbol with the
/// body symbol, and re-resolves the display name in the same call.
#[utoipa::path(
    put,
    path = "/api/companies/update_company/{symbol}/",
    tag = "companies",
    params(
        ("symbol" = String, Path, description = "Current ticker symbol")
    ),
    request_body = UpdateCompanyRequest,
    responses(
        (status = 200, description = "Company updated", body = StatusMessage),
        (status = 400, description = "Missing symbol or unresolvable symbol", body = StatusMessage),
        (status = 404, description = "Company not found", body = StatusMessage)
    )
)]
pub async fn update_company(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Json(request): Json<UpdateCompanyRequest>,
) -> Result<Json<StatusMessage>, ApiError> {
    let company = state
        .company_repository
        .find_by_symbol(&symbol)?
        .ok_or(ApiError::NotFound)?;

    let new_symbol = request
        .symbol
        .filter(|s| !s.is_empty())
        .ok_or(ApiError::MissingField)?;

    let name = state
        .provider
        .lookup_name(&new_symbol)
        .await?
        .ok_or(ApiError::ProviderLookupFailed)?;

    state
        .company_repository
        .update_record(company.id, &new_symbol, Some(&name))?;

    Ok(Json(StatusMessage::new("company updated")))
}

/// Delete a company by ticker symbol
#[utoipa::path(
    delete,
    path = "/api/companies/delete_company/{symbol}/",
    tag = "companies",
    params(
        ("symbol" = String, Path, description = "Ticker symbol")
    ),
    responses(
        (status = 204, description = "Company deleted"),
        (status = 404, description = "Company not found", body = StatusMessage)
    )
)]
pub async fn delete_company(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.company_repository.delete_by_symbol(&symbol)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

/// Export all companies as CSV
///
/// Optional `start_date`/`end_date` restrict the export to records whose
/// `last_updated` falls within the inclusive local calendar-day range.
/// Malformed dates are ignored rather than rejected, matching the
/// behavior clients already rely on.
#[utoipa::path(
    get,
    path = "/api/companies/export/",
    tag = "companies",
    params(ExportQuery),
    responses(
        (status = 200, description = "CSV export", content_type = "text/csv")
    )
)]
pub async fn export_companies(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let from = query.start_date.as_deref().and_then(parse_day_start);
    let to = query.end_date.as_deref().and_then(parse_day_end);

    let companies = state.company_repository.get_updated_between(from, to)?;

    let mut writer = csv::Writer::from_writer(vec![]);
    writer
        .write_record(["Symbol", "Name", "Last Updated"])
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    for company in &companies {
        let last_updated = company
            .last_updated
            .format("%Y-%m-%d %H:%M:%S%:z")
            .to_string();
        writer
            .write_record([
                company.symbol.as_str(),
                company.name.as_deref().unwrap_or(""),
                last_updated.as_str(),
            ])
            .map_err(|e| ApiError::Internal(e.to_string()))?;
    }

    let body = writer
        .into_inner()
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"companies.csv\"",
            ),
        ],
        body,
    ))
}

/// Start of the given local calendar day, in UTC
///
/// Returns None for unparsable input; the caller drops the filter.
fn parse_day_start(s: &str) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    let start = date.and_hms_opt(0, 0, 0)?;
    Local
        .from_local_datetime(&start)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// End of the given local calendar day (23:59:59.999999), in UTC
fn parse_day_end(s: &str) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    let end = date.and_hms_micro_opt(23, 59, 59, 999_999)?;
    Local
        .from_local_datetime(&end)
        .latest()
        .map(|dt| dt.with_timezone(&Utc))
}

// ============================================================================
// Generic CRUD (list/create/retrieve/update/delete by primary key)
// ============================================================================

/// List all companies
#[utoipa::path(
    get,
    path = "/api/companies/",
    tag = "companies",
    responses(
        (status = 200, description = "All companies", body = Vec<Company>)
    )
)]
pub async fn list_companies(
    State(state): State<AppState>,
) -> Result<Json<Vec<Company>>, ApiError> {
    state.company_repository.get_all().map(Json).map_err(ApiError::from)
}

/// Create a company from a full representation
///
/// Unlike add_company, this path does not consult the provider.
#[utoipa::path(
    post,
    path = "/api/companies/",
    tag = "companies",
    request_body = CompanyPayload,
    responses(
        (status = 201, description = "Created company", body = Company),
        (status = 400, description = "Missing symbol or duplicate symbol", body = StatusMessage)
    )
)]
pub async fn create_company(
    State(state): State<AppState>,
    Json(payload): Json<CompanyPayload>,
) -> Result<(StatusCode, Json<Company>), ApiError> {
    let symbol = payload
        .symbol
        .filter(|s| !s.is_empty())
        .ok_or(ApiError::MissingField)?;

    let mut new_company = NewCompany::new(symbol);
    if let Some(name) = payload.name {
        new_company = new_company.with_name(name);
    }

    let company = state.company_repository.insert(new_company)?;

    Ok((StatusCode::CREATED, Json(company)))
}

/// Retrieve a company by primary key
#[utoipa::path(
    get,
    path = "/api/companies/{id}/",
    tag = "companies",
    params(
        ("id" = i32, Path, description = "Company ID")
    ),
    responses(
        (status = 200, description = "Company details", body = Company),
        (status = 404, description = "Company not found", body = StatusMessage)
    )
)]
pub async fn retrieve_company(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Company>, ApiError> {
    state
        .company_repository
        .find_by_id(id)?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// Replace a company's symbol and name by primary key
#[utoipa::path(
    put,
    path = "/api/companies/{id}/",
    tag = "companies",
    params(
        ("id" = i32, Path, description = "Company ID")
    ),
    request_body = CompanyPayload,
    responses(
        (status = 200, description = "Updated company", body = Company),
        (status = 400, description = "Missing symbol or duplicate symbol", body = StatusMessage),
        (status = 404, description = "Company not found", body = StatusMessage)
    )
)]
pub async fn replace_company(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<CompanyPayload>,
) -> Result<Json<Company>, ApiError> {
    if state.company_repository.find_by_id(id)?.is_none() {
        return Err(ApiError::NotFound);
    }

    let symbol = payload
        .symbol
        .filter(|s| !s.is_empty())
        .ok_or(ApiError::MissingField)?;

    let company =
        state
            .company_repository
            .update_record(id, &symbol, payload.name.as_deref())?;

    Ok(Json(company))
}

/// Delete a company by primary key
#[utoipa::path(
    delete,
    path = "/api/companies/{id}/",
    tag = "companies",
    params(
        ("id" = i32, Path, description = "Company ID")
    ),
    responses(
        (status = 204, description = "Company deleted"),
        (status = 404, description = "Company not found", body = StatusMessage)
    )
)]
pub async fn destroy_company(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    if state.company_repository.delete_by_id(id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy")
    )
)]
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339()
    }))
}
