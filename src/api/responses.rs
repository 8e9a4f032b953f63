use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Short status message returned by the custom company actions
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusMessage {
    pub status: String,
}

impl StatusMessage {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
        }
    }
}

/// Request body for add_company
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddCompanyRequest {
    /// Ticker symbol to register
    #[serde(default)]
    pub symbol: Option<String>,
}

/// Request body for update_company
///
/// The body symbol replaces the record's symbol; the display name is
/// re-resolved from the provider in the same call.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCompanyRequest {
    #[serde(default)]
    pub symbol: Option<String>,
}

/// Full representation used by the generic create/update endpoints
#[derive(Debug, Deserialize, ToSchema)]
pub struct CompanyPayload {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Query parameters for the CSV export
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ExportQuery {
    /// Inclusive lower bound, local calendar date (YYYY-MM-DD)
    pub start_date: Option<String>,
    /// Inclusive upper bound, local calendar date (YYYY-MM-DD)
    pub end_date: Option<String>,
}
