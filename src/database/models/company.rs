use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Company entity - a tracked ticker and its display name
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::database::schema::companies)]
pub struct Company {
    /// Auto-assigned primary key
    pub id: i32,

    /// Ticker symbol (e.g., "AAPL"), unique
    pub symbol: String,

    /// Display name resolved from the market data provider.
    /// Null until the first successful lookup.
    pub name: Option<String>,

    /// Set at creation time, overwritten on every successful refresh
    pub last_updated: DateTime<Utc>,
}

/// New company for insertion
///
/// `last_updated` is assigned by the database default (NOW()).
#[derive(Debug, Clone, Insertable, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::database::schema::companies)]
pub struct NewCompany {
    pub symbol: String,
    pub name: Option<String>,
}

impl NewCompany {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: None,
        }
    }

    /// Set the resolved display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_company_builder() {
        let company = NewCompany::new("AAPL").with_name("Apple Inc.");

        assert_eq!(company.symbol, "AAPL");
        assert_eq!(company.name, Some("Apple Inc.".to_string()));
    }

    #[test]
    fn test_new_company_without_name() {
        let company = NewCompany::new("MSFT");

        assert_eq!(company.symbol, "MSFT");
        assert!(company.name.is_none());
    }
}
