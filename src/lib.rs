pub mod api;
pub mod database;
pub mod jobs;
pub mod provider;

#[cfg(test)]
pub mod test_support;

pub use api::{create_router, AppState};
pub use database::DatabasePool;
pub use jobs::CompanySyncJob;
pub use provider::{MarketDataProvider, YahooFinanceProvider};
