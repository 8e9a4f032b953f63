/// Cron jobs and scheduled tasks module
///
/// Contains background jobs that run on a schedule:
/// - Company refresh from the market data provider (hourly)
pub mod company_sync_job;

pub use company_sync_job::CompanySyncJob;
