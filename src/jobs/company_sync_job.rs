use crate::database::repositories::CompanyRepository;
use crate::provider::MarketDataProvider;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};

/// Company synchronization job
///
/// Runs hourly at minute zero and refreshes every company's display name
/// from the market data provider. Each record is handled independently;
/// one failure never aborts the batch.
pub struct CompanySyncJob {
    company_repository: Arc<dyn CompanyRepository>,
    provider: Arc<dyn MarketDataProvider>,
}

/// Outcome of one sync pass
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl CompanySyncJob {
    /// Create a new company sync job
    pub fn new(
        company_repository: Arc<dyn CompanyRepository>,
        provider: Arc<dyn MarketDataProvider>,
    ) -> Self {
        Self {
            company_repository,
            provider,
        }
    }

    /// Refresh all companies from the provider
    ///
    /// Provider errors and store errors are logged per record and
    /// swallowed; nothing is retried within the same run.
    async fn sync_companies(&self) -> Result<SyncSummary, Box<dyn std::error::Error>> {
        tracing::info!("Starting company synchronization job");

        let companies = self.company_repository.get_all()?;

        if companies.is_empty() {
            tracing::info!("No companies to sync");
            return Ok(SyncSummary::default());
        }

        let mut summary = SyncSummary::default();

        for company in companies {
            match self.provider.lookup_name(&company.symbol).await {
                Ok(Some(name)) => match self.company_repository.update_name(company.id, &name) {
                    Ok(_) => {
                        tracing::info!("Updated company: {}", company.symbol);
                        summary.updated += 1;
                    }
                    Err(e) => {
                        tracing::error!("Error updating company {}: {}", company.symbol, e);
                        summary.failed += 1;
                    }
                },
                Ok(None) => {
                    tracing::warn!("Company name not found for symbol: {}", company.symbol);
                    summary.skipped += 1;
                }
                Err(e) => {
                    tracing::error!("Error updating company {}: {}", company.symbol, e);
                    summary.failed += 1;
                }
            }
        }

        tracing::info!(
            "Company synchronization completed: {} updated, {} skipped, {} failed",
            summary.updated,
            summary.skipped,
            summary.failed
        );

        Ok(summary)
    }

    /// Register this job with the scheduler
    ///
    /// Schedule: hourly at minute zero (0 0 * * * *)
    pub async fn register(
        self,
        scheduler: &JobScheduler,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let company_repo = self.company_repository.clone();
        let provider = self.provider.clone();

        let job = Job::new_async("0 0 * * * *", move |_uuid, _lock| {
            let company_repo = company_repo.clone();
            let provider = provider.clone();

            Box::pin(async move {
                let job = CompanySyncJob {
                    company_repository: company_repo,
                    provider,
                };

                if let Err(e) = job.sync_companies().await {
                    tracing::error!("Company sync job failed: {}", e);
                }
            })
        })?;

        scheduler.add(job).await?;

        tracing::info!("Company sync job registered (runs hourly at minute zero)");

        Ok(())
    }

    /// Run company sync immediately (manual trigger)
    pub async fn run_now(&self) -> Result<SyncSummary, Box<dyn std::error::Error>> {
        self.sync_companies().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeProvider, InMemoryCompanyRepository};

    #[tokio::test]
    async fn test_sync_refreshes_all_companies() {
        let repo = Arc::new(InMemoryCompanyRepository::new());
        repo.seed("AAPL", Some("Apple"));
        repo.seed("MSFT", Some("Microsoft"));

        let provider = Arc::new(
            FakeProvider::new()
                .resolves("AAPL", "Apple Inc.")
                .resolves("MSFT", "Microsoft Corporation"),
        );

        let job = CompanySyncJob::new(repo.clone(), provider);
        let summary = job.run_now().await.unwrap();

        assert_eq!(summary.updated, 2);
        assert_eq!(summary.failed, 0);
        assert_eq!(
            repo.get("AAPL").unwrap().name,
            Some("Apple Inc.".to_string())
        );
        assert_eq!(
            repo.get("MSFT").unwrap().name,
            Some("Microsoft Corporation".to_string())
        );
    }

    #[tokio::test]
    async fn test_one_failure_does_not_abort_the_batch() {
        let repo = Arc::new(InMemoryCompanyRepository::new());
        repo.seed("AAPL", Some("Apple"));
        repo.seed("BROKEN", Some("Old Name"));
        repo.seed("MSFT", Some("Microsoft"));

        let provider = Arc::new(
            FakeProvider::new()
                .resolves("AAPL", "Apple Inc.")
                .fails("BROKEN")
                .resolves("MSFT", "Microsoft Corporation"),
        );

        let job = CompanySyncJob::new(repo.clone(), provider);
        let summary = job.run_now().await.unwrap();

        assert_eq!(summary.updated, 2);
        assert_eq!(summary.failed, 1);
        // The failing record is left untouched
        assert_eq!(
            repo.get("BROKEN").unwrap().name,
            Some("Old Name".to_string())
        );
        assert_eq!(
            repo.get("AAPL").unwrap().name,
            Some("Apple Inc.".to_string())
        );
    }

    #[tokio::test]
    async fn test_unresolved_symbol_is_skipped_with_warning() {
        let repo = Arc::new(InMemoryCompanyRepository::new());
        repo.seed("UNKNOWN", None);

        let provider = Arc::new(FakeProvider::new());

        let job = CompanySyncJob::new(repo.clone(), provider);
        let summary = job.run_now().await.unwrap();

        assert_eq!(summary.updated, 0);
        assert_eq!(summary.skipped, 1);
        assert!(repo.get("UNKNOWN").unwrap().name.is_none());
    }

    #[tokio::test]
    async fn test_sync_advances_last_updated() {
        let repo = Arc::new(InMemoryCompanyRepository::new());
        repo.seed("AAPL", Some("Apple"));
        let before = repo.get("AAPL").unwrap().last_updated;

        let provider = Arc::new(FakeProvider::new().resolves("AAPL", "Apple Inc."));

        let job = CompanySyncJob::new(repo.clone(), provider);
        job.run_now().await.unwrap();

        assert!(repo.get("AAPL").unwrap().last_updated >= before);
    }
}
