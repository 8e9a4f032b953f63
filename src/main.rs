use company_registry_api::database::repositories::{CompanyRepository, CompanyRepositoryImpl};
use company_registry_api::database::{establish_connection_pool, run_migrations, DatabasePool};
use company_registry_api::provider::{MarketDataProvider, YahooFinanceProvider};
use company_registry_api::{create_router, AppState, CompanySyncJob};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file (if present)
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "company_registry_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Initialize database pool and apply migrations
    let pool = initialize_database();

    // Create repository
    let pool_clone = pool.clone();
    let company_repository =
        Arc::new(CompanyRepositoryImpl::new(move || pool_clone.get_conn()))
            as Arc<dyn CompanyRepository>;

    // Create market data provider
    let provider = Arc::new(YahooFinanceProvider::from_env()) as Arc<dyn MarketDataProvider>;

    // Initialize cron scheduler with the hourly sync job
    initialize_cron_scheduler(company_repository.clone(), provider.clone()).await;

    // Create the router
    let state = AppState {
        company_repository,
        provider,
    };
    let app = create_router(state);

    // Define the address
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    tracing::info!("🚀 Company Registry API server running on http://{}", addr);
    tracing::info!("📊 Health check: http://{}/health", addr);
    tracing::info!("📚 Swagger UI: http://{}/swagger-ui", addr);
    tracing::info!("🗄️  Companies: http://{}/api/companies/", addr);

    // Start the server
    axum::serve(listener, app).await.unwrap();
}

/// Initialize the database pool and run embedded migrations
///
/// Unlike optional integrations, the store is the whole service; startup
/// aborts if the database is unreachable.
fn initialize_database() -> DatabasePool {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::error!("❌ DATABASE_URL is not set");
            std::process::exit(1);
        }
    };

    let pool_size = std::env::var("DB_POOL_MAX_SIZE")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(10);

    let pool = match establish_connection_pool(&database_url, pool_size) {
        Ok(pool) => {
            tracing::info!("✅ Database connection established");
            pool
        }
        Err(e) => {
            tracing::error!("❌ Failed to establish database connection: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run_migrations(&pool) {
        tracing::error!("❌ Failed to run migrations: {}", e);
        std::process::exit(1);
    }

    pool
}

/// Initialize the cron scheduler for periodic jobs
///
/// Scheduler failures are logged but do not prevent the API from serving.
async fn initialize_cron_scheduler(
    company_repository: Arc<dyn CompanyRepository>,
    provider: Arc<dyn MarketDataProvider>,
) {
    use tokio_cron_scheduler::JobScheduler;

    tracing::info!("⏰ Initializing cron scheduler...");

    let scheduler = match JobScheduler::new().await {
        Ok(scheduler) => scheduler,
        Err(e) => {
            tracing::error!("❌ Failed to create cron scheduler: {}", e);
            return;
        }
    };

    let sync_job = CompanySyncJob::new(company_repository, provider);

    if let Err(e) = sync_job.register(&scheduler).await {
        tracing::error!("❌ Failed to register company sync job: {}", e);
        return;
    }

    if let Err(e) = scheduler.start().await {
        tracing::error!("❌ Failed to start cron scheduler: {}", e);
        return;
    }

    tracing::info!("✅ Cron scheduler started");
    tracing::info!("   • Company sync: hourly at minute zero");

    // Keep scheduler alive for the lifetime of the process
    std::mem::forget(scheduler);
}
