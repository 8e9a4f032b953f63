/// Repository pattern implementations
///
/// Traits define the contracts; handlers and jobs depend on the traits,
/// not on concrete PostgreSQL implementations.
pub mod company_repository;

pub use company_repository::{CompanyRepository, CompanyRepositoryImpl};
