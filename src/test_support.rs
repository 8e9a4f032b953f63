//! In-memory fakes for the repository and provider traits, shared by
//! handler, router, and job tests. Compiled only for tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::database::connection::DatabaseError;
use crate::database::models::{Company, NewCompany};
use crate::database::repositories::CompanyRepository;
use crate::provider::{MarketDataProvider, ProviderError};

/// Mutex-backed stand-in for the PostgreSQL repository
#[derive(Default)]
pub struct InMemoryCompanyRepository {
    rows: Mutex<Vec<Company>>,
    next_id: Mutex<i32>,
}

impl InMemoryCompanyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record directly, bypassing the API surface
    pub fn seed(&self, symbol: &str, name: Option<&str>) -> Company {
        self.seed_at(symbol, name, Utc::now())
    }

    /// Insert a record with a fixed `last_updated` (for export range tests)
    pub fn seed_at(
        &self,
        symbol: &str,
        name: Option<&str>,
        last_updated: DateTime<Utc>,
    ) -> Company {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;

        let company = Company {
            id: *next_id,
            symbol: symbol.to_string(),
            name: name.map(String::from),
            last_updated,
        };

        self.rows.lock().unwrap().push(company.clone());
        company
    }

    pub fn get(&self, symbol: &str) -> Option<Company> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.symbol == symbol)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl CompanyRepository for InMemoryCompanyRepository {
    fn find_by_id(&self, id: i32) -> Result<Option<Company>, DatabaseError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    fn find_by_symbol(&self, symbol: &str) -> Result<Option<Company>, DatabaseError> {
        Ok(self.get(symbol))
    }

    fn get_all(&self) -> Result<Vec<Company>, DatabaseError> {
        Ok(self.rows.lock().unwrap().clone())
    }

    fn get_updated_between(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<Company>, DatabaseError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|c| from.map_or(true, |f| c.last_updated >= f))
            .filter(|c| to.map_or(true, |t| c.last_updated <= t))
            .cloned()
            .collect())
    }

    fn insert(&self, new_company: NewCompany) -> Result<Company, DatabaseError> {
        if self.get(&new_company.symbol).is_some() {
            return Err(DatabaseError::DuplicateSymbol(new_company.symbol));
        }

        Ok(self.seed(&new_company.symbol, new_company.name.as_deref()))
    }

    fn update_record(
        &self,
        id: i32,
        symbol: &str,
        name: Option<&str>,
    ) -> Result<Company, DatabaseError> {
        let mut rows = self.rows.lock().unwrap();

        if rows.iter().any(|c| c.symbol == symbol && c.id != id) {
            return Err(DatabaseError::DuplicateSymbol(symbol.to_string()));
        }

        let company = rows
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(DatabaseError::DieselError(diesel::result::Error::NotFound))?;

        company.symbol = symbol.to_string();
        company.name = name.map(String::from);
        company.last_updated = Utc::now();

        Ok(company.clone())
    }

    fn update_name(&self, id: i32, name: &str) -> Result<Company, DatabaseError> {
        let mut rows = self.rows.lock().unwrap();

        let company = rows
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(DatabaseError::DieselError(diesel::result::Error::NotFound))?;

        company.name = Some(name.to_string());
        company.last_updated = Utc::now();

        Ok(company.clone())
    }

    fn delete_by_id(&self, id: i32) -> Result<bool, DatabaseError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|c| c.id != id);
        Ok(rows.len() < before)
    }

    fn delete_by_symbol(&self, symbol: &str) -> Result<bool, DatabaseError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|c| c.symbol != symbol);
        Ok(rows.len() < before)
    }
}

/// Scripted provider: resolves configured symbols, optionally fails others
#[derive(Default)]
pub struct FakeProvider {
    names: HashMap<String, String>,
    failing: HashSet<String>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolves(mut self, symbol: &str, name: &str) -> Self {
        self.names.insert(symbol.to_string(), name.to_string());
        self
    }

    /// Make lookups for this symbol return a transport error
    pub fn fails(mut self, symbol: &str) -> Self {
        self.failing.insert(symbol.to_string());
        self
    }
}

#[async_trait]
impl MarketDataProvider for FakeProvider {
    async fn lookup_name(&self, symbol: &str) -> Result<Option<String>, ProviderError> {
        if self.failing.contains(symbol) {
            return Err(ProviderError::UnexpectedResponse(format!(
                "simulated failure for {symbol}"
            )));
        }

        Ok(self.names.get(symbol).cloned())
    }
}
