//! Reference data lookups that discard stale responses.
//!
//! Lookups driven by incremental typing can complete out of order. Each
//! lookup kind carries a generation counter; a response is only handed back
//! if no newer request of the same kind was issued while it was in flight.

use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;
use tokio::sync::OnceCell;

use super::{ClientDirectory, CurrencyDirectory, EmployeeDirectory};
use crate::{
    error::Result,
    models::{Client, ClientFilter, Currency, Employee, EmployeeFilter},
};

/// Outcome of a lookup that may have been overtaken by a newer one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    /// Result of the most recent request
    Fresh(T),
    /// A newer request was issued; this response was dropped
    Superseded,
}

impl<T> Lookup<T> {
    /// Returns the fresh value, if any.
    pub fn fresh(self) -> Option<T> {
        match self {
            Lookup::Fresh(value) => Some(value),
            Lookup::Superseded => None,
        }
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, Lookup::Superseded)
    }
}

#[derive(Default)]
struct Generation(AtomicU64);

impl Generation {
    fn issue(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.0.load(Ordering::SeqCst) == ticket
    }
}

/// Front for the reference directories used by the General and Team steps.
///
/// Kept apart from [`crate::Wizard`] so lookups never block or reorder
/// navigation.
pub struct ReferenceData<D> {
    directory: D,
    clients: Generation,
    employees: Generation,
    currencies: OnceCell<Vec<Currency>>,
}

impl<D> ReferenceData<D> {
    pub fn new(directory: D) -> Self {
        Self {
            directory,
            clients: Generation::default(),
            employees: Generation::default(),
            currencies: OnceCell::new(),
        }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }
}

impl<D: ClientDirectory> ReferenceData<D> {
    /// Lists clients matching `search`, dropping superseded responses.
    pub async fn list_clients(&self, search: &str) -> Result<Lookup<Vec<Client>>> {
        let ticket = self.clients.issue();
        let filter = ClientFilter {
            search: (!search.trim().is_empty()).then(|| search.to_string()),
        };
        let result = self.directory.list_clients(&filter).await;
        if !self.clients.is_current(ticket) {
            debug!("Dropping stale client lookup for {search:?}");
            return Ok(Lookup::Superseded);
        }
        result.map(Lookup::Fresh)
    }
}

impl<D: EmployeeDirectory> ReferenceData<D> {
    /// Searches employees, dropping superseded responses.
    pub async fn search_employees(
        &self,
        query: &str,
        active_only: bool,
    ) -> Result<Lookup<Vec<Employee>>> {
        let ticket = self.employees.issue();
        let filter = EmployeeFilter::new(query, active_only);
        let result = self.directory.search_employees(&filter).await;
        if !self.employees.is_current(ticket) {
            debug!("Dropping stale employee lookup for {query:?}");
            return Ok(Lookup::Superseded);
        }
        result.map(Lookup::Fresh)
    }
}

impl<D: CurrencyDirectory> ReferenceData<D> {
    /// Supported currencies, fetched once and cached.
    pub async fn currencies(&self) -> Result<&[Currency]> {
        let list = self
            .currencies
            .get_or_try_init(|| self.directory.list_currencies())
            .await?;
        Ok(list.as_slice())
    }

    /// True when `code` is one of the supported currencies.
    pub async fn is_supported_currency(&self, code: &str) -> Result<bool> {
        Ok(self
            .currencies()
            .await?
            .iter()
            .any(|c| c.code.eq_ignore_ascii_case(code.trim())))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use super::*;
    use crate::error::DraftError;

    /// Directory whose "slow" query waits until a later query completes.
    #[derive(Default)]
    struct RacingDirectory {
        release: Notify,
        currency_calls: AtomicUsize,
    }

    fn employee(id: u64, name: &str) -> Employee {
        Employee {
            id,
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            title: None,
            active: true,
        }
    }

    #[async_trait]
    impl EmployeeDirectory for RacingDirectory {
        async fn search_employees(&self, filter: &EmployeeFilter) -> Result<Vec<Employee>> {
            match filter.search.as_deref() {
                Some("a") => {
                    self.release.notified().await;
                    Ok(vec![employee(1, "Alan"), employee(2, "Ada")])
                }
                Some("fail") => {
                    self.release.notified().await;
                    Err(DraftError::Configuration {
                        message: "directory offline".to_string(),
                    })
                }
                _ => {
                    self.release.notify_one();
                    Ok(vec![employee(2, "Ada")])
                }
            }
        }
    }

    #[async_trait]
    impl ClientDirectory for RacingDirectory {
        async fn list_clients(&self, _filter: &ClientFilter) -> Result<Vec<Client>> {
            Ok(vec![Client {
                id: 1,
                name: "Acme".to_string(),
                code: Some("ACM".to_string()),
            }])
        }
    }

    #[async_trait]
    impl CurrencyDirectory for RacingDirectory {
        async fn list_currencies(&self) -> Result<Vec<Currency>> {
            self.currency_calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![Currency {
                code: "EUR".to_string(),
                name: "Euro".to_string(),
            }])
        }
    }

    #[tokio::test]
    async fn test_stale_employee_lookup_is_dropped() {
        let reference = ReferenceData::new(RacingDirectory::default());

        let (slow, fast) = tokio::join!(
            reference.search_employees("a", true),
            reference.search_employees("ada", true)
        );

        assert!(slow.unwrap().is_superseded());
        let fresh = fast.unwrap().fresh().expect("latest lookup should be fresh");
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].name, "Ada");
    }

    #[tokio::test]
    async fn test_stale_error_is_dropped_too() {
        let reference = ReferenceData::new(RacingDirectory::default());
        let (slow, fast) = tokio::join!(
            reference.search_employees("fail", false),
            reference.search_employees("ada", false)
        );
        assert!(matches!(slow, Ok(Lookup::Superseded)));
        assert!(fast.is_ok());
    }

    #[tokio::test]
    async fn test_sequential_lookups_are_fresh() {
        let reference = ReferenceData::new(RacingDirectory::default());
        let first = reference.search_employees("ada", true).await.unwrap();
        let second = reference.list_clients("").await.unwrap();
        assert!(!first.is_superseded());
        assert_eq!(second.fresh().unwrap()[0].name, "Acme");
    }

    #[tokio::test]
    async fn test_currencies_cached() {
        let reference = ReferenceData::new(RacingDirectory::default());
        assert!(reference.is_supported_currency("eur").await.unwrap());
        assert!(!reference.is_supported_currency("XYZ").await.unwrap());
        assert_eq!(reference.directory().currency_calls.load(Ordering::SeqCst), 1);
    }
}
