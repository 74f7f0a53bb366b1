//! Interfaces to the external persistence store and reference directories.
//!
//! The wizard consumes these traits but owns none of the data behind them.
//! [`SqliteGateway`] implements all of them on top of a local SQLite file;
//! hosts with a remote store provide their own implementations.

use async_trait::async_trait;

use crate::{
    error::Result,
    models::{
        Client, ClientFilter, Currency, DraftFilter, DraftOverview, Employee, EmployeeFilter,
        ProjectDraft,
    },
};

pub mod builder;
pub mod reference;
pub mod sqlite;

pub use builder::GatewayBuilder;
pub use reference::{Lookup, ReferenceData};
pub use sqlite::SqliteGateway;

/// Store that owns canonical drafts.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Idempotent upsert by id. Assigns an id when absent, refreshes
    /// `updated_at` and keeps the stored status.
    async fn save(&self, draft: &ProjectDraft) -> Result<ProjectDraft>;

    /// Upsert that also marks the draft as submitted and stamps
    /// `submitted_at`. Submitting twice keeps the first timestamp.
    async fn submit(&self, draft: &ProjectDraft) -> Result<ProjectDraft>;

    /// Loads a canonical draft by id.
    async fn load(&self, id: u64) -> Result<Option<ProjectDraft>>;

    /// Lists persisted drafts as overviews.
    async fn list_drafts(&self, filter: &DraftFilter) -> Result<Vec<DraftOverview>>;
}

/// Read-only client directory.
#[async_trait]
pub trait ClientDirectory: Send + Sync {
    async fn list_clients(&self, filter: &ClientFilter) -> Result<Vec<Client>>;
}

/// Read-only list of supported currencies.
#[async_trait]
pub trait CurrencyDirectory: Send + Sync {
    async fn list_currencies(&self) -> Result<Vec<Currency>>;
}

/// Read-only employee directory.
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    async fn search_employees(&self, filter: &EmployeeFilter) -> Result<Vec<Employee>>;
}
