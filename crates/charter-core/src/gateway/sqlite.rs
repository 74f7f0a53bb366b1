//! SQLite-backed implementation of every gateway trait.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::task;

use super::{ClientDirectory, CurrencyDirectory, EmployeeDirectory, PersistenceGateway};
use crate::{
    db::Database,
    error::{DraftError, Result},
    models::{
        Client, ClientFilter, Currency, DraftFilter, DraftOverview, Employee, EmployeeFilter,
        ProjectDraft,
    },
    wizard::WizardStep,
};

/// Gateway that stores drafts and reference data in a local SQLite file.
///
/// Each call opens its own connection on a blocking worker thread, so the
/// gateway is cheap to clone and safe to share.
#[derive(Debug, Clone)]
pub struct SqliteGateway {
    db_path: PathBuf,
}

impl SqliteGateway {
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    /// Path of the backing database file.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    async fn run<T, F>(&self, operation: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            operation(&mut db)
        })
        .await
        .map_err(|e| DraftError::persistence("Task join error").with_source(e))?
    }

    /// Loads a draft together with the wizard step it was left on.
    pub async fn load_session(&self, id: u64) -> Result<Option<(ProjectDraft, WizardStep)>> {
        self.run(move |db| db.get_session(id)).await
    }

    /// Records the wizard step for a persisted draft.
    pub async fn store_step(&self, id: u64, step: WizardStep) -> Result<()> {
        self.run(move |db| db.set_wizard_step(id, step)).await
    }

    /// Adds a client to the directory.
    pub async fn add_client(&self, name: &str, code: Option<&str>) -> Result<Client> {
        let name = name.to_string();
        let code = code.map(String::from);
        self.run(move |db| db.add_client(&name, code.as_deref()))
            .await
    }

    /// Adds an employee to the directory.
    pub async fn add_employee(
        &self,
        name: &str,
        email: &str,
        title: Option<&str>,
    ) -> Result<Employee> {
        let name = name.to_string();
        let email = email.to_string();
        let title = title.map(String::from);
        self.run(move |db| db.add_employee(&name, &email, title.as_deref()))
            .await
    }

    /// Marks an employee active or inactive.
    pub async fn set_employee_active(&self, id: u64, active: bool) -> Result<()> {
        self.run(move |db| db.set_employee_active(id, active)).await
    }
}

#[async_trait]
impl PersistenceGateway for SqliteGateway {
    async fn save(&self, draft: &ProjectDraft) -> Result<ProjectDraft> {
        let draft = draft.clone();
        self.run(move |db| db.save_draft(&draft)).await
    }

    async fn submit(&self, draft: &ProjectDraft) -> Result<ProjectDraft> {
        let draft = draft.clone();
        self.run(move |db| db.submit_draft(&draft)).await
    }

    async fn load(&self, id: u64) -> Result<Option<ProjectDraft>> {
        self.run(move |db| db.get_draft(id)).await
    }

    async fn list_drafts(&self, filter: &DraftFilter) -> Result<Vec<DraftOverview>> {
        let filter = filter.clone();
        self.run(move |db| db.list_drafts(&filter)).await
    }
}

#[async_trait]
impl ClientDirectory for SqliteGateway {
    async fn list_clients(&self, filter: &ClientFilter) -> Result<Vec<Client>> {
        let filter = filter.clone();
        self.run(move |db| db.list_clients(&filter)).await
    }
}

#[async_trait]
impl CurrencyDirectory for SqliteGateway {
    async fn list_currencies(&self) -> Result<Vec<Currency>> {
        self.run(|db| db.list_currencies()).await
    }
}

#[async_trait]
impl EmployeeDirectory for SqliteGateway {
    async fn search_employees(&self, filter: &EmployeeFilter) -> Result<Vec<Employee>> {
        let filter = filter.clone();
        self.run(move |db| db.search_employees(&filter)).await
    }
}
