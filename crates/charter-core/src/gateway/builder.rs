//! Opens the draft store and prepares its reference data.

use std::path::{Path, PathBuf};

use log::{debug, info};
use tokio::task;

use super::SqliteGateway;
use crate::{
    db::Database,
    error::{DraftError, Result},
    models::Currency,
};

/// Configures where drafts are stored and which currencies the store offers
/// before a [`SqliteGateway`] is handed out.
#[derive(Debug, Clone, Default)]
pub struct GatewayBuilder {
    database_path: Option<PathBuf>,
    currencies: Vec<Currency>,
}

impl GatewayBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/charter/charter.db` or `~/.local/share/charter/charter.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Adds a currency to register next to the built-in ones. Codes that
    /// already exist keep their stored name.
    pub fn with_currency(mut self, code: impl Into<String>, name: impl Into<String>) -> Self {
        self.currencies.push(Currency {
            code: code.into(),
            name: name.into(),
        });
        self
    }

    /// Opens the store, creating the file and schema if needed, and registers
    /// the configured currencies.
    ///
    /// # Errors
    ///
    /// - `DraftError::FileSystem` if the parent directory cannot be created
    /// - `DraftError::InvalidArgument` for a malformed currency code or name
    /// - `DraftError::Persistence` if opening or seeding the database fails
    pub async fn build(self) -> Result<SqliteGateway> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| DraftError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let currencies = self.currencies;
        let path = db_path.clone();
        let available = task::spawn_blocking(move || prepare_store(&path, &currencies))
            .await
            .map_err(|e| DraftError::persistence("Task join error").with_source(e))??;
        info!("Draft store ready with {available} currencies");

        Ok(SqliteGateway::new(db_path))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("charter")
            .place_data_file("charter.db")
            .map_err(|e| DraftError::XdgDirectory(e.to_string()))
    }
}

/// Seeds the extra currencies and returns how many the store offers.
fn prepare_store(path: &Path, currencies: &[Currency]) -> Result<usize> {
    let mut db = Database::new(path)?;
    for currency in currencies {
        if db.add_currency(&currency.code, &currency.name)? {
            debug!("Registered currency {}", currency.code);
        }
    }
    Ok(db.list_currencies()?.len())
}
