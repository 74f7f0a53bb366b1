//! Core library for the Charter project drafting wizard.
//!
//! A project record is drafted in four gated steps (general information,
//! work breakdown, team, budget) and then submitted. This crate owns the
//! draft and its derived totals; storage and reference directories sit
//! behind the async traits in [`gateway`].
//!
//! - [`models`]: the draft and its parts ([`WbsTree`], [`TeamRoster`],
//!   [`BudgetLedger`], [`GeneralInfo`])
//! - [`wizard`]: step sequencing, gate rules, save and submit
//! - [`gateway`]: persistence and directory traits, stale-lookup handling and
//!   the SQLite implementation
//! - [`display`]: markdown `Display` impls and result wrappers
//! - [`export`]: flat JSON export
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use charter_core::{GatewayBuilder, PersistenceGateway, Wizard};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let gateway = GatewayBuilder::new()
//!     .with_database_path(Some("charter.db"))
//!     .build()
//!     .await?;
//!
//! let mut wizard = Wizard::new(gateway.clone());
//! wizard.edit_general(|general| general.name = "Apollo".to_string())?;
//! let saved = wizard.save().await?;
//! println!("{saved}");
//!
//! for overview in gateway.list_drafts(&Default::default()).await? {
//!     println!("{overview}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod error;
pub mod export;
pub mod gateway;
pub mod models;
pub mod wizard;

// Re-export commonly used types
pub use db::Database;
pub use display::{
    Clients, CreateResult, Currencies, DeleteResult, DraftOverviews, Employees, LocalDateTime,
    OperationStatus, UpdateResult,
};
pub use error::{DraftError, ErrorKind, Result};
pub use export::{ExportDocument, ExportPart};
pub use gateway::{
    ClientDirectory, CurrencyDirectory, EmployeeDirectory, GatewayBuilder, Lookup,
    PersistenceGateway, ReferenceData, SqliteGateway,
};
pub use models::{
    BudgetCategory, BudgetItem, BudgetLedger, BudgetLinePatch, Client, ClientFilter, Currency,
    DraftFilter, DraftOverview, DraftStatus, DraftSummary, Employee, EmployeeFilter, GeneralInfo,
    ProjectDraft, ProjectType, Role, TeamMember, TeamRoster, Timeline, WbsNode, WbsTree,
};
pub use wizard::{GateRule, SubmitPolicy, Wizard, WizardStep};
