//! Markdown formatting for drafts, listings and operation results.
//!
//! Domain models implement `Display` directly (see [`models`]); collections
//! and operation outcomes go through the newtype wrappers defined here so the
//! CLI can render everything with a single `to_string()`.
//!
//! - [`collections`]: listing wrappers (`DraftOverviews`, `Clients`, ...)
//! - [`results`]: outcome wrappers (`CreateResult`, `UpdateResult`,
//!   `DeleteResult`)
//! - [`status`]: one-line confirmations (`OperationStatus`)
//! - [`datetime`]: timestamp formatting
//!
//! ```rust
//! use charter_core::{display::CreateResult, models::ProjectDraft};
//!
//! let mut draft = ProjectDraft::new();
//! draft.id = Some(7);
//! draft.general.name = "Apollo".to_string();
//!
//! let output = CreateResult::new(draft).to_string();
//! assert!(output.contains("Created draft with ID: 7"));
//! assert!(output.contains("# 7. Apollo"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{Clients, Currencies, DraftOverviews, Employees};
pub use datetime::LocalDateTime;
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
