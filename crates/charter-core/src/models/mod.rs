//! Data models for project drafts.
//!
//! A [`ProjectDraft`] aggregates four independently editable parts:
//!
//! - [`GeneralInfo`]: name, client, schedule, billing type and currency
//! - [`WbsTree`]: the work breakdown structure, a forest of phases and tasks
//! - [`TeamRoster`]: employee memberships with role and allocation
//! - [`BudgetLedger`]: positional cost lines
//!
//! Display implementations live in [`crate::display::models`].
//!
//! # Examples
//!
//! ```rust
//! use charter_core::models::{BudgetCategory, ProjectDraft, Role};
//!
//! let mut draft = ProjectDraft::new();
//! let phase = draft.wbs.add_root("Phase 1");
//! let task = draft.wbs.add_child(phase, "Task A")?;
//! draft.wbs.set_estimate_hours(task, 40.0)?;
//! draft.team.add(42, Role::ProjectManager);
//! draft.budget.add_line(BudgetCategory::Labor, "Build", 1000.0)?;
//!
//! let summary = draft.summary();
//! assert_eq!(summary.total_hours, 40.0);
//! assert_eq!(summary.total_budget, 1000.0);
//! assert_eq!(summary.project_manager_name.as_deref(), Some("Employee #42"));
//! # Ok::<(), charter_core::DraftError>(())
//! ```

pub mod budget;
pub mod draft;
pub mod filters;
pub mod general;
pub mod reference;
pub mod status;
pub mod summary;
pub mod team;
pub mod wbs;


pub use budget::{BudgetCategory, BudgetItem, BudgetLedger, BudgetLinePatch};
pub use draft::ProjectDraft;
pub use filters::DraftFilter;
pub use general::{GeneralInfo, ProjectType};
pub use reference::{Client, ClientFilter, Currency, Employee, EmployeeFilter};
pub use status::DraftStatus;
pub use summary::{DraftOverview, DraftSummary, Timeline};
pub use team::{Role, TeamMember, TeamRoster};
pub use wbs::{WbsNode, WbsRow, WbsTree};
