//! Summary types derived from a draft.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::{DraftStatus, ProjectDraft};

/// Project schedule bounds.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Timeline {
    pub start: Option<Date>,
    pub end: Option<Date>,
}

impl Timeline {
    /// Inclusive number of calendar days, when both bounds are set and
    /// ordered.
    pub fn span_days(&self) -> Option<i32> {
        let (start, end) = (self.start?, self.end?);
        if start > end {
            return None;
        }
        let span = start.until(end).ok()?;
        Some(span.get_days() + 1)
    }
}

/// Overview shown on the review step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DraftSummary {
    /// Name of the first Project Manager on the roster
    pub project_manager_name: Option<String>,
    pub total_budget: f64,
    pub total_hours: f64,
    pub timeline: Timeline,
}

/// Compact listing entry for persisted drafts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DraftOverview {
    pub id: u64,
    pub name: String,
    pub status: DraftStatus,
    pub currency: Option<String>,
    pub wbs_nodes: usize,
    pub team_size: usize,
    pub total_hours: f64,
    pub total_budget: f64,
    pub updated_at: Option<Timestamp>,
}

impl DraftOverview {
    /// Builds an overview from a persisted draft; `None` when unsaved.
    pub fn from_draft(draft: &ProjectDraft) -> Option<Self> {
        Some(Self {
            id: draft.id?,
            name: draft.general.name.clone(),
            status: draft.status,
            currency: draft.general.currency.clone(),
            wbs_nodes: draft.wbs.len(),
            team_size: draft.team.len(),
            total_hours: draft.wbs.total_hours(),
            total_budget: draft.budget.total(),
            updated_at: draft.updated_at,
        })
    }
}
