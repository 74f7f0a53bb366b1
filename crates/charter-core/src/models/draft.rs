//! The aggregate project draft record.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{BudgetLedger, DraftStatus, DraftSummary, GeneralInfo, TeamRoster, Timeline, WbsTree};

/// A project record under construction.
///
/// `id` and the timestamps are owned by the persistence gateway: they stay
/// empty until the first save and are refreshed from the canonical copy the
/// gateway returns.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProjectDraft {
    /// Identifier assigned on first save
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(default)]
    pub status: DraftStatus,

    #[serde(default)]
    pub general: GeneralInfo,

    #[serde(default)]
    pub wbs: WbsTree,

    #[serde(default)]
    pub team: TeamRoster,

    #[serde(default)]
    pub budget: BudgetLedger,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<Timestamp>,
}

impl ProjectDraft {
    /// Creates an empty, unsaved draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// True once the draft has been submitted.
    pub fn is_submitted(&self) -> bool {
        self.status == DraftStatus::Submitted
    }

    /// Derived overview of the draft. Pure: reads the child structures only.
    pub fn summary(&self) -> DraftSummary {
        DraftSummary {
            project_manager_name: self.team.project_manager().map(|m| m.display_name()),
            total_budget: self.budget.total(),
            total_hours: self.wbs.total_hours(),
            timeline: Timeline {
                start: self.general.start_date,
                end: self.general.end_date,
            },
        }
    }
}
