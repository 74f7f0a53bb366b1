//! Flat JSON export of a draft or one of its parts.
//!
//! The WBS is exported as rows carrying `parent_id` and `depth` rather than
//! as a nested document, so it can be loaded into a spreadsheet directly.
//! Exporting is read-only and never touches the wizard or the gateway.

use std::str::FromStr;

use serde::Serialize;

use crate::{
    error::Result,
    models::{
        BudgetItem, DraftStatus, DraftSummary, GeneralInfo, ProjectDraft, TeamMember, WbsRow,
    },
};

/// Which part of a draft to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportPart {
    #[default]
    All,
    General,
    Wbs,
    Team,
    Budget,
}

impl FromStr for ExportPart {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "draft" => Ok(ExportPart::All),
            "general" => Ok(ExportPart::General),
            "wbs" => Ok(ExportPart::Wbs),
            "team" => Ok(ExportPart::Team),
            "budget" => Ok(ExportPart::Budget),
            _ => Err(format!("Invalid export part: {s}")),
        }
    }
}

impl ExportPart {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportPart::All => "all",
            ExportPart::General => "general",
            ExportPart::Wbs => "wbs",
            ExportPart::Team => "team",
            ExportPart::Budget => "budget",
        }
    }
}

/// Serializable export of a draft.
///
/// Only the requested part is populated; the identifying header is always
/// present.
#[derive(Debug, Serialize)]
pub struct ExportDocument<'a> {
    pub id: Option<u64>,
    pub status: DraftStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub general: Option<&'a GeneralInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wbs: Option<Vec<WbsRow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<&'a [TeamMember]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<&'a [BudgetItem]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<DraftSummary>,
}

impl<'a> ExportDocument<'a> {
    pub fn new(draft: &'a ProjectDraft, part: ExportPart) -> Self {
        let all = part == ExportPart::All;
        Self {
            id: draft.id,
            status: draft.status,
            general: (all || part == ExportPart::General).then_some(&draft.general),
            wbs: (all || part == ExportPart::Wbs).then(|| draft.wbs.rows()),
            team: (all || part == ExportPart::Team).then(|| draft.team.members()),
            budget: (all || part == ExportPart::Budget).then(|| draft.budget.lines()),
            summary: all.then(|| draft.summary()),
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::models::{BudgetCategory, Role};

    fn sample_draft() -> ProjectDraft {
        let mut draft = ProjectDraft::new();
        draft.id = Some(11);
        draft.general.name = "Apollo".to_string();
        let phase = draft.wbs.add_root("Phase 1");
        let task = draft.wbs.add_child(phase, "Task A").unwrap();
        draft.wbs.add_child(task, "Subtask").unwrap();
        draft.wbs.add_root("Phase 2");
        draft.team.add(3, Role::ProjectManager);
        draft
            .budget
            .add_line(BudgetCategory::Software, "Licences", 300.0)
            .unwrap();
        draft
    }

    #[test]
    fn test_wbs_rows_preorder_with_parents() {
        let rows = sample_draft().wbs.rows();
        let shape: Vec<_> = rows
            .iter()
            .map(|r| (r.id, r.parent_id, r.depth, r.name.as_str()))
            .collect();
        assert_eq!(
            shape,
            vec![
                (1, None, 0, "Phase 1"),
                (2, Some(1), 1, "Task A"),
                (3, Some(2), 2, "Subtask"),
                (4, None, 0, "Phase 2"),
            ]
        );
    }

    #[test]
    fn test_full_export_has_every_part() {
        let draft = sample_draft();
        let json = ExportDocument::new(&draft, ExportPart::All).to_json().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["id"], 11);
        assert_eq!(value["status"], "draft");
        assert_eq!(value["general"]["name"], "Apollo");
        assert_eq!(value["wbs"].as_array().unwrap().len(), 4);
        assert_eq!(value["team"][0]["role"], "project_manager");
        assert_eq!(value["budget"][0]["amount"], 300.0);
        assert_eq!(value["summary"]["total_budget"], 300.0);
    }

    #[test]
    fn test_part_export_omits_other_parts() {
        let draft = sample_draft();
        let json = ExportDocument::new(&draft, ExportPart::Team)
            .to_json()
            .unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert!(value.get("team").is_some());
        assert!(value.get("general").is_none());
        assert!(value.get("wbs").is_none());
        assert!(value.get("summary").is_none());
    }

    #[test]
    fn test_export_part_parsing() {
        assert_eq!("WBS".parse::<ExportPart>().unwrap(), ExportPart::Wbs);
        assert_eq!("draft".parse::<ExportPart>().unwrap(), ExportPart::All);
        assert!("timeline".parse::<ExportPart>().is_err());
    }
}
