//! General project information captured on the first wizard step.

use std::str::FromStr;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Billing type of the project.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    #[default]
    External,
    Internal,
    NonBillable,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::External => "external",
            ProjectType::Internal => "internal",
            ProjectType::NonBillable => "non-billable",
        }
    }
}

impl FromStr for ProjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "external" => Ok(ProjectType::External),
            "internal" => Ok(ProjectType::Internal),
            "non-billable" | "nonbillable" => Ok(ProjectType::NonBillable),
            _ => Err(format!("Invalid project type: {s}")),
        }
    }
}

/// Identity, schedule and commercial settings of a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GeneralInfo {
    /// Project name (required before leaving the first step)
    #[serde(default)]
    pub name: String,

    /// Optional short project code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Reference into the client directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Date>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Date>,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub project_type: ProjectType,

    /// ISO currency code (required before leaving the first step)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl GeneralInfo {
    /// True when a non-blank name is set.
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// True when a non-blank currency is set.
    pub fn has_currency(&self) -> bool {
        self.currency.as_deref().is_some_and(|c| !c.trim().is_empty())
    }

    /// False only when both dates are present and the start is after the end.
    pub fn dates_ordered(&self) -> bool {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => start <= end,
            _ => true,
        }
    }
}
