//! Wizard steps and the gate rules attached to each of them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::ProjectDraft;

/// The four ordered wizard steps.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    #[default]
    General = 1,
    Wbs = 2,
    Team = 3,
    Budget = 4,
}

impl WizardStep {
    pub const FIRST: WizardStep = WizardStep::General;
    pub const LAST: WizardStep = WizardStep::Budget;
    pub const ALL: [WizardStep; 4] = [
        WizardStep::General,
        WizardStep::Wbs,
        WizardStep::Team,
        WizardStep::Budget,
    ];

    /// One-based step index.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Step for a one-based index.
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index).checked_sub(1)?).copied()
    }

    /// Following step, or `None` on the last one.
    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// Preceding step, or `None` on the first one.
    pub fn prev(self) -> Option<Self> {
        Self::from_index(self.index().checked_sub(1)?)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WizardStep::General => "general",
            WizardStep::Wbs => "wbs",
            WizardStep::Team => "team",
            WizardStep::Budget => "budget",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::General => "General",
            WizardStep::Wbs => "Work Breakdown",
            WizardStep::Team => "Team",
            WizardStep::Budget => "Budget",
        }
    }

    /// Rules that must hold before leaving this step.
    pub fn gate(self) -> &'static [GateRule] {
        match self {
            WizardStep::General => &[
                GateRule::NameRequired,
                GateRule::CurrencyRequired,
                GateRule::DatesOrdered,
            ],
            WizardStep::Wbs => &[GateRule::WbsRootRequired],
            WizardStep::Team => &[GateRule::ProjectManagerRequired],
            WizardStep::Budget => &[GateRule::PositiveBudget],
        }
    }

    /// First rule of this step's gate that the draft violates.
    pub fn check(self, draft: &ProjectDraft) -> Option<GateRule> {
        self.gate().iter().copied().find(|rule| !rule.holds(draft))
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.index(), self.title())
    }
}

impl FromStr for WizardStep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        if let Ok(index) = lowered.parse::<u8>() {
            return Self::from_index(index).ok_or_else(|| format!("Invalid wizard step: {s}"));
        }
        match lowered.as_str() {
            "general" => Ok(WizardStep::General),
            "wbs" => Ok(WizardStep::Wbs),
            "team" => Ok(WizardStep::Team),
            "budget" => Ok(WizardStep::Budget),
            _ => Err(format!("Invalid wizard step: {s}")),
        }
    }
}

/// A single predicate evaluated by a step gate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GateRule {
    /// Project name must not be blank
    NameRequired,
    /// A currency must be selected
    CurrencyRequired,
    /// Start date must not be after end date when both are set
    DatesOrdered,
    /// The WBS must have at least one root node
    WbsRootRequired,
    /// The roster must include a Project Manager
    ProjectManagerRequired,
    /// The budget total must be positive
    PositiveBudget,
}

impl GateRule {
    /// Evaluates the rule against a draft.
    pub fn holds(self, draft: &ProjectDraft) -> bool {
        match self {
            GateRule::NameRequired => draft.general.has_name(),
            GateRule::CurrencyRequired => draft.general.has_currency(),
            GateRule::DatesOrdered => draft.general.dates_ordered(),
            GateRule::WbsRootRequired => !draft.wbs.is_empty(),
            GateRule::ProjectManagerRequired => draft.team.has_project_manager(),
            GateRule::PositiveBudget => draft.budget.total() > 0.0,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            GateRule::NameRequired => "project name is required",
            GateRule::CurrencyRequired => "a currency must be selected",
            GateRule::DatesOrdered => "start date must not be after end date",
            GateRule::WbsRootRequired => "add at least one phase or task",
            GateRule::ProjectManagerRequired => "assign a Project Manager",
            GateRule::PositiveBudget => "budget total must be greater than zero",
        }
    }
}

impl fmt::Display for GateRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::models::{BudgetCategory, Role};

    #[test]
    fn test_step_sequence() {
        assert_eq!(WizardStep::General.next(), Some(WizardStep::Wbs));
        assert_eq!(WizardStep::Budget.next(), None);
        assert_eq!(WizardStep::General.prev(), None);
        assert_eq!(WizardStep::Team.prev(), Some(WizardStep::Wbs));
        assert_eq!(WizardStep::from_index(0), None);
        assert_eq!(WizardStep::from_index(5), None);
        for step in WizardStep::ALL {
            assert_eq!(WizardStep::from_index(step.index()), Some(step));
        }
    }

    #[test]
    fn test_step_parsing() {
        assert_eq!("3".parse::<WizardStep>(), Ok(WizardStep::Team));
        assert_eq!("Budget".parse::<WizardStep>(), Ok(WizardStep::Budget));
        assert!("9".parse::<WizardStep>().is_err());
        assert!("review".parse::<WizardStep>().is_err());
    }

    #[test]
    fn test_general_gate_order() {
        let mut draft = ProjectDraft::new();
        assert_eq!(
            WizardStep::General.check(&draft),
            Some(GateRule::NameRequired)
        );

        draft.general.name = "Apollo".to_string();
        assert_eq!(
            WizardStep::General.check(&draft),
            Some(GateRule::CurrencyRequired)
        );

        draft.general.currency = Some("USD".to_string());
        draft.general.start_date = Some(date(2025, 5, 2));
        draft.general.end_date = Some(date(2025, 5, 1));
        assert_eq!(
            WizardStep::General.check(&draft),
            Some(GateRule::DatesOrdered)
        );

        draft.general.end_date = None;
        assert_eq!(WizardStep::General.check(&draft), None);
    }

    #[test]
    fn test_later_gates() {
        let mut draft = ProjectDraft::new();
        assert_eq!(WizardStep::Wbs.check(&draft), Some(GateRule::WbsRootRequired));
        assert_eq!(
            WizardStep::Team.check(&draft),
            Some(GateRule::ProjectManagerRequired)
        );
        assert_eq!(WizardStep::Budget.check(&draft), Some(GateRule::PositiveBudget));

        draft.wbs.add_root("Phase");
        draft.team.add(1, Role::ProjectManager);
        draft
            .budget
            .add_line(BudgetCategory::Labor, "", 0.01)
            .unwrap();
        assert!(WizardStep::ALL.iter().skip(1).all(|s| s.check(&draft).is_none()));
    }

    #[test]
    fn test_zero_and_negative_budget_fail() {
        let mut draft = ProjectDraft::new();
        draft.budget.add_line(BudgetCategory::Labor, "", 0.0).unwrap();
        assert_eq!(WizardStep::Budget.check(&draft), Some(GateRule::PositiveBudget));

        draft.budget.add_line(BudgetCategory::Expense, "credit", -5.0).unwrap();
        assert_eq!(WizardStep::Budget.check(&draft), Some(GateRule::PositiveBudget));
    }
}
