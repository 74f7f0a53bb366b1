//! Budget ledger: ordered cost lines with a running total.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DraftError, Result};

/// Cost category of a budget line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetCategory {
    #[default]
    Labor,
    Expense,
    Software,
    Hardware,
    Travel,
    Contingency,
}

impl BudgetCategory {
    pub const ALL: [BudgetCategory; 6] = [
        BudgetCategory::Labor,
        BudgetCategory::Expense,
        BudgetCategory::Software,
        BudgetCategory::Hardware,
        BudgetCategory::Travel,
        BudgetCategory::Contingency,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetCategory::Labor => "labor",
            BudgetCategory::Expense => "expense",
            BudgetCategory::Software => "software",
            BudgetCategory::Hardware => "hardware",
            BudgetCategory::Travel => "travel",
            BudgetCategory::Contingency => "contingency",
        }
    }
}

impl FromStr for BudgetCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "labor" | "labour" => Ok(BudgetCategory::Labor),
            "expense" => Ok(BudgetCategory::Expense),
            "software" => Ok(BudgetCategory::Software),
            "hardware" => Ok(BudgetCategory::Hardware),
            "travel" => Ok(BudgetCategory::Travel),
            "contingency" => Ok(BudgetCategory::Contingency),
            _ => Err(format!("Invalid budget category: {s}")),
        }
    }
}

/// A single cost line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetItem {
    /// Stable identifier assigned when the line is created
    pub id: u64,
    pub category: BudgetCategory,
    #[serde(default)]
    pub description: String,
    pub amount: f64,
}

/// Partial update for a budget line; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetLinePatch {
    pub category: Option<BudgetCategory>,
    pub description: Option<String>,
    pub amount: Option<f64>,
}

fn check_amount(amount: f64) -> Result<f64> {
    if amount.is_finite() {
        Ok(amount)
    } else {
        Err(DraftError::invalid_argument("amount").with_reason("amount must be a finite number"))
    }
}

/// Positionally addressed list of [`BudgetItem`]s.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BudgetLedger {
    #[serde(default)]
    lines: Vec<BudgetItem>,
    #[serde(default)]
    next_id: u64,
}

impl BudgetLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[BudgetItem] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&BudgetItem> {
        self.lines.get(index)
    }

    /// Current index of the line with the given stable id.
    pub fn position_of(&self, line_id: u64) -> Option<usize> {
        self.lines.iter().position(|line| line.id == line_id)
    }

    fn allocate_id(&mut self) -> u64 {
        let highest = self.lines.iter().map(|l| l.id).max().unwrap_or(0);
        let id = self.next_id.max(highest + 1).max(1);
        self.next_id = id + 1;
        id
    }

    /// Appends a line and returns its stable id.
    pub fn add_line(
        &mut self,
        category: BudgetCategory,
        description: impl Into<String>,
        amount: f64,
    ) -> Result<u64> {
        let amount = check_amount(amount)?;
        let id = self.allocate_id();
        self.lines.push(BudgetItem {
            id,
            category,
            description: description.into(),
            amount,
        });
        Ok(id)
    }

    /// Applies a patch to the line at `index`.
    pub fn update_line(&mut self, index: usize, patch: BudgetLinePatch) -> Result<()> {
        let amount = patch.amount.map(check_amount).transpose()?;
        let line = self
            .lines
            .get_mut(index)
            .ok_or(DraftError::LineNotFound { index })?;
        if let Some(category) = patch.category {
            line.category = category;
        }
        if let Some(description) = patch.description {
            line.description = description;
        }
        if let Some(amount) = amount {
            line.amount = amount;
        }
        Ok(())
    }

    /// Removes the line at `index`; later lines shift down by one.
    pub fn remove_line(&mut self, index: usize) -> Result<BudgetItem> {
        if index >= self.lines.len() {
            return Err(DraftError::LineNotFound { index });
        }
        Ok(self.lines.remove(index))
    }

    /// Sum of all line amounts.
    pub fn total(&self) -> f64 {
        self.lines.iter().map(|line| line.amount).sum()
    }

    /// Per-category subtotals in category order, omitting empty categories.
    pub fn total_by_category(&self) -> Vec<(BudgetCategory, f64)> {
        BudgetCategory::ALL
            .iter()
            .filter_map(|category| {
                let mut matched = self.lines.iter().filter(|l| l.category == *category).peekable();
                matched.peek()?;
                Some((*category, matched.map(|l| l.amount).sum()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_and_positional_remove() {
        let mut ledger = BudgetLedger::new();
        ledger.add_line(BudgetCategory::Labor, "", 1000.0).unwrap();
        let travel = ledger.add_line(BudgetCategory::Travel, "", 500.0).unwrap();
        assert_eq!(ledger.total(), 1500.0);

        let removed = ledger.remove_line(0).unwrap();
        assert_eq!(removed.category, BudgetCategory::Labor);
        assert_eq!(ledger.total(), 500.0);
        assert_eq!(ledger.get(0).unwrap().category, BudgetCategory::Travel);
        assert_eq!(ledger.position_of(travel), Some(0));
    }

    #[test]
    fn test_update_line_patch() {
        let mut ledger = BudgetLedger::new();
        ledger.add_line(BudgetCategory::default(), "", 0.0).unwrap();
        ledger
            .update_line(
                0,
                BudgetLinePatch {
                    description: Some("Licenses".to_string()),
                    category: Some(BudgetCategory::Software),
                    ..Default::default()
                },
            )
            .unwrap();
        ledger
            .update_line(
                0,
                BudgetLinePatch {
                    amount: Some(250.5),
                    ..Default::default()
                },
            )
            .unwrap();

        let line = ledger.get(0).unwrap();
        assert_eq!(line.category, BudgetCategory::Software);
        assert_eq!(line.description, "Licenses");
        assert_eq!(line.amount, 250.5);
    }

    #[test]
    fn test_out_of_range_and_invalid_amount() {
        let mut ledger = BudgetLedger::new();
        assert!(matches!(
            ledger.remove_line(0),
            Err(DraftError::LineNotFound { index: 0 })
        ));
        assert!(ledger
            .update_line(3, BudgetLinePatch::default())
            .is_err());
        assert!(ledger
            .add_line(BudgetCategory::Labor, "", f64::INFINITY)
            .is_err());
        assert!(ledger.is_empty());

        ledger.add_line(BudgetCategory::Labor, "", 10.0).unwrap();
        let patch = BudgetLinePatch {
            amount: Some(f64::NAN),
            description: Some("ignored".to_string()),
            ..Default::default()
        };
        assert!(ledger.update_line(0, patch).is_err());
        assert_eq!(ledger.get(0).unwrap().description, "");
    }

    #[test]
    fn test_line_ids_are_stable() {
        let mut ledger = BudgetLedger::new();
        let a = ledger.add_line(BudgetCategory::Labor, "a", 1.0).unwrap();
        let b = ledger.add_line(BudgetCategory::Labor, "b", 1.0).unwrap();
        ledger.remove_line(1).unwrap();
        let c = ledger.add_line(BudgetCategory::Labor, "c", 1.0).unwrap();
        assert_ne!(b, c);
        assert_eq!(ledger.position_of(a), Some(0));
        assert_eq!(ledger.position_of(c), Some(1));
        assert_eq!(ledger.position_of(b), None);
    }

    #[test]
    fn test_total_by_category() {
        let mut ledger = BudgetLedger::new();
        ledger.add_line(BudgetCategory::Travel, "", 100.0).unwrap();
        ledger.add_line(BudgetCategory::Labor, "", 300.0).unwrap();
        ledger.add_line(BudgetCategory::Travel, "", 50.0).unwrap();

        assert_eq!(
            ledger.total_by_category(),
            vec![
                (BudgetCategory::Labor, 300.0),
                (BudgetCategory::Travel, 150.0)
            ]
        );
    }
}
