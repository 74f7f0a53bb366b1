//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::models::{BudgetItem, ProjectDraft, TeamMember, WbsNode};

/// Outcome of a create operation.
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

fn draft_id(draft: &ProjectDraft) -> String {
    draft
        .id
        .map_or_else(|| "(unsaved)".to_string(), |id| id.to_string())
}

impl fmt::Display for CreateResult<ProjectDraft> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created draft with ID: {}", draft_id(&self.resource))?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<WbsNode> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Created WBS node '{}' with ID: {}",
            self.resource.name, self.resource.id
        )
    }
}

impl fmt::Display for CreateResult<TeamMember> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Added team member {}", self.resource)
    }
}

/// A budget line together with its current position.
impl fmt::Display for CreateResult<(usize, BudgetItem)> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (index, line) = &self.resource;
        writeln!(f, "Added budget line [{index}] {line}")
    }
}

/// Outcome of an update operation, optionally listing what changed.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl fmt::Display for UpdateResult<ProjectDraft> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated draft with ID: {}", draft_id(&self.resource))?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Outcome of a delete operation.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<WbsNode> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let removed = self.resource.subtree_len();
        write!(
            f,
            "Removed WBS node '{}' (ID: {})",
            self.resource.name, self.resource.id
        )?;
        if removed > 1 {
            write!(f, " and {} descendants", removed - 1)?;
        }
        writeln!(f)
    }
}

impl fmt::Display for DeleteResult<BudgetItem> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Removed budget line {}", self.resource)
    }
}

/// Employee id and number of roster entries removed.
impl fmt::Display for DeleteResult<(u64, usize)> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (employee_id, count) = self.resource;
        let noun = if count == 1 { "entry" } else { "entries" };
        writeln!(
            f,
            "Removed {count} roster {noun} for employee #{employee_id}"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetCategory, WbsTree};

    #[test]
    fn test_update_result_lists_changes() {
        let mut draft = ProjectDraft::new();
        draft.id = Some(9);
        let result = UpdateResult::with_changes(draft, vec!["Set name".to_string()]);
        let output = result.to_string();
        assert!(output.starts_with("Updated draft with ID: 9\n"));
        assert!(output.contains("Changes made:\n- Set name"));
    }

    #[test]
    fn test_delete_node_counts_descendants() {
        let mut tree = WbsTree::new();
        let root = tree.add_root("Phase");
        tree.add_child(root, "A").unwrap();
        tree.add_child(root, "B").unwrap();
        let removed = tree.remove(root).unwrap();

        assert_eq!(
            DeleteResult::new(removed).to_string(),
            "Removed WBS node 'Phase' (ID: 1) and 2 descendants\n"
        );
    }

    #[test]
    fn test_budget_and_roster_results() {
        let line = BudgetItem {
            id: 1,
            category: BudgetCategory::Travel,
            description: "Flights".to_string(),
            amount: 250.0,
        };
        assert_eq!(
            CreateResult::new((0, line.clone())).to_string(),
            "Added budget line [0] travel: Flights, 250.00\n"
        );
        assert_eq!(
            DeleteResult::new(line).to_string(),
            "Removed budget line travel: Flights, 250.00\n"
        );
        assert_eq!(
            DeleteResult::new((7, 2)).to_string(),
            "Removed 2 roster entries for employee #7\n"
        );
    }
}
