//! Display implementations for domain models.
//!
//! Everything renders as markdown so the CLI can feed it straight to the
//! terminal renderer.

use std::fmt;

use super::datetime::{LocalDateTime, MaybeDateTime};
use crate::models::{
    BudgetCategory, BudgetItem, BudgetLedger, Client, Currency, DraftOverview, DraftStatus,
    DraftSummary, Employee, ProjectDraft, ProjectType, Role, TeamMember, TeamRoster, Timeline,
    WbsTree,
};

impl fmt::Display for DraftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn title_or_placeholder(name: &str) -> &str {
    let name = name.trim();
    if name.is_empty() {
        "(untitled)"
    } else {
        name
    }
}

impl fmt::Display for ProjectDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = title_or_placeholder(&self.general.name);
        match self.id {
            Some(id) => writeln!(f, "# {id}. {title}")?,
            None => writeln!(f, "# {title} (unsaved)")?,
        }
        writeln!(f)?;

        let general = &self.general;
        writeln!(f, "- Status: {}", self.status.with_icon())?;
        if let Some(code) = &general.code {
            writeln!(f, "- Code: {code}")?;
        }
        if let Some(client_id) = general.client_id {
            writeln!(f, "- Client: #{client_id}")?;
        }
        writeln!(f, "- Type: {}", general.project_type)?;
        writeln!(
            f,
            "- Currency: {}",
            general.currency.as_deref().unwrap_or("not selected")
        )?;
        writeln!(
            f,
            "- Timeline: {}",
            Timeline {
                start: general.start_date,
                end: general.end_date,
            }
        )?;
        if let Some(created) = &self.created_at {
            writeln!(f, "- Created: {}", LocalDateTime(created))?;
        }
        if let Some(updated) = &self.updated_at {
            writeln!(f, "- Updated: {}", LocalDateTime(updated))?;
        }
        if let Some(submitted) = &self.submitted_at {
            writeln!(f, "- Submitted: {}", LocalDateTime(submitted))?;
        }

        if !general.description.trim().is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", general.description.trim())?;
        }

        writeln!(f, "\n## Work Breakdown\n")?;
        write!(f, "{}", self.wbs)?;
        writeln!(f, "\n## Team\n")?;
        write!(f, "{}", self.team)?;
        writeln!(f, "\n## Budget\n")?;
        write!(f, "{}", self.budget)
    }
}

impl fmt::Display for WbsTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No phases or tasks.");
        }
        for (depth, node) in self.iter_with_depth() {
            let indent = "  ".repeat(depth);
            write!(f, "{indent}- ")?;
            if let Some(code) = &node.code {
                write!(f, "`{code}` ")?;
            }
            writeln!(
                f,
                "{} (#{}, {}h)",
                node.name,
                node.id,
                node.subtree_hours()
            )?;
        }
        writeln!(f)?;
        writeln!(f, "**Total**: {}h", self.total_hours())
    }
}

impl fmt::Display for TeamMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (#{}): {}, {}%",
            self.display_name(),
            self.employee_id,
            self.role,
            self.allocation_pct
        )
    }
}

impl fmt::Display for TeamRoster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No team members.");
        }
        for member in self.members() {
            writeln!(f, "- {member}")?;
        }
        Ok(())
    }
}

impl fmt::Display for BudgetItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = if self.description.trim().is_empty() {
            "(no description)"
        } else {
            self.description.trim()
        };
        write!(f, "{}: {description}, {:.2}", self.category, self.amount)
    }
}

impl fmt::Display for BudgetLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No budget lines.");
        }
        for (index, line) in self.lines().iter().enumerate() {
            writeln!(f, "- [{index}] {line}")?;
        }
        writeln!(f)?;
        writeln!(f, "**Total**: {:.2}", self.total())
    }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.start, self.end) {
            (None, None) => write!(f, "not scheduled"),
            (Some(start), None) => write!(f, "from {start}"),
            (None, Some(end)) => write!(f, "until {end}"),
            (Some(start), Some(end)) => {
                write!(f, "{start} → {end}")?;
                if let Some(days) = self.span_days() {
                    write!(f, " ({days} days)")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for DraftSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Summary")?;
        writeln!(f)?;
        writeln!(
            f,
            "- Project Manager: {}",
            self.project_manager_name.as_deref().unwrap_or("none")
        )?;
        writeln!(f, "- Total hours: {}", self.total_hours)?;
        writeln!(f, "- Total budget: {:.2}", self.total_budget)?;
        writeln!(f, "- Timeline: {}", self.timeline)
    }
}

impl fmt::Display for DraftOverview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "## {} (ID: {})",
            title_or_placeholder(&self.name),
            self.id
        )?;
        writeln!(f)?;
        writeln!(f, "- **Status**: {}", self.status.with_icon())?;
        if let Some(currency) = &self.currency {
            writeln!(f, "- **Budget**: {:.2} {currency}", self.total_budget)?;
        } else {
            writeln!(f, "- **Budget**: {:.2}", self.total_budget)?;
        }
        writeln!(
            f,
            "- **Scope**: {} WBS nodes, {}h, {} team members",
            self.wbs_nodes, self.total_hours, self.team_size
        )?;
        writeln!(
            f,
            "- **Updated**: {}",
            MaybeDateTime(self.updated_at.as_ref())
        )?;
        writeln!(f)
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{} [{code}] (ID: {})", self.name, self.id),
            None => write!(f, "{} (ID: {})", self.name, self.id),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.name)
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)?;
        if let Some(title) = &self.title {
            write!(f, ", {title}")?;
        }
        write!(f, " (ID: {})", self.id)?;
        if !self.active {
            write!(f, " (inactive)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn sample_draft() -> ProjectDraft {
        let mut draft = ProjectDraft::new();
        draft.id = Some(3);
        draft.general.name = "Apollo".to_string();
        draft.general.currency = Some("EUR".to_string());
        let phase = draft.wbs.add_root("Phase 1");
        let task = draft.wbs.add_child(phase, "Task A").unwrap();
        draft.wbs.set_estimate_hours(task, 40.0).unwrap();
        draft.wbs.set_code(task, Some("1.1".to_string())).unwrap();
        draft.team.add(42, Role::ProjectManager);
        draft
            .budget
            .add_line(BudgetCategory::Labor, "Build", 1000.0)
            .unwrap();
        draft
    }

    #[test]
    fn test_draft_display_sections() {
        let output = sample_draft().to_string();
        assert!(output.starts_with("# 3. Apollo\n"));
        assert!(output.contains("- Status: ✎ Draft"));
        assert!(output.contains("- Currency: EUR"));
        assert!(output.contains("## Work Breakdown"));
        assert!(output.contains("## Team"));
        assert!(output.contains("## Budget"));
    }

    #[test]
    fn test_unsaved_untitled_draft() {
        let output = ProjectDraft::new().to_string();
        assert!(output.starts_with("# (untitled) (unsaved)"));
        assert!(output.contains("No phases or tasks."));
        assert!(output.contains("No team members."));
        assert!(output.contains("No budget lines."));
        assert!(output.contains("- Currency: not selected"));
    }

    #[test]
    fn test_wbs_indented_by_depth() {
        let output = sample_draft().wbs.to_string();
        assert!(output.contains("- Phase 1 (#1, 40h)\n"));
        assert!(output.contains("  - `1.1` Task A (#2, 40h)\n"));
        assert!(output.contains("**Total**: 40h"));
    }

    #[test]
    fn test_roster_and_ledger_lines() {
        let draft = sample_draft();
        assert_eq!(
            draft.team.to_string(),
            "- Employee #42 (#42): Project Manager, 100%\n"
        );
        let ledger = draft.budget.to_string();
        assert!(ledger.contains("- [0] labor: Build, 1000.00"));
        assert!(ledger.contains("**Total**: 1000.00"));
    }

    #[test]
    fn test_timeline_display() {
        let timeline = Timeline {
            start: Some(date(2024, 1, 1)),
            end: Some(date(2024, 1, 26)),
        };
        assert_eq!(timeline.to_string(), "2024-01-01 → 2024-01-26 (26 days)");
        assert_eq!(Timeline::default().to_string(), "not scheduled");
    }

    #[test]
    fn test_summary_without_manager() {
        let summary = ProjectDraft::new().summary();
        let output = summary.to_string();
        assert!(output.contains("- Project Manager: none"));
        assert!(output.contains("- Total budget: 0.00"));
    }

    #[test]
    fn test_inactive_employee_marked() {
        let employee = Employee {
            id: 5,
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            title: Some("Admiral".to_string()),
            active: false,
        };
        assert_eq!(
            employee.to_string(),
            "Grace <grace@example.com>, Admiral (ID: 5) (inactive)"
        );
    }
}
