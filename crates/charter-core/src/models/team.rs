//! Team roster: employees assigned to the project with a role and allocation.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::reference::Employee;
use crate::error::{DraftError, Result};

/// Default allocation for a newly added member.
pub const DEFAULT_ALLOCATION_PCT: u32 = 100;

/// Upper bound for a member's allocation.
pub const MAX_ALLOCATION_PCT: u32 = 200;

/// Project role held by a team member.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    ProjectManager,
    #[default]
    Engineer,
    Qa,
    Designer,
    BusinessAnalyst,
    FinanceController,
    Procurement,
}

impl Role {
    /// All roles in display order.
    pub const ALL: [Role; 7] = [
        Role::ProjectManager,
        Role::Engineer,
        Role::Qa,
        Role::Designer,
        Role::BusinessAnalyst,
        Role::FinanceController,
        Role::Procurement,
    ];

    /// Machine-readable identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::ProjectManager => "project_manager",
            Role::Engineer => "engineer",
            Role::Qa => "qa",
            Role::Designer => "designer",
            Role::BusinessAnalyst => "business_analyst",
            Role::FinanceController => "finance_controller",
            Role::Procurement => "procurement",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Role::ProjectManager => "Project Manager",
            Role::Engineer => "Engineer",
            Role::Qa => "QA",
            Role::Designer => "Designer",
            Role::BusinessAnalyst => "Business Analyst",
            Role::FinanceController => "Finance Controller",
            Role::Procurement => "Procurement",
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "project_manager" | "pm" => Ok(Role::ProjectManager),
            "engineer" => Ok(Role::Engineer),
            "qa" => Ok(Role::Qa),
            "designer" => Ok(Role::Designer),
            "business_analyst" | "ba" => Ok(Role::BusinessAnalyst),
            "finance_controller" => Ok(Role::FinanceController),
            "procurement" => Ok(Role::Procurement),
            _ => Err(format!("Invalid role: {s}")),
        }
    }
}

/// A single roster entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamMember {
    /// Reference into the employee directory
    pub employee_id: u64,

    /// Name captured from the directory when the member was added
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_name: Option<String>,

    /// Role on the project
    pub role: Role,

    /// Share of working time, in percent
    pub allocation_pct: u32,
}

impl TeamMember {
    /// Membership with the default allocation and no captured name.
    pub fn new(employee_id: u64, role: Role) -> Self {
        Self {
            employee_id,
            employee_name: None,
            role,
            allocation_pct: DEFAULT_ALLOCATION_PCT,
        }
    }

    /// Membership for a directory record, keeping its name.
    pub fn for_employee(employee: &Employee, role: Role) -> Self {
        Self {
            employee_name: Some(employee.name.clone()),
            ..Self::new(employee.id, role)
        }
    }

    pub fn with_allocation(mut self, pct: u32) -> Self {
        self.allocation_pct = pct;
        self
    }

    /// Name to show for this member, falling back to the employee id.
    pub fn display_name(&self) -> String {
        self.employee_name
            .clone()
            .unwrap_or_else(|| format!("Employee #{}", self.employee_id))
    }
}

/// Flat list of team memberships.
///
/// The roster does not deduplicate: the same employee may hold several
/// entries, and `remove`/`set_*` act on every matching entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct TeamRoster {
    members: Vec<TeamMember>,
}

impl TeamRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn members(&self) -> &[TeamMember] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Appends a membership with the default allocation.
    pub fn add(&mut self, employee_id: u64, role: Role) {
        self.members.push(TeamMember::new(employee_id, role));
    }

    /// Appends a membership for a directory record, keeping its name.
    pub fn add_employee(&mut self, employee: &Employee, role: Role) {
        self.members.push(TeamMember::for_employee(employee, role));
    }

    /// Appends a prepared membership. Other entries for the same employee
    /// are left as they are.
    pub fn add_member(&mut self, member: TeamMember) -> Result<()> {
        check_allocation(member.allocation_pct)?;
        self.members.push(member);
        Ok(())
    }

    /// Removes every entry for the employee and returns how many went.
    pub fn remove(&mut self, employee_id: u64) -> Result<usize> {
        let before = self.members.len();
        self.members.retain(|m| m.employee_id != employee_id);
        match before - self.members.len() {
            0 => Err(DraftError::MemberNotFound { employee_id }),
            removed => Ok(removed),
        }
    }

    fn update_matching<F>(&mut self, employee_id: u64, mut apply: F) -> Result<()>
    where
        F: FnMut(&mut TeamMember),
    {
        let mut matched = false;
        for member in self
            .members
            .iter_mut()
            .filter(|m| m.employee_id == employee_id)
        {
            apply(member);
            matched = true;
        }
        if matched {
            Ok(())
        } else {
            Err(DraftError::MemberNotFound { employee_id })
        }
    }

    /// Changes the role of every entry for the employee.
    pub fn set_role(&mut self, employee_id: u64, role: Role) -> Result<()> {
        self.update_matching(employee_id, |m| m.role = role)
    }

    /// Changes the allocation of every entry for the employee.
    pub fn set_allocation(&mut self, employee_id: u64, pct: u32) -> Result<()> {
        check_allocation(pct)?;
        self.update_matching(employee_id, |m| m.allocation_pct = pct)
    }

    /// True iff any entry holds the Project Manager role.
    pub fn has_project_manager(&self) -> bool {
        self.project_manager().is_some()
    }

    /// First entry holding the Project Manager role.
    pub fn project_manager(&self) -> Option<&TeamMember> {
        self.members.iter().find(|m| m.role == Role::ProjectManager)
    }

    /// Sum of allocations, in percent of one full-time person.
    pub fn total_allocation_pct(&self) -> u32 {
        self.members.iter().map(|m| m.allocation_pct).sum()
    }
}

fn check_allocation(pct: u32) -> Result<()> {
    if pct > MAX_ALLOCATION_PCT {
        return Err(DraftError::invalid_argument("allocation_pct")
            .with_reason(format!("must be between 0 and {MAX_ALLOCATION_PCT} (got {pct})")));
    }
    Ok(())
}
