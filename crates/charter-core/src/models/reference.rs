//! Read-only reference records served by the external directories.

use serde::{Deserialize, Serialize};

/// A client the project can be billed to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Client {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// A supported currency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Currency {
    /// ISO 4217 code, e.g. `EUR`
    pub code: String,
    pub name: String,
}

/// An employee record from the employee directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Employee {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Filter for client lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientFilter {
    /// Case-insensitive partial match on name or code
    pub search: Option<String>,
}

/// Filter for employee lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    /// Case-insensitive partial match on name or email
    pub search: Option<String>,
    /// Restrict results to active employees
    pub active_only: bool,
}

impl EmployeeFilter {
    pub fn new(search: impl Into<String>, active_only: bool) -> Self {
        let search = search.into();
        Self {
            search: (!search.trim().is_empty()).then_some(search),
            active_only,
        }
    }
}
