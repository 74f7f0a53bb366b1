//! Lifecycle status of a project draft.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of draft statuses.
///
/// The only transition is `Draft` → `Submitted`; a submitted record is
/// terminal for this crate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DraftStatus {
    /// Draft is still being edited
    #[default]
    Draft,

    /// Draft has been handed over and is read-only
    Submitted,
}

impl FromStr for DraftStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(DraftStatus::Draft),
            "submitted" => Ok(DraftStatus::Submitted),
            _ => Err(format!("Invalid draft status: {s}")),
        }
    }
}

impl DraftStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftStatus::Draft => "draft",
            DraftStatus::Submitted => "submitted",
        }
    }

    /// Get status with an icon for display.
    ///
    /// ```rust
    /// use charter_core::models::DraftStatus;
    ///
    /// assert_eq!(DraftStatus::Draft.with_icon(), "✎ Draft");
    /// assert_eq!(DraftStatus::Submitted.with_icon(), "✓ Submitted");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            DraftStatus::Draft => "✎ Draft",
            DraftStatus::Submitted => "✓ Submitted",
        }
    }
}
