//! Filter types for querying persisted drafts.

use super::DraftStatus;

/// Filter options for listing drafts.
#[derive(Debug, Clone, Default)]
pub struct DraftFilter {
    /// Filter by project name (case-insensitive partial match)
    pub name_contains: Option<String>,

    /// Filter by status; `None` lists every draft
    pub status: Option<DraftStatus>,
}

impl DraftFilter {
    /// Filter for a single status.
    ///
    /// ```rust
    /// use charter_core::models::{DraftFilter, DraftStatus};
    ///
    /// let filter = DraftFilter::with_status(DraftStatus::Submitted);
    /// assert_eq!(filter.status, Some(DraftStatus::Submitted));
    /// assert!(filter.name_contains.is_none());
    /// ```
    pub fn with_status(status: DraftStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}
