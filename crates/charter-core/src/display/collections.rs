//! Collection wrapper types for listings.
//!
//! Each wrapper renders one entry per item and a fixed message when empty.

use std::{fmt, ops::Index};

use crate::models::{Client, Currency, DraftOverview, Employee};

/// Defines a `Vec` newtype with slice-style accessors and a `Display` impl
/// that falls back to `$empty` for an empty collection.
macro_rules! listing {
    ($(#[$meta:meta])* $name:ident, $item:ty, $empty:literal, |$f:ident, $entry:ident| $body:expr) => {
        $(#[$meta])*
        pub struct $name(pub Vec<$item>);

        impl $name {
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            pub fn len(&self) -> usize {
                self.0.len()
            }

            pub fn get(&self, index: usize) -> Option<&$item> {
                self.0.get(index)
            }

            pub fn iter(&self) -> std::slice::Iter<'_, $item> {
                self.0.iter()
            }
        }

        impl Index<usize> for $name {
            type Output = $item;

            fn index(&self, index: usize) -> &Self::Output {
                &self.0[index]
            }
        }

        impl IntoIterator for $name {
            type Item = $item;
            type IntoIter = std::vec::IntoIter<Self::Item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.into_iter()
            }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = &'a $item;
            type IntoIter = std::slice::Iter<'a, $item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, $f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.0.is_empty() {
                    return writeln!($f, $empty);
                }
                for $entry in &self.0 {
                    $body?;
                }
                Ok(())
            }
        }
    };
}

listing!(
    /// Persisted drafts, most recently updated first.
    ///
    /// ```rust
    /// use charter_core::{display::DraftOverviews, models::{DraftOverview, DraftStatus}};
    ///
    /// let overview = DraftOverview {
    ///     id: 1,
    ///     name: "Apollo".to_string(),
    ///     status: DraftStatus::Draft,
    ///     currency: Some("EUR".to_string()),
    ///     wbs_nodes: 2,
    ///     team_size: 1,
    ///     total_hours: 40.0,
    ///     total_budget: 1000.0,
    ///     updated_at: None,
    /// };
    /// let output = DraftOverviews(vec![overview]).to_string();
    /// assert!(output.contains("## Apollo (ID: 1)"));
    /// assert_eq!(DraftOverviews(vec![]).to_string(), "No drafts found.\n");
    /// ```
    DraftOverviews,
    DraftOverview,
    "No drafts found.",
    |f, overview| write!(f, "{overview}")
);

listing!(
    /// Client directory entries.
    Clients,
    Client,
    "No clients found.",
    |f, client| writeln!(f, "- {client}")
);

listing!(
    /// Supported currencies.
    Currencies,
    Currency,
    "No currencies configured.",
    |f, currency| writeln!(f, "- {currency}")
);

listing!(
    /// Employee directory search results.
    Employees,
    Employee,
    "No employees found.",
    |f, employee| writeln!(f, "- {employee}")
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DraftStatus;

    fn overview(id: u64, name: &str) -> DraftOverview {
        DraftOverview {
            id,
            name: name.to_string(),
            status: DraftStatus::Draft,
            currency: None,
            wbs_nodes: 0,
            team_size: 0,
            total_hours: 0.0,
            total_budget: 0.0,
            updated_at: None,
        }
    }

    #[test]
    fn test_draft_overviews_display() {
        let overviews = DraftOverviews(vec![overview(1, "Apollo"), overview(2, "")]);
        let output = overviews.to_string();
        assert!(output.contains("## Apollo (ID: 1)"));
        assert!(output.contains("## (untitled) (ID: 2)"));
        assert!(output.contains("- **Updated**: never"));
        assert!(!output.starts_with("# "));
        assert_eq!(overviews.len(), 2);
        assert_eq!(overviews[1].id, 2);
    }

    #[test]
    fn test_empty_listings() {
        assert_eq!(Clients(vec![]).to_string(), "No clients found.\n");
        assert_eq!(Currencies(vec![]).to_string(), "No currencies configured.\n");
        assert_eq!(Employees(vec![]).to_string(), "No employees found.\n");
    }

    #[test]
    fn test_reference_listings() {
        let clients = Clients(vec![Client {
            id: 4,
            name: "Acme".to_string(),
            code: Some("ACM".to_string()),
        }]);
        assert_eq!(clients.to_string(), "- Acme [ACM] (ID: 4)\n");

        let currencies = Currencies(vec![Currency {
            code: "EUR".to_string(),
            name: "Euro".to_string(),
        }]);
        assert_eq!(currencies.to_string(), "- EUR: Euro\n");
    }
}
