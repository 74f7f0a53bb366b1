//! One-line operation confirmations.

use std::fmt;

/// Confirmation or failure message for commands that have no resource to
/// show, such as wizard navigation.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {}",
            if self.success { "Success:" } else { "Error:" },
            self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_status_display() {
        let success = OperationStatus::success("Moved to step 2 (Work Breakdown)");
        assert_eq!(
            success.to_string(),
            "Success: Moved to step 2 (Work Breakdown)\n"
        );

        let failure = OperationStatus::failure("Save failed");
        assert!(failure.to_string().starts_with("Error:"));
    }
}
