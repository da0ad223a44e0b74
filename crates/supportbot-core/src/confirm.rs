//! Confirmation policy for destructive operations.

/// A question the operator must answer before a destructive change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationRequest {
    /// Delete a product together with all of its issues.
    DeleteProduct { name: String },
    /// Replace an existing issue with the same (case-insensitive) name.
    OverwriteIssue { name: String },
    /// Delete a single issue.
    DeleteIssue { name: String },
    /// Clear the whole ticket log.
    ClearTickets,
    /// First confirmation of a full reset.
    ResetAll,
    /// Second, final confirmation of a full reset.
    ResetAllFinal,
}

impl ConfirmationRequest {
    /// Text shown to the operator.
    pub fn prompt(&self) -> String {
        match self {
            Self::DeleteProduct { name } => format!(
                "Are you sure you want to delete \"{}\" and all its associated issues?",
                name
            ),
            Self::OverwriteIssue { name } => format!(
                "Issue \"{}\" already exists for this product. Do you want to update it?",
                name
            ),
            Self::DeleteIssue { name } => {
                format!("Are you sure you want to delete the issue \"{}\"?", name)
            }
            Self::ClearTickets => "Are you sure you want to clear all support tickets? \
                This action cannot be undone."
                .to_string(),
            Self::ResetAll => "Are you sure you want to reset all data? This will delete all \
                products, issues, and tickets. This action cannot be undone."
                .to_string(),
            Self::ResetAllFinal => "This is your final warning. All data will be permanently \
                deleted. Are you absolutely sure?"
                .to_string(),
        }
    }
}

/// Answers confirmation requests.
pub trait Confirmer {
    fn confirm(&self, request: &ConfirmationRequest) -> bool;
}

/// Confirms everything (non-interactive `--yes` mode).
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirmer for AlwaysConfirm {
    fn confirm(&self, _request: &ConfirmationRequest) -> bool {
        true
    }
}

/// Declines everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverConfirm;

impl Confirmer for NeverConfirm {
    fn confirm(&self, _request: &ConfirmationRequest) -> bool {
        false
    }
}

/// Result of an operation that may be declined or have nothing to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The change was applied.
    Applied(T),
    /// The operator declined the confirmation; nothing changed.
    Cancelled,
    /// The target did not exist; nothing changed.
    NoOp,
}
