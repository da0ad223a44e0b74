//! Per-conversation session state.

use indexmap::IndexMap;
use strum::{AsRefStr, Display};

/// Where a customer conversation currently is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ConversationStep {
    /// Waiting to greet the customer.
    #[default]
    Greeting,
    /// The catalog was empty at greeting time; no further input is accepted.
    Unavailable,
    ProductSelection,
    IdentityVerification,
    IssueSelection,
    /// "Other" was picked; waiting for a free-text description.
    AwaitingOtherIssue,
    /// A scripted solution was shown and a resolved ticket logged.
    Resolved,
    /// An escalated ticket was created.
    Escalated,
}

impl ConversationStep {
    /// Whether the conversation has ended and only timers are pending.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Resolved | Self::Escalated)
    }
}

/// Ephemeral state for one customer conversation.
///
/// Never persisted. Replaced wholesale when the conversation resets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub step: ConversationStep,
    /// Key of the selected product.
    pub product: Option<String>,
    /// Identity field values in the product's field order.
    pub customer_data: IndexMap<String, String>,
    /// Selected issue name, or the customer's own description.
    pub issue: Option<String>,
    /// Set only on the escalation path, where the id is shown to the customer.
    pub ticket_id: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }
}
