//! Support ticket domain models.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Outcome of a customer conversation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TicketStatus {
    /// A scripted solution was shown.
    Resolved,
    /// No predefined issue matched; handed to a specialist.
    Escalated,
}

/// A durable record of one customer interaction.
///
/// Tickets are append-only: once logged they are never edited, only removed
/// all at once by clearing the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportTicket {
    /// Time-derived ticket id, e.g. `SUP123456`.
    pub id: String,
    /// Human-readable local time of creation.
    pub timestamp: String,
    /// Display name of the product at logging time.
    #[serde(rename = "product")]
    pub product_name: String,
    /// Identity field values keyed by field label.
    pub customer_data: IndexMap<String, String>,
    /// Issue name, or the customer's own description when escalated.
    pub issue: String,
    pub status: TicketStatus,
}

impl SupportTicket {
    /// Formats the customer data as `label: value` pairs joined by `separator`.
    pub fn customer_summary(&self, separator: &str) -> String {
        self.customer_data
            .iter()
            .map(|(field, value)| format!("{}: {}", field, value))
            .collect::<Vec<_>>()
            .join(separator)
    }
}
