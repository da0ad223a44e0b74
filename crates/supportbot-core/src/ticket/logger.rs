//! Builds ticket records from a conversation and appends them to the log.

use std::sync::Arc;

use chrono::{DateTime, Local};

use super::model::{SupportTicket, TicketStatus};
use crate::catalog::SupportData;
use crate::clock::Clock;
use crate::conversation::Session;
use crate::error::{Result, SupportError};
use crate::repository::SupportRepository;

/// Default ticket id prefix.
pub const DEFAULT_TICKET_PREFIX: &str = "SUP";

/// Number of clock digits kept in a ticket id.
const TICKET_SUFFIX_DIGITS: u32 = 6;

/// Generates time-derived ticket ids.
///
/// An id is the prefix followed by the last six digits of the millisecond
/// clock. Two tickets created the same millisecond (or exactly 1000 seconds
/// apart) collide; the ticket log does not guard against that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketIdGenerator {
    prefix: String,
}

impl TicketIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Returns the id for the given instant.
    pub fn id_at(&self, now: DateTime<Local>) -> String {
        let modulus = 10_i64.pow(TICKET_SUFFIX_DIGITS);
        let suffix = now.timestamp_millis().rem_euclid(modulus);
        format!(
            "{}{:0width$}",
            self.prefix,
            suffix,
            width = TICKET_SUFFIX_DIGITS as usize
        )
    }
}

impl Default for TicketIdGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_TICKET_PREFIX)
    }
}

/// Formats a timestamp the way tickets display it, e.g. `3/7/2025, 2:05:09 PM`.
pub fn format_ticket_timestamp(now: DateTime<Local>) -> String {
    now.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// Appends tickets to the log and persists them immediately.
#[derive(Clone)]
pub struct TicketLogger {
    ids: TicketIdGenerator,
    clock: Arc<dyn Clock>,
}

impl TicketLogger {
    pub fn new(ids: TicketIdGenerator, clock: Arc<dyn Clock>) -> Self {
        Self { ids, clock }
    }

    /// Generates a fresh ticket id from the current time.
    pub fn next_ticket_id(&self) -> String {
        self.ids.id_at(self.clock.now())
    }

    /// Logs the outcome of `session`.
    ///
    /// The session must have a product and an issue. An id already stored in
    /// the session (escalation) is reused; otherwise a new one is generated.
    /// The ticket stays in `data` even when saving fails; the save error is
    /// returned.
    pub fn log_ticket(
        &self,
        data: &mut SupportData,
        session: &Session,
        status: TicketStatus,
        repository: &dyn SupportRepository,
    ) -> Result<SupportTicket> {
        let product_key = session
            .product
            .as_deref()
            .ok_or_else(|| SupportError::validation("No product selected for this ticket"))?;
        let issue = session
            .issue
            .clone()
            .ok_or_else(|| SupportError::validation("No issue recorded for this ticket"))?;
        let product = data
            .products
            .get(product_key)
            .ok_or_else(|| SupportError::not_found("product", product_key))?;

        let now = self.clock.now();
        let ticket = SupportTicket {
            id: session
                .ticket_id
                .clone()
                .unwrap_or_else(|| self.ids.id_at(now)),
            timestamp: format_ticket_timestamp(now),
            product_name: product.name.clone(),
            customer_data: session.customer_data.clone(),
            issue,
            status,
        };

        data.tickets.push(ticket.clone());
        tracing::info!(
            "[TicketLogger] Logged ticket {} ({}) for {}",
            ticket.id,
            ticket.status,
            ticket.product_name
        );

        repository.save(data)?;
        Ok(ticket)
    }
}
