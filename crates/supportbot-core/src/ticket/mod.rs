//! Support tickets.
//!
//! - `model`: the ticket record and its status
//! - `logger`: id generation and append-and-persist logging

mod logger;
mod model;

pub use logger::{
    DEFAULT_TICKET_PREFIX, TicketIdGenerator, TicketLogger, format_ticket_timestamp,
};
pub use model::{SupportTicket, TicketStatus};
