//! Domain layer for the support desk: catalog administration, the customer
//! conversation state machine and the ticket log.
//!
//! Storage is abstracted behind [`repository::SupportRepository`]; concrete
//! backends live in `supportbot-infrastructure`.

pub mod catalog;
pub mod clock;
pub mod config;
pub mod confirm;
pub mod conversation;
pub mod error;
pub mod export;
pub mod repository;
pub mod ticket;

#[cfg(test)]
mod test_support;

// Re-export common error type
pub use error::{Result, SupportError};
