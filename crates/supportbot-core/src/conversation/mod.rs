//! Customer conversation domain module.
//!
//! # Module Structure
//!
//! - `session`: Per-conversation state (`Session`, `ConversationStep`)
//! - `event`: Inputs and render outputs (`ChatEvent`, `ChatIntent`, `ChatTimer`)
//! - `messages`: Bot texts
//! - `controller`: The state machine (`ChatController`)

mod controller;
#[cfg(test)]
mod controller_test;
mod event;
pub mod messages;
mod session;

pub use controller::ChatController;
pub use event::{ChatEvent, ChatIntent, ChatTimer};
pub use session::{ConversationStep, Session};
