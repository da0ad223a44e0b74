//! Events consumed by and intents emitted from the chat controller.

use std::time::Duration;

use indexmap::IndexMap;

/// Delayed continuations scheduled after a conversation ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ChatTimer {
    /// Show the follow-up message.
    Feedback,
    /// Discard the session.
    Reset,
    /// Clear the transcript and greet again.
    Restart,
}

/// Something the customer (or a timer) did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// Open the conversation.
    Start,
    /// Pick the option at this index from the last option list.
    OptionSelected(usize),
    /// Submit the identity form, values keyed by field label.
    FormSubmitted(IndexMap<String, String>),
    /// Free text typed by the customer.
    MessageReceived(String),
    TimerElapsed(ChatTimer),
}

/// A render instruction for whatever front end drives the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatIntent {
    BotMessage(String),
    /// Repeat the customer's choice back as their own message.
    UserEcho(String),
    Options {
        prompt: String,
        options: Vec<String>,
    },
    Form {
        prompt: String,
        fields: Vec<String>,
    },
    Solution {
        issue: String,
        steps: Vec<String>,
    },
    TicketCreated {
        ticket_id: String,
    },
    /// Post `TimerElapsed(timer)` back after `delay`.
    Schedule {
        delay: Duration,
        timer: ChatTimer,
    },
    ClearTranscript,
    /// The durable store could not be read or written.
    StorageError(String),
}
