use std::sync::Arc;
use std::time::Duration;

use indexmap::IndexMap;

use super::event::{ChatEvent, ChatIntent, ChatTimer};
use super::messages;
use super::session::{ConversationStep, Session};
use crate::catalog::SupportData;
use crate::clock::Clock;
use crate::config::ChatSettings;
use crate::error::{Result, SupportError};
use crate::repository::SupportRepository;
use crate::ticket::{TicketIdGenerator, TicketLogger, TicketStatus};

/// Drives one customer conversation at a time.
///
/// The controller holds its own copy of the catalog and ticket log, loaded
/// from the durable store at construction and again on every restart. Each
/// call to [`handle`](Self::handle) applies one event and returns the intents
/// the front end should render, in order. Events that do not apply to the
/// current step are ignored.
pub struct ChatController {
    data: SupportData,
    session: Session,
    repository: Arc<dyn SupportRepository>,
    logger: TicketLogger,
    feedback_delay: Duration,
    hold_delay: Duration,
    restart_delay: Duration,
    pending_load_error: Option<SupportError>,
}

impl ChatController {
    pub fn new(
        repository: Arc<dyn SupportRepository>,
        settings: &ChatSettings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let outcome = repository.load();
        if let Some(err) = &outcome.error {
            tracing::warn!("[Chat] Starting with empty data: {}", err);
        }

        Self {
            data: outcome.data,
            session: Session::new(),
            repository,
            logger: TicketLogger::new(
                TicketIdGenerator::new(settings.ticket_prefix.clone()),
                clock,
            ),
            feedback_delay: settings.feedback_delay(),
            hold_delay: settings.hold_delay(),
            restart_delay: settings.restart_delay(),
            pending_load_error: outcome.error,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn data(&self) -> &SupportData {
        &self.data
    }

    /// Product names in catalog order, as offered to the customer.
    pub fn product_options(&self) -> Result<Vec<String>> {
        if self.data.is_catalog_empty() {
            return Err(SupportError::CatalogEmpty);
        }
        Ok(self
            .data
            .products
            .values()
            .map(|product| product.name.clone())
            .collect())
    }

    /// Issue names for the selected product followed by the "Other" option.
    pub fn issue_options(&self) -> Vec<String> {
        let product_key = self.session.product.as_deref().unwrap_or_default();
        self.data
            .issues_for(product_key)
            .iter()
            .map(|issue| issue.name.clone())
            .chain(std::iter::once(messages::OTHER_ISSUE.to_string()))
            .collect()
    }

    /// Applies one event and returns the resulting render intents.
    pub fn handle(&mut self, event: ChatEvent) -> Vec<ChatIntent> {
        use ConversationStep as Step;

        let step = self.session.step;
        let intents = match (step, event) {
            (Step::Greeting, ChatEvent::Start) => self.greet(),
            (Step::ProductSelection, ChatEvent::OptionSelected(index)) => {
                self.select_product(index)
            }
            (Step::IdentityVerification, ChatEvent::FormSubmitted(values)) => {
                self.submit_identity(&values)
            }
            (Step::IssueSelection, ChatEvent::OptionSelected(index)) => self.select_issue(index),
            (Step::AwaitingOtherIssue, ChatEvent::MessageReceived(text)) => {
                self.describe_other_issue(&text)
            }
            (Step::Resolved | Step::Escalated, ChatEvent::TimerElapsed(ChatTimer::Feedback)) => {
                self.follow_up(step)
            }
            (Step::Resolved | Step::Escalated, ChatEvent::TimerElapsed(ChatTimer::Reset)) => {
                self.reset_session()
            }
            (Step::Greeting, ChatEvent::TimerElapsed(ChatTimer::Restart)) => self.restart(),
            (step, event) => {
                tracing::debug!("[Chat] Ignoring {:?} in step {}", event, step);
                Vec::new()
            }
        };

        if self.session.step != step {
            tracing::debug!("[Chat] {} -> {}", step, self.session.step);
        }
        intents
    }

    // ============================================================================
    // Steps
    // ============================================================================

    fn greet(&mut self) -> Vec<ChatIntent> {
        let mut intents = Vec::new();
        if let Some(err) = self.pending_load_error.take() {
            intents.push(ChatIntent::StorageError(err.to_string()));
        }

        match self.product_options() {
            Ok(options) => {
                intents.push(ChatIntent::BotMessage(messages::WELCOME.to_string()));
                intents.push(ChatIntent::Options {
                    prompt: messages::SELECT_PRODUCT.to_string(),
                    options,
                });
                self.session.step = ConversationStep::ProductSelection;
            }
            Err(_) => {
                tracing::info!("[Chat] No products configured, support unavailable");
                intents.push(ChatIntent::BotMessage(messages::UNAVAILABLE.to_string()));
                self.session.step = ConversationStep::Unavailable;
            }
        }
        intents
    }

    fn select_product(&mut self, index: usize) -> Vec<ChatIntent> {
        let Some((key, product)) = self.data.products.get_index(index) else {
            tracing::debug!("[Chat] No product at option {}", index);
            return Vec::new();
        };

        self.session.product = Some(key.clone());
        self.session.step = ConversationStep::IdentityVerification;

        vec![
            ChatIntent::UserEcho(product.name.clone()),
            ChatIntent::BotMessage(messages::product_selected(&product.name)),
            ChatIntent::Form {
                prompt: messages::IDENTITY_PROMPT.to_string(),
                fields: product.fields.clone(),
            },
        ]
    }

    fn submit_identity(&mut self, values: &IndexMap<String, String>) -> Vec<ChatIntent> {
        let product_key = self.session.product.as_deref().unwrap_or_default();
        let Some(product) = self.data.products.get(product_key) else {
            tracing::debug!("[Chat] Selected product '{}' is gone", product_key);
            return Vec::new();
        };

        let mut customer_data = IndexMap::new();
        for field in &product.fields {
            let value = values.get(field).map(|value| value.trim()).unwrap_or_default();
            if value.is_empty() {
                return vec![ChatIntent::BotMessage(messages::FILL_ALL_FIELDS.to_string())];
            }
            customer_data.insert(field.clone(), value.to_string());
        }

        let echo = messages::identity_summary(&customer_data);
        self.session.customer_data = customer_data;
        self.session.step = ConversationStep::IssueSelection;

        vec![
            ChatIntent::UserEcho(echo),
            ChatIntent::BotMessage(messages::IDENTITY_VERIFIED.to_string()),
            ChatIntent::Options {
                prompt: messages::SELECT_ISSUE.to_string(),
                options: self.issue_options(),
            },
        ]
    }

    fn select_issue(&mut self, index: usize) -> Vec<ChatIntent> {
        let product_key = self.session.product.clone().unwrap_or_default();
        let issues = self.data.issues_for(&product_key);

        if index == issues.len() {
            self.session.step = ConversationStep::AwaitingOtherIssue;
            return vec![
                ChatIntent::UserEcho(messages::OTHER_ISSUE.to_string()),
                ChatIntent::BotMessage(messages::DESCRIBE_ISSUE.to_string()),
            ];
        }

        let Some(issue) = issues.get(index).cloned() else {
            tracing::debug!("[Chat] No issue at option {}", index);
            return Vec::new();
        };

        self.session.issue = Some(issue.name.clone());
        let mut intents = vec![
            ChatIntent::UserEcho(issue.name.clone()),
            ChatIntent::BotMessage(messages::solution_intro(&issue.name)),
            ChatIntent::Solution {
                issue: issue.name,
                steps: issue.solution,
            },
        ];

        self.log_ticket(TicketStatus::Resolved, &mut intents);
        self.session.step = ConversationStep::Resolved;
        intents.push(ChatIntent::Schedule {
            delay: self.feedback_delay,
            timer: ChatTimer::Feedback,
        });
        intents
    }

    fn describe_other_issue(&mut self, text: &str) -> Vec<ChatIntent> {
        let description = text.trim();
        if description.is_empty() {
            return Vec::new();
        }

        let ticket_id = self.logger.next_ticket_id();
        self.session.issue = Some(description.to_string());
        self.session.ticket_id = Some(ticket_id.clone());

        let mut intents = vec![
            ChatIntent::BotMessage(messages::ESCALATION_APOLOGY.to_string()),
            ChatIntent::TicketCreated { ticket_id },
        ];

        self.log_ticket(TicketStatus::Escalated, &mut intents);
        self.session.step = ConversationStep::Escalated;
        intents.push(ChatIntent::Schedule {
            delay: self.feedback_delay,
            timer: ChatTimer::Feedback,
        });
        intents
    }

    fn follow_up(&mut self, step: ConversationStep) -> Vec<ChatIntent> {
        let message = if step == ConversationStep::Escalated {
            messages::ESCALATED_FOLLOW_UP
        } else {
            messages::RESOLVED_FOLLOW_UP
        };

        vec![
            ChatIntent::BotMessage(message.to_string()),
            ChatIntent::Schedule {
                delay: self.hold_delay,
                timer: ChatTimer::Reset,
            },
        ]
    }

    fn reset_session(&mut self) -> Vec<ChatIntent> {
        self.session = Session::new();
        vec![ChatIntent::Schedule {
            delay: self.restart_delay,
            timer: ChatTimer::Restart,
        }]
    }

    /// Reloads from the durable store so admin changes show up, then greets.
    fn restart(&mut self) -> Vec<ChatIntent> {
        let outcome = self.repository.load();
        if let Some(err) = &outcome.error {
            tracing::warn!("[Chat] Reload failed, continuing with empty data: {}", err);
        }
        self.data = outcome.data;
        self.pending_load_error = outcome.error;

        let mut intents = vec![ChatIntent::ClearTranscript];
        intents.extend(self.greet());
        intents
    }

    /// Logs the session as a ticket. A failed save is reported but the
    /// conversation still advances.
    fn log_ticket(&mut self, status: TicketStatus, intents: &mut Vec<ChatIntent>) {
        let result = self.logger.log_ticket(
            &mut self.data,
            &self.session,
            status,
            self.repository.as_ref(),
        );
        if let Err(err) = result {
            tracing::warn!("[Chat] Failed to log {} ticket: {}", status, err);
            intents.push(ChatIntent::StorageError(err.to_string()));
        }
    }
}
