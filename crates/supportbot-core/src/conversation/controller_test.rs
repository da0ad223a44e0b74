#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use chrono::{Local, TimeZone};
    use indexmap::IndexMap;
    use regex::Regex;

    use crate::catalog::{CatalogManager, SupportData};
    use crate::clock::FixedClock;
    use crate::config::ChatSettings;
    use crate::confirm::AlwaysConfirm;
    use crate::conversation::messages;
    use crate::conversation::{ChatController, ChatEvent, ChatIntent, ChatTimer, ConversationStep};
    use crate::test_support::MockSupportRepository;
    use crate::ticket::TicketStatus;

    fn controller_for(repository: Arc<MockSupportRepository>) -> ChatController {
        let instant = Local.with_ymd_and_hms(2025, 3, 7, 14, 5, 9).unwrap();
        ChatController::new(
            repository,
            &ChatSettings::default(),
            Arc::new(FixedClock(instant)),
        )
    }

    /// A store with one product (`Email`, `Order ID`) and one known issue.
    fn seeded_repository() -> Arc<MockSupportRepository> {
        let repository = Arc::new(MockSupportRepository::new());
        let mut manager = CatalogManager::new(repository.clone());
        manager
            .upsert_product("Router", &["Email".to_string(), "Order ID".to_string()])
            .unwrap();
        manager
            .upsert_issue(
                "router",
                "No signal",
                "Unplug the router\nWait 30 seconds\nPlug it back in",
                &AlwaysConfirm,
            )
            .unwrap();
        repository
    }

    fn form(values: &[(&str, &str)]) -> ChatEvent {
        let values: IndexMap<String, String> = values
            .iter()
            .map(|(field, value)| (field.to_string(), value.to_string()))
            .collect();
        ChatEvent::FormSubmitted(values)
    }

    /// Walks the conversation up to the issue list.
    fn verified_controller(repository: Arc<MockSupportRepository>) -> ChatController {
        let mut controller = controller_for(repository);
        controller.handle(ChatEvent::Start);
        controller.handle(ChatEvent::OptionSelected(0));
        controller.handle(form(&[("Email", "a@b.c"), ("Order ID", "42")]));
        assert_eq!(controller.session().step, ConversationStep::IssueSelection);
        controller
    }

    fn stored_tickets(repository: &MockSupportRepository) -> usize {
        repository
            .stored()
            .map(|data| data.tickets.len())
            .unwrap_or_default()
    }

    #[test]
    fn test_empty_catalog_is_unavailable_and_terminal() {
        let repository = Arc::new(MockSupportRepository::new());
        let mut controller = controller_for(repository);

        let intents = controller.handle(ChatEvent::Start);

        assert_eq!(
            intents,
            vec![ChatIntent::BotMessage(messages::UNAVAILABLE.to_string())]
        );
        assert_eq!(controller.session().step, ConversationStep::Unavailable);

        assert!(controller.handle(ChatEvent::OptionSelected(0)).is_empty());
        assert!(controller.handle(ChatEvent::Start).is_empty());
        assert!(
            controller
                .handle(ChatEvent::MessageReceived("hello".to_string()))
                .is_empty()
        );
        assert_eq!(controller.session().step, ConversationStep::Unavailable);
    }

    #[test]
    fn test_product_options_on_empty_catalog() {
        let controller = controller_for(Arc::new(MockSupportRepository::new()));
        assert!(controller.product_options().is_err());
    }

    #[test]
    fn test_greeting_lists_products() {
        let mut controller = controller_for(seeded_repository());

        let intents = controller.handle(ChatEvent::Start);

        assert_eq!(intents[0], ChatIntent::BotMessage(messages::WELCOME.to_string()));
        assert_eq!(
            intents[1],
            ChatIntent::Options {
                prompt: messages::SELECT_PRODUCT.to_string(),
                options: vec!["Router".to_string()],
            }
        );
        assert_eq!(controller.session().step, ConversationStep::ProductSelection);
    }

    #[test]
    fn test_selecting_product_requests_identity_fields() {
        let mut controller = controller_for(seeded_repository());
        controller.handle(ChatEvent::Start);

        let intents = controller.handle(ChatEvent::OptionSelected(0));

        assert_eq!(intents[0], ChatIntent::UserEcho("Router".to_string()));
        assert_eq!(
            intents[2],
            ChatIntent::Form {
                prompt: messages::IDENTITY_PROMPT.to_string(),
                fields: vec!["Email".to_string(), "Order ID".to_string()],
            }
        );
        assert_eq!(controller.session().product.as_deref(), Some("router"));
        assert_eq!(
            controller.session().step,
            ConversationStep::IdentityVerification
        );
    }

    #[test]
    fn test_out_of_range_product_is_ignored() {
        let mut controller = controller_for(seeded_repository());
        controller.handle(ChatEvent::Start);

        assert!(controller.handle(ChatEvent::OptionSelected(5)).is_empty());
        assert_eq!(controller.session().step, ConversationStep::ProductSelection);
    }

    #[test]
    fn test_blank_identity_field_reprompts() {
        let repository = seeded_repository();
        let mut controller = controller_for(repository.clone());
        controller.handle(ChatEvent::Start);
        controller.handle(ChatEvent::OptionSelected(0));

        let intents = controller.handle(form(&[("Email", "a@b.c"), ("Order ID", "   ")]));

        assert_eq!(
            intents,
            vec![ChatIntent::BotMessage(messages::FILL_ALL_FIELDS.to_string())]
        );
        assert_eq!(
            controller.session().step,
            ConversationStep::IdentityVerification
        );
        assert!(controller.session().customer_data.is_empty());
        assert_eq!(stored_tickets(&repository), 0);
    }

    #[test]
    fn test_identity_values_are_trimmed_and_echoed() {
        let mut controller = controller_for(seeded_repository());
        controller.handle(ChatEvent::Start);
        controller.handle(ChatEvent::OptionSelected(0));

        let intents = controller.handle(form(&[("Order ID", " 42 "), ("Email", "a@b.c")]));

        assert_eq!(
            intents[0],
            ChatIntent::UserEcho("Identity verification: Email: a@b.c, Order ID: 42".to_string())
        );
        assert_eq!(
            intents[2],
            ChatIntent::Options {
                prompt: messages::SELECT_ISSUE.to_string(),
                options: vec!["No signal".to_string(), messages::OTHER_ISSUE.to_string()],
            }
        );
        assert_eq!(controller.session().customer_data["Order ID"], "42");
    }

    #[test]
    fn test_known_issue_logs_one_resolved_ticket() {
        let repository = seeded_repository();
        let mut controller = verified_controller(repository.clone());

        let intents = controller.handle(ChatEvent::OptionSelected(0));

        assert!(intents.contains(&ChatIntent::Solution {
            issue: "No signal".to_string(),
            steps: vec![
                "Unplug the router".to_string(),
                "Wait 30 seconds".to_string(),
                "Plug it back in".to_string(),
            ],
        }));
        assert_eq!(
            intents.last(),
            Some(&ChatIntent::Schedule {
                delay: Duration::from_millis(2000),
                timer: ChatTimer::Feedback,
            })
        );
        assert_eq!(controller.session().step, ConversationStep::Resolved);

        let stored = repository.stored().unwrap();
        assert_eq!(stored.tickets.len(), 1);
        let ticket = &stored.tickets[0];
        assert_eq!(ticket.status, TicketStatus::Resolved);
        assert_eq!(ticket.issue, "No signal");
        assert_eq!(ticket.product_name, "Router");
        assert_eq!(ticket.customer_data["Email"], "a@b.c");
        assert_eq!(ticket.timestamp, "3/7/2025, 2:05:09 PM");
    }

    #[test]
    fn test_other_issue_escalates_with_ticket_id() {
        let repository = seeded_repository();
        let mut controller = verified_controller(repository.clone());

        let intents = controller.handle(ChatEvent::OptionSelected(1));
        assert_eq!(
            intents[0],
            ChatIntent::UserEcho(messages::OTHER_ISSUE.to_string())
        );
        assert_eq!(
            controller.session().step,
            ConversationStep::AwaitingOtherIssue
        );

        let intents = controller.handle(ChatEvent::MessageReceived(
            "  screen flickers ".to_string(),
        ));

        let ticket_id = intents
            .iter()
            .find_map(|intent| match intent {
                ChatIntent::TicketCreated { ticket_id } => Some(ticket_id.clone()),
                _ => None,
            })
            .unwrap();
        assert!(Regex::new(r"^SUP\d{6}$").unwrap().is_match(&ticket_id));
        assert_eq!(controller.session().step, ConversationStep::Escalated);

        let stored = repository.stored().unwrap();
        assert_eq!(stored.tickets.len(), 1);
        assert_eq!(stored.tickets[0].id, ticket_id);
        assert_eq!(stored.tickets[0].issue, "screen flickers");
        assert_eq!(stored.tickets[0].status, TicketStatus::Escalated);
    }

    #[test]
    fn test_blank_description_is_ignored() {
        let repository = seeded_repository();
        let mut controller = verified_controller(repository.clone());
        controller.handle(ChatEvent::OptionSelected(1));

        assert!(
            controller
                .handle(ChatEvent::MessageReceived("   ".to_string()))
                .is_empty()
        );
        assert_eq!(
            controller.session().step,
            ConversationStep::AwaitingOtherIssue
        );
        assert_eq!(stored_tickets(&repository), 0);
    }

    #[test]
    fn test_free_text_outside_other_issue_is_ignored() {
        let repository = seeded_repository();
        let mut controller = controller_for(repository.clone());
        controller.handle(ChatEvent::Start);

        for _ in 0..2 {
            let intents = controller.handle(ChatEvent::MessageReceived("help".to_string()));
            assert!(intents.is_empty());
        }
        controller.handle(ChatEvent::OptionSelected(0));
        assert!(
            controller
                .handle(ChatEvent::MessageReceived("help".to_string()))
                .is_empty()
        );
        assert_eq!(
            controller.session().step,
            ConversationStep::IdentityVerification
        );
        assert_eq!(stored_tickets(&repository), 0);
    }

    #[test]
    fn test_timers_loop_back_to_greeting() {
        let repository = seeded_repository();
        let mut controller = verified_controller(repository.clone());
        controller.handle(ChatEvent::OptionSelected(1));
        controller.handle(ChatEvent::MessageReceived("screen flickers".to_string()));

        let intents = controller.handle(ChatEvent::TimerElapsed(ChatTimer::Feedback));
        assert_eq!(
            intents,
            vec![
                ChatIntent::BotMessage(messages::ESCALATED_FOLLOW_UP.to_string()),
                ChatIntent::Schedule {
                    delay: Duration::from_millis(4000),
                    timer: ChatTimer::Reset,
                },
            ]
        );

        let intents = controller.handle(ChatEvent::TimerElapsed(ChatTimer::Reset));
        assert_eq!(
            intents,
            vec![ChatIntent::Schedule {
                delay: Duration::from_millis(1000),
                timer: ChatTimer::Restart,
            }]
        );
        assert_eq!(controller.session().step, ConversationStep::Greeting);
        assert!(controller.session().product.is_none());
        assert!(controller.session().ticket_id.is_none());

        let intents = controller.handle(ChatEvent::TimerElapsed(ChatTimer::Restart));
        assert_eq!(intents[0], ChatIntent::ClearTranscript);
        assert_eq!(intents[1], ChatIntent::BotMessage(messages::WELCOME.to_string()));
        assert_eq!(controller.session().step, ConversationStep::ProductSelection);
    }

    #[test]
    fn test_resolved_follow_up_message() {
        let mut controller = verified_controller(seeded_repository());
        controller.handle(ChatEvent::OptionSelected(0));

        let intents = controller.handle(ChatEvent::TimerElapsed(ChatTimer::Feedback));

        assert_eq!(
            intents[0],
            ChatIntent::BotMessage(messages::RESOLVED_FOLLOW_UP.to_string())
        );
    }

    #[test]
    fn test_restart_picks_up_admin_changes() {
        let repository = seeded_repository();
        let mut controller = verified_controller(repository.clone());
        controller.handle(ChatEvent::OptionSelected(0));

        let mut manager = CatalogManager::new(repository.clone());
        manager
            .upsert_product("Phone", &["IMEI".to_string()])
            .unwrap();

        controller.handle(ChatEvent::TimerElapsed(ChatTimer::Feedback));
        controller.handle(ChatEvent::TimerElapsed(ChatTimer::Reset));
        let intents = controller.handle(ChatEvent::TimerElapsed(ChatTimer::Restart));

        assert!(intents.contains(&ChatIntent::Options {
            prompt: messages::SELECT_PRODUCT.to_string(),
            options: vec!["Router".to_string(), "Phone".to_string()],
        }));
        assert_eq!(controller.data().tickets.len(), 1);
    }

    #[test]
    fn test_user_input_during_terminal_delay_is_ignored() {
        let repository = seeded_repository();
        let mut controller = verified_controller(repository.clone());
        controller.handle(ChatEvent::OptionSelected(0));

        assert!(controller.handle(ChatEvent::OptionSelected(0)).is_empty());
        assert!(
            controller
                .handle(ChatEvent::TimerElapsed(ChatTimer::Restart))
                .is_empty()
        );
        assert_eq!(stored_tickets(&repository), 1);
    }

    #[test]
    fn test_save_failure_is_reported_and_conversation_advances() {
        let repository = seeded_repository();
        let mut controller = verified_controller(repository.clone());
        repository.set_fail_writes(true);

        let intents = controller.handle(ChatEvent::OptionSelected(0));

        assert!(
            intents
                .iter()
                .any(|intent| matches!(intent, ChatIntent::StorageError(_)))
        );
        assert_eq!(controller.session().step, ConversationStep::Resolved);
        assert_eq!(controller.data().tickets.len(), 1);
        assert_eq!(stored_tickets(&repository), 0);
    }

    #[test]
    fn test_empty_issue_list_offers_only_other() {
        let repository = Arc::new(MockSupportRepository::with_data(SupportData::new()));
        let mut manager = CatalogManager::new(repository.clone());
        manager.upsert_product("Tablet", &["Email".to_string()]).unwrap();

        let mut controller = controller_for(repository);
        controller.handle(ChatEvent::Start);
        controller.handle(ChatEvent::OptionSelected(0));
        let intents = controller.handle(form(&[("Email", "x@y.z")]));

        assert!(intents.contains(&ChatIntent::Options {
            prompt: messages::SELECT_ISSUE.to_string(),
            options: vec![messages::OTHER_ISSUE.to_string()],
        }));
        controller.handle(ChatEvent::OptionSelected(0));
        assert_eq!(
            controller.session().step,
            ConversationStep::AwaitingOtherIssue
        );
    }
}
