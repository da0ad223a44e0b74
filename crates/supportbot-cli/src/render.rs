//! Terminal rendering of chat intents.

use std::io::stdout;

use colored::Colorize;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use supportbot_core::conversation::{ChatIntent, messages};

/// Prints one intent. `Schedule` is handled by the event loop and ignored here.
pub fn render(intent: &ChatIntent) {
    match intent {
        ChatIntent::BotMessage(text) => bot_line(text),
        ChatIntent::UserEcho(text) => {
            println!("{} {}", "You:".green().bold(), text.green());
        }
        ChatIntent::Options { prompt, options } => {
            bot_line(prompt);
            for (number, option) in options.iter().enumerate() {
                println!("  {} {}", format!("{}.", number + 1).yellow(), option);
            }
            println!("{}", "Type a number to choose.".bright_black());
        }
        ChatIntent::Form { prompt, fields } => {
            bot_line(prompt);
            for field in fields {
                println!("  {} {}", "-".yellow(), field);
            }
        }
        ChatIntent::Solution { steps, .. } => {
            println!("{}", "Solution Steps:".bright_cyan().bold());
            for (number, step) in steps.iter().enumerate() {
                println!("  {} {}", format!("{}.", number + 1).bright_cyan(), step);
            }
        }
        ChatIntent::TicketCreated { ticket_id } => {
            println!(
                "{}",
                format!("Support Ticket Created: #{}", ticket_id)
                    .bright_yellow()
                    .bold()
            );
            println!("{}", messages::TICKET_NOTICE.yellow());
        }
        ChatIntent::Schedule { .. } => {}
        ChatIntent::ClearTranscript => clear_screen(),
        ChatIntent::StorageError(message) => {
            eprintln!("{}", format!("Storage error: {}", message).red());
        }
    }
}

/// Prints the label of the next form field.
pub fn form_field(field: &str) {
    println!("{}", format!("{}:", field).bright_white().bold());
}

pub fn hint(text: &str) {
    println!("{}", text.bright_black());
}

fn bot_line(text: &str) {
    println!("{} {}", "Bot:".bright_blue().bold(), text.bright_blue());
}

fn clear_screen() {
    if let Err(e) = execute!(stdout(), Clear(ClearType::All), MoveTo(0, 0)) {
        tracing::debug!("[Chat] Could not clear screen: {}", e);
        println!();
    }
}
