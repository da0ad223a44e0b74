//! Customer chat REPL.
//!
//! A reader thread forwards terminal lines into a channel; scheduled timers
//! post into the same channel. The loop feeds every event to the
//! [`ChatController`] in arrival order and renders the resulting intents.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use indexmap::IndexMap;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use supportbot_core::clock::SystemClock;
use supportbot_core::conversation::{
    ChatController, ChatEvent, ChatIntent, ChatTimer, ConversationStep,
};
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::context::AppContext;
use crate::render;

enum LoopEvent {
    Line(String),
    Timer(ChatTimer),
    Quit,
}

/// Collects one identity field per line.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FormState {
    fields: Vec<String>,
    position: usize,
    values: IndexMap<String, String>,
}

impl FormState {
    fn new(fields: Vec<String>) -> Self {
        Self {
            fields,
            position: 0,
            values: IndexMap::new(),
        }
    }

    fn next_field(&self) -> Option<&str> {
        self.fields.get(self.position).map(String::as_str)
    }

    /// Records a value; returns the completed form after the last field.
    fn push(&mut self, value: &str) -> Option<IndexMap<String, String>> {
        let field = self.next_field()?.to_string();
        self.values.insert(field, value.to_string());
        self.position += 1;
        if self.next_field().is_none() {
            Some(std::mem::take(&mut self.values))
        } else {
            None
        }
    }
}

/// How the next typed line is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
enum InputMode {
    /// A numbered list is on screen.
    Options(usize),
    Form(FormState),
    /// Plain text; the controller decides whether it means anything.
    Text,
}

impl InputMode {
    /// Turns a typed line into a chat event, or `None` if it needs another line.
    fn interpret(&mut self, line: &str) -> Option<ChatEvent> {
        match self {
            InputMode::Options(count) => match line.trim().parse::<usize>() {
                Ok(number) if (1..=*count).contains(&number) => {
                    Some(ChatEvent::OptionSelected(number - 1))
                }
                _ => {
                    render::hint(&format!("Please enter a number from 1 to {}.", count));
                    None
                }
            },
            InputMode::Form(form) => {
                let completed = form.push(line);
                if completed.is_none() {
                    if let Some(field) = form.next_field() {
                        render::form_field(field);
                    }
                }
                completed.map(ChatEvent::FormSubmitted)
            }
            InputMode::Text => Some(ChatEvent::MessageReceived(line.to_string())),
        }
    }

    /// Decides the next mode from what was just rendered.
    fn after(self, intents: &[ChatIntent], step: ConversationStep) -> InputMode {
        for intent in intents.iter().rev() {
            match intent {
                ChatIntent::Options { options, .. } => return InputMode::Options(options.len()),
                ChatIntent::Form { fields, .. } => {
                    return InputMode::Form(FormState::new(fields.clone()));
                }
                _ => {}
            }
        }

        match (self, step) {
            // Rejected form: start over with the same fields.
            (InputMode::Form(form), ConversationStep::IdentityVerification) => {
                InputMode::Form(FormState::new(form.fields))
            }
            (InputMode::Options(count), ConversationStep::ProductSelection)
            | (InputMode::Options(count), ConversationStep::IssueSelection) => {
                InputMode::Options(count)
            }
            _ => InputMode::Text,
        }
    }

    fn announce(&self) {
        if let InputMode::Form(form) = self {
            if let Some(field) = form.next_field() {
                render::form_field(field);
            }
        }
    }
}

pub async fn run(ctx: &AppContext) -> Result<()> {
    let mut controller = ChatController::new(
        ctx.repository.clone(),
        &ctx.config.chat,
        Arc::new(SystemClock),
    );

    let (tx, mut rx) = mpsc::unbounded_channel::<LoopEvent>();
    spawn_reader(tx.clone())?;

    println!("{}", "=== Customer Support ===".bright_magenta().bold());
    println!("{}", "Type 'quit' to leave the chat.".bright_black());
    println!();

    let mut mode = dispatch(&mut controller, ChatEvent::Start, InputMode::Text, &tx);

    while let Some(event) = rx.recv().await {
        let chat_event = match event {
            LoopEvent::Quit => break,
            LoopEvent::Timer(timer) => ChatEvent::TimerElapsed(timer),
            LoopEvent::Line(_) if controller.session().step.is_terminal() => {
                render::hint("One moment please...");
                continue;
            }
            LoopEvent::Line(line) => match mode.interpret(&line) {
                Some(event) => event,
                None => continue,
            },
        };
        mode = dispatch(&mut controller, chat_event, mode, &tx);
    }

    println!("{}", "Goodbye!".bright_green());
    Ok(())
}

fn dispatch(
    controller: &mut ChatController,
    event: ChatEvent,
    mode: InputMode,
    tx: &UnboundedSender<LoopEvent>,
) -> InputMode {
    let intents = controller.handle(event);
    for intent in &intents {
        render::render(intent);
        if let ChatIntent::Schedule { delay, timer } = intent {
            schedule(tx.clone(), *delay, *timer);
        }
    }

    let next = mode.after(&intents, controller.session().step);
    if let Some(submission) = empty_form_submission(&intents) {
        return dispatch(controller, submission, next, tx);
    }
    next.announce();
    next
}

/// A form without fields has nothing to type, so it is submitted right away.
fn empty_form_submission(intents: &[ChatIntent]) -> Option<ChatEvent> {
    intents.iter().find_map(|intent| match intent {
        ChatIntent::Form { fields, .. } if fields.is_empty() => {
            Some(ChatEvent::FormSubmitted(IndexMap::new()))
        }
        _ => None,
    })
}

fn schedule(tx: UnboundedSender<LoopEvent>, delay: Duration, timer: ChatTimer) {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let _ = tx.send(LoopEvent::Timer(timer));
    });
}

/// Reads lines on a dedicated thread so timers keep firing while the user
/// is idle at the prompt.
fn spawn_reader(tx: UnboundedSender<LoopEvent>) -> Result<()> {
    std::thread::Builder::new().name("chat-input".to_string()).spawn(move || {
        let mut editor = match DefaultEditor::new() {
            Ok(editor) => editor,
            Err(e) => {
                tracing::error!("[Chat] Failed to open line editor: {}", e);
                let _ = tx.send(LoopEvent::Quit);
                return;
            }
        };

        loop {
            match editor.readline("> ") {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed == "quit" || trimmed == "exit" {
                        let _ = tx.send(LoopEvent::Quit);
                        break;
                    }
                    if !trimmed.is_empty() {
                        let _ = editor.add_history_entry(trimmed);
                    }
                    if tx.send(LoopEvent::Line(line)).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    let _ = tx.send(LoopEvent::Quit);
                    break;
                }
                Err(e) => {
                    tracing::error!("[Chat] Failed to read input: {}", e);
                    let _ = tx.send(LoopEvent::Quit);
                    break;
                }
            }
        }
    })?;

    Ok(())
}
