use colored::Colorize;
use rustyline::DefaultEditor;
use supportbot_core::confirm::{ConfirmationRequest, Confirmer};

/// Asks on the terminal, or confirms everything when `--yes` was given.
pub struct PromptConfirmer {
    assume_yes: bool,
}

impl PromptConfirmer {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Confirmer for PromptConfirmer {
    fn confirm(&self, request: &ConfirmationRequest) -> bool {
        if self.assume_yes {
            tracing::debug!("[Admin] Auto-confirmed: {:?}", request);
            return true;
        }

        println!("{}", request.prompt().bright_yellow());
        let answer = DefaultEditor::new().and_then(|mut editor| editor.readline("[y/N] "));
        match answer {
            Ok(line) => is_yes(&line),
            Err(e) => {
                tracing::debug!("[Admin] Confirmation aborted: {}", e);
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
