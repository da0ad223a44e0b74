//! Customer-facing bot texts.

pub const UNAVAILABLE: &str = "Hello! I'm sorry, but our support system is currently being \
    configured. Please check back shortly or contact our support team directly. \
    Thank you for your patience! 🙏";

pub const WELCOME: &str = "Hello! Welcome to our Customer Support. I'm here to help you resolve \
    any issues you might have with our products. 😊";

pub const SELECT_PRODUCT: &str = "Please select the product you need help with:";

pub const IDENTITY_PROMPT: &str = "Please provide the following information:";

pub const FILL_ALL_FIELDS: &str = "Please fill in all required fields to proceed.";

pub const IDENTITY_VERIFIED: &str = "Thank you! Your identity has been verified. Now, let's \
    identify the issue you're experiencing.";

pub const SELECT_ISSUE: &str = "What issue are you experiencing with your device?";

/// Label of the option that is always last in the issue list.
pub const OTHER_ISSUE: &str = "Other (describe your issue)";

pub const DESCRIBE_ISSUE: &str = "I understand you're experiencing a unique issue. Please \
    describe your problem in detail so I can connect you with a specialist who can provide \
    the best assistance.";

pub const ESCALATION_APOLOGY: &str = "Thank you for providing those details. I apologize that \
    I couldn't resolve this issue immediately.";

pub const RESOLVED_FOLLOW_UP: &str = "Was this solution helpful? If you need further \
    assistance, please don't hesitate to reach out. Have a great day! 🌟";

pub const ESCALATED_FOLLOW_UP: &str = "Is there anything else I can help you with today?";

pub fn product_selected(product_name: &str) -> String {
    format!(
        "Great! You've selected {}. Now I need to verify your identity to ensure we can \
         provide you with the best support.",
        product_name
    )
}

pub fn identity_summary<'a>(entries: impl IntoIterator<Item = (&'a String, &'a String)>) -> String {
    let pairs: Vec<String> = entries
        .into_iter()
        .map(|(field, value)| format!("{}: {}", field, value))
        .collect();
    format!("Identity verification: {}", pairs.join(", "))
}

pub fn solution_intro(issue_name: &str) -> String {
    format!(
        "I can help you with that! Here's how to resolve \"{}\":",
        issue_name
    )
}

/// Body shown under a created ticket number.
pub const TICKET_NOTICE: &str = "A specialist will contact you within 24 hours regarding your \
    issue. Please keep this ticket number for reference.";
