use serde::Serialize;

use super::{RuleSet, Validator};

/// A validated contact-form submission. `email` is already canonical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl RuleSet for NewContact {
    fn apply(v: &mut Validator<'_>) -> Self {
        let name = v
            .field("name")
            .trim()
            .not_empty("Name is required")
            .max_chars(255, "Name is too long")
            .text();
        let email = v
            .field("email")
            .trim()
            .email("Valid email is required")
            .normalize_email()
            .text();
        let message = v
            .field("message")
            .trim()
            .not_empty("Message is required")
            .max_chars(1000, "Message is too long")
            .text();

        Self {
            name,
            email,
            message,
        }
    }
}
