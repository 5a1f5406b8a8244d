use serde::Serialize;

use super::{RuleSet, Validator};

/// A validated project payload, used for both create and full update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
}

impl RuleSet for NewProject {
    fn apply(v: &mut Validator<'_>) -> Self {
        let title = v
            .field("title")
            .trim()
            .not_empty("Title is required")
            .max_chars(255, "Title is too long")
            .text();
        let description = v
            .field("description")
            .trim()
            .not_empty("Description is required")
            .text();
        let image_url = v
            .field("image_url")
            .optional()
            .url("Invalid image URL")
            .opt_text();

        Self {
            title,
            description,
            image_url,
        }
    }
}
