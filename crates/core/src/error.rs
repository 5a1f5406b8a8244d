use crate::validation::FieldError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// `id` is kept as the raw path segment so unparsable ids are reported
    /// the same way as ids with no matching row.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),
}

impl CoreError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}
