use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// A required field is missing or malformed. Carries the field's wire name.
    #[error("Invalid or missing field: {0}")]
    Validation(String),
    #[error("Not found")]
    NotFound,
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl DomainError {
    pub(crate) fn validation(field: &str) -> Self {
        DomainError::Validation(field.to_string())
    }
}
