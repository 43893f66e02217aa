use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    /// The not-found response deliberately conflates "never existed" with
    /// "already soft-deleted"; callers cannot tell the two apart.
    pub fn not_found_or_deleted() -> Self {
        Self::NotFound("Concert not found or already marked as deleted.".to_string())
    }
}
