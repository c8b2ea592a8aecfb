use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A required key is absent from a request body. The display string is
    /// the exact message returned to clients.
    #[error("Request body must include {0}.")]
    MissingField(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A failure with no client-side cause. Never shown to clients verbatim.
    #[error("Internal error: {0}")]
    Internal(String),
}
