/// Domain errors raised by `sjaplus_core` lookups and checks.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Validation failed: {0}")]
    Validation(String),
}
