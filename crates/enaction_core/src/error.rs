use thiserror::Error;

/// Errors surfaced by the agent core.
///
/// Prediction mismatches and unknown spatial lookups are not errors; they are
/// handled in place by substitution and by the doubt flag respectively.
#[derive(Debug, Error, PartialEq)]
pub enum EnactionError {
    #[error("unknown act: {0}")]
    UnknownAct(String),

    #[error("unknown schema: {0}")]
    UnknownSchema(String),

    #[error("act {0} already registered as a primitive")]
    DuplicatePrimitive(String),

    #[error("no primitive schema registered, nothing to enact")]
    NoPrimitives,
}

pub type Result<T> = std::result::Result<T, EnactionError>;
