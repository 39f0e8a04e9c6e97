//! Photo record validation errors.

use thiserror::Error;

/// Reasons a provider entry is rejected by the schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum SchemaError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("required field `{0}` is empty")]
    EmptyField(&'static str),

    #[error("malformed entry: {0}")]
    Malformed(String),
}
