use thiserror::Error;

/// Malformed filter, sort or page input. Always caller-correctable and raised
/// before any storage access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("field name must not be empty")]
    EmptyField,

    #[error("invalid field name '{0}'")]
    InvalidFieldName(String),

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("unsupported operator '{0}'")]
    UnsupportedOperator(String),

    #[error("unsupported sort direction '{0}'")]
    UnsupportedDirection(String),

    #[error("invalid BETWEEN value '{0}': expected exactly two comma-separated bounds")]
    InvalidBetween(String),

    #[error("invalid BETWEEN range for '{field}': lower bound {lower} is greater than upper bound {upper}")]
    ReversedBetween {
        field: String,
        lower: String,
        upper: String,
    },

    #[error("operator LIKE requires a text field, '{0}' is not one")]
    LikeOnNonText(String),

    #[error("invalid value '{value}' for {kind} field '{field}'")]
    InvalidValue {
        field: String,
        kind: &'static str,
        value: String,
    },

    #[error("invalid page request: {0}")]
    InvalidPage(String),
}
