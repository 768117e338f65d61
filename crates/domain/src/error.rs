use thiserror::Error;

/// Validation failures raised at the ingress boundary.
///
/// Derivation code assumes well-formed records; everything malformed is
/// rejected here before any derivation runs, and never silently defaulted.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("invalid date `{value}`: {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("invalid amount `{0}`")]
    InvalidAmount(String),
}
