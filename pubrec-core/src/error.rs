//! Error taxonomy for public record lookups.
//!
//! Every facade operation returns [`RecordError`]. The variants are kept
//! distinct so an adapter can map them onto its own status codes without
//! string matching.

use thiserror::Error;

/// Errors returned by the query layer.
#[derive(Error, Debug)]
pub enum RecordError {
    /// No matching row (bulletin, block, author, board, or an empty day).
    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// A direct bulletin lookup matched a blacklisted txid.
    #[error("bulletin {txid} is withheld")]
    Censored { txid: String },

    /// Caller-supplied input could not be decoded or parsed.
    #[error("malformed {field}: {reason}")]
    MalformedInput { field: &'static str, reason: String },

    /// Any other store failure (connectivity, corruption, bad SQL).
    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),
}

/// Result type alias for query layer operations
pub type Result<T> = std::result::Result<T, RecordError>;

impl RecordError {
    /// Create a not-found error
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Create a censored error
    pub fn censored(txid: impl Into<String>) -> Self {
        Self::Censored { txid: txid.into() }
    }

    /// Create a malformed input error
    pub fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            field,
            reason: reason.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_censored(&self) -> bool {
        matches!(self, Self::Censored { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = RecordError::not_found("board", "ahimsa-dev");
        assert_eq!(err.to_string(), "not found: board 'ahimsa-dev'");

        let err = RecordError::malformed("day", "input contains invalid characters");
        assert_eq!(
            err.to_string(),
            "malformed day: input contains invalid characters"
        );
    }

    #[test]
    fn store_error_conversion() {
        let err: RecordError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, RecordError::Store(_)));
        assert!(!err.is_not_found());
    }

    #[test]
    fn kind_predicates() {
        assert!(RecordError::not_found("block", "00").is_not_found());
        assert!(RecordError::censored("ab").is_censored());
        assert!(!RecordError::censored("ab").is_not_found());
    }
}
