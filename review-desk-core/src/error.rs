//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

use crate::types::RecordCategory;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// A per-category retrieval failed during load/refresh
    #[error("Failed to load {category}: {message}")]
    LoadFailure {
        category: RecordCategory,
        message: String,
    },

    /// Requested action is not legal for the record's current status
    #[error("Cannot {action} {category} in status '{status}'")]
    InvalidTransition {
        category: RecordCategory,
        status: String,
        action: String,
    },

    /// The status update was valid but the store rejected it
    #[error("Failed to update {category} {id}: {message}")]
    PersistenceFailure {
        category: RecordCategory,
        id: String,
        message: String,
    },

    /// Another mutation on the same record has not completed yet
    #[error("An update for {category} {id} is already in progress")]
    MutationInFlight { category: RecordCategory, id: String },

    /// Record not found
    #[error("Record not found: {category} {id}")]
    RecordNotFound { category: RecordCategory, id: String },

    /// No successful load has completed in this session
    #[error("Records have not been loaded")]
    NotLoaded,

    /// Storage layer error
    #[error("Storage error: {0}")]
    StorageError(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Configuration error
    #[error("Config error: {0}")]
    ConfigError(String),
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added. **
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::InvalidTransition { .. }
            | Self::MutationInFlight { .. }
            | Self::RecordNotFound { .. }
            | Self::NotLoaded
            | Self::ValidationError(_) => true,
            Self::LoadFailure { .. }
            | Self::PersistenceFailure { .. }
            | Self::StorageError(_)
            | Self::SerializationError(_)
            | Self::ConfigError(_) => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_transition_is_expected() {
        let err = CoreError::InvalidTransition {
            category: RecordCategory::Order,
            status: "shipped".to_string(),
            action: "cancel".to_string(),
        };
        assert!(err.is_expected());
        assert_eq!(err.to_string(), "Cannot cancel order in status 'shipped'");
    }

    #[test]
    fn store_failures_are_not_expected() {
        let err = CoreError::PersistenceFailure {
            category: RecordCategory::Feedback,
            id: "fb-1".to_string(),
            message: "permission denied".to_string(),
        };
        assert!(!err.is_expected());
        assert!(!CoreError::StorageError("offline".to_string()).is_expected());
    }

    #[test]
    fn serializes_with_code_tag() {
        let json = serde_json::to_value(CoreError::MutationInFlight {
            category: RecordCategory::ConsultationBooking,
            id: "b-1".to_string(),
        })
        .unwrap();
        assert_eq!(json["code"], "MutationInFlight");
        assert_eq!(json["details"]["category"], "consultationBooking");
        assert_eq!(json["details"]["id"], "b-1");
    }
}
