//! Error types for the support desk.

use thiserror::Error;

/// A shared error type for the whole support desk.
///
/// Variants fall into four groups: validation (bad or missing operator /
/// customer input), conflicts (duplicate keys, edits in progress),
/// persistence (I/O and serialization) and the empty-catalog condition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SupportError {
    /// Required input was missing or blank.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A product with the same derived key already exists.
    #[error("A product with the name \"{name}\" already exists (key '{key}')")]
    DuplicateProduct { name: String, key: String },

    /// The product is currently open for editing and cannot be deleted.
    #[error("Product '{key}' is currently being edited; cancel the edit first")]
    ProductInEdit { key: String },

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// No products are configured, so the customer flow cannot start.
    #[error("No products are configured")]
    CatalogEmpty,

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SupportError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Serialization error
    pub fn serialization(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Serialization {
            format: format.into(),
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a validation error (recoverable by re-prompting)
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a conflict error (duplicate key or edit in progress)
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::DuplicateProduct { .. } | Self::ProductInEdit { .. })
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error came from the durable store.
    ///
    /// Persistence errors never roll back the in-memory mutation that
    /// preceded them.
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Serialization { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for SupportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for SupportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for SupportError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for SupportError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, SupportError>`.
pub type Result<T> = std::result::Result<T, SupportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifiers() {
        assert!(SupportError::validation("x").is_validation());
        assert!(
            SupportError::DuplicateProduct {
                name: "Router".to_string(),
                key: "router".to_string(),
            }
            .is_conflict()
        );
        assert!(
            SupportError::ProductInEdit {
                key: "router".to_string()
            }
            .is_conflict()
        );
        assert!(SupportError::io("disk full").is_persistence());
        assert!(SupportError::serialization("JSON", "eof").is_persistence());
        assert!(!SupportError::CatalogEmpty.is_persistence());
    }

    #[test]
    fn test_from_serde_json_error() {
        let err = serde_json::from_str::<Vec<String>>("{").unwrap_err();
        let converted: SupportError = err.into();
        assert!(matches!(
            converted,
            SupportError::Serialization { ref format, .. } if format == "JSON"
        ));
    }

    #[test]
    fn test_duplicate_message_names_product() {
        let err = SupportError::DuplicateProduct {
            name: "Wi Fi Router!".to_string(),
            key: "wi_fi_router".to_string(),
        };
        assert!(err.to_string().contains("Wi Fi Router!"));
    }
}
