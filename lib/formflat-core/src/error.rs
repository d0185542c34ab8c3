//! Error types for formflat.

use derive_more::{Display, Error};

/// The single error kind produced while flattening a record.
///
/// Carries the offending field's identifier and a human-readable reason.
/// A mapping error aborts the whole flattening call; any partially built
/// [`crate::ParamSet`] must be discarded by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("cannot map field `{field}`: {reason}")]
pub struct FlattenError {
    /// Identifier of the field that could not be mapped.
    pub field: &'static str,
    /// Why the field could not be mapped.
    pub reason: String,
}

/// Result type alias using [`FlattenError`].
pub type Result<T> = std::result::Result<T, FlattenError>;

impl FlattenError {
    /// Create a mapping error with an arbitrary reason.
    #[must_use]
    pub fn mapping(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }

    /// The field's declared type has no form representation.
    #[must_use]
    pub fn unsupported(field: &'static str) -> Self {
        Self::mapping(field, "unsupported field type")
    }

    /// A map-kind field declared a non-string key or value type.
    #[must_use]
    pub fn map_kind(field: &'static str) -> Self {
        Self::mapping(field, "map key and value types must be strings")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FlattenError::unsupported("position");
        assert_eq!(
            err.to_string(),
            "cannot map field `position`: unsupported field type"
        );

        let err = FlattenError::map_kind("metadata");
        assert_eq!(
            err.to_string(),
            "cannot map field `metadata`: map key and value types must be strings"
        );

        let err = FlattenError::mapping("card", "boom");
        assert_eq!(err.to_string(), "cannot map field `card`: boom");
    }

    #[test]
    fn error_carries_field() {
        let err = FlattenError::unsupported("amount");
        assert_eq!(err.field, "amount");
    }
}
