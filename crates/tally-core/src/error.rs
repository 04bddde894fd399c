//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  tally-store errors   - StoreError (file / JSON failures)              │
//! │  tally-engine errors  - EngineError (channel / config failures)        │
//! │  apps/cli errors      - AppError (what the terminal user sees)         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError/EngineError → AppError  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A persisted item violates the line item rules.
    ///
    /// ## When This Occurs
    /// - A saved order was edited by hand and now holds a negative quantity
    /// - A saved order holds `NaN`/`inf` values
    #[error("Invalid line item at position {index}: {source}")]
    InvalidItem {
        index: usize,
        #[source]
        source: ValidationError,
    },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These are raised at the controller boundary, before a value can ever
/// reach the shared order state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field text could not be parsed as a number.
    #[error("{field} must be a number, got '{input}'")]
    NotANumber { field: String, input: String },

    /// Field parsed to NaN or infinity.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Value must be zero or greater.
    #[error("{field} must be >= 0")]
    MustBeNonNegative { field: String },
}

impl ValidationError {
    /// Returns the name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::NotANumber { field, .. }
            | ValidationError::NotFinite { field }
            | ValidationError::MustBeNonNegative { field } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::NotANumber {
            field: "quantity".to_string(),
            input: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be a number, got 'abc'");

        let err = ValidationError::MustBeNonNegative {
            field: "vat_rate".to_string(),
        };
        assert_eq!(err.to_string(), "vat_rate must be >= 0");
    }

    #[test]
    fn test_invalid_item_message_includes_position() {
        let err = CoreError::InvalidItem {
            index: 2,
            source: ValidationError::NotFinite {
                field: "quantity".to_string(),
            },
        };
        assert_eq!(
            err.to_string(),
            "Invalid line item at position 2: quantity must be a finite number"
        );
    }

    #[test]
    fn test_field_accessor() {
        let err = ValidationError::Required {
            field: "unit_price".to_string(),
        };
        assert_eq!(err.field(), "unit_price");
    }
}
