//! Error types for footprint generation.

use std::fmt;

use thiserror::Error;

use crate::footprint::packages::PackageFamily;

/// Result type for footprint generation.
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Why a single parameter was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum Reason {
    /// None of the accepted keys were present (or the value was blank).
    Missing {
        /// Keys that were tried, in priority order.
        keys: Vec<String>,
    },
    /// The value could not be read as a number.
    NotNumeric {
        /// The raw value.
        value: String,
    },
    /// The value must be an integer but had a fractional part.
    NotInteger {
        /// The raw value.
        value: String,
    },
    /// A dimension that must be strictly positive was zero or negative.
    NotPositive {
        /// The parsed value.
        value: f64,
    },
    /// An optional dimension was negative.
    Negative {
        /// The parsed value.
        value: f64,
    },
    /// A count was below its minimum.
    BelowMinimum {
        /// The parsed count.
        value: i64,
        /// Smallest accepted count.
        minimum: i64,
    },
    /// A count was above its maximum.
    AboveMaximum {
        /// The parsed count.
        value: i64,
        /// Largest accepted count.
        maximum: i64,
    },
    /// A two-side package needs an even pin count.
    OddPinCount {
        /// The parsed count.
        count: u32,
    },
    /// Pads would meet in the middle of a two-side package.
    PadLengthNotLessThanOverallWidth {
        /// Pad length (mm).
        pad_length: f64,
        /// Overall lead span (mm).
        overall_width: f64,
    },
    /// The pin-1 location is not one of the four corners.
    UnsupportedPin1Location {
        /// The raw value.
        value: String,
    },
    /// The footprint name was empty.
    EmptyName,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { keys } => write!(f, "missing (looked for {})", keys.join(", ")),
            Self::NotNumeric { value } => write!(f, "'{value}' is not a number"),
            Self::NotInteger { value } => write!(f, "'{value}' is not a whole number"),
            Self::NotPositive { value } => write!(f, "must be greater than 0, got {value}"),
            Self::Negative { value } => write!(f, "must not be negative, got {value}"),
            Self::BelowMinimum { value, minimum } => {
                write!(f, "must be at least {minimum}, got {value}")
            }
            Self::AboveMaximum { value, maximum } => {
                write!(f, "must be at most {maximum}, got {value}")
            }
            Self::OddPinCount { count } => {
                write!(f, "pin count must be even for a two-side package, got {count}")
            }
            Self::PadLengthNotLessThanOverallWidth {
                pad_length,
                overall_width,
            } => write!(
                f,
                "pad length ({pad_length}mm) must be less than overall width ({overall_width}mm)"
            ),
            Self::UnsupportedPin1Location { value } => {
                write!(f, "unsupported pin-1 location '{value}'")
            }
            Self::EmptyName => write!(f, "must not be empty"),
        }
    }
}

/// A parameter failed validation.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid parameter '{field}': {reason}")]
pub struct ValidationError {
    /// Field that was rejected (its primary key).
    pub field: String,
    /// Why it was rejected.
    pub reason: Reason,
}

impl ValidationError {
    /// Creates a validation error for `field`.
    pub fn new(field: impl Into<String>, reason: Reason) -> Self {
        Self {
            field: field.into(),
            reason,
        }
    }
}

/// Errors returned by [`generate_footprint`](crate::footprint::generate_footprint).
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The package family tag is not recognised.
    #[error("unsupported package family: {family}")]
    UnsupportedFamily {
        /// The tag as supplied.
        family: String,
    },

    /// Generation for a known family failed.
    #[error("generating {family} footprint failed: {source}")]
    Assembly {
        /// Family being generated.
        family: PackageFamily,
        /// Underlying validation failure.
        #[source]
        source: ValidationError,
    },
}

impl GenerateError {
    /// Creates an unsupported-family error.
    pub fn unsupported_family(family: impl Into<String>) -> Self {
        Self::UnsupportedFamily {
            family: family.into(),
        }
    }

    /// Wraps a validation failure with the family being generated.
    #[must_use]
    pub const fn assembly(family: PackageFamily, source: ValidationError) -> Self {
        Self::Assembly { family, source }
    }

    /// Returns the validation failure, if that is what went wrong.
    #[must_use]
    pub const fn validation_error(&self) -> Option<&ValidationError> {
        match self {
            Self::Assembly { source, .. } => Some(source),
            Self::UnsupportedFamily { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_names_field_and_reason() {
        let err = ValidationError::new("Pin Count", Reason::OddPinCount { count: 7 });
        let msg = err.to_string();
        assert!(msg.contains("Pin Count"));
        assert!(msg.contains("even"));
        assert!(msg.contains('7'));
    }

    #[test]
    fn assembly_error_adds_family_context() {
        let err = GenerateError::assembly(
            PackageFamily::Soic,
            ValidationError::new("Pitch", Reason::NotPositive { value: 0.0 }),
        );
        let msg = err.to_string();
        assert!(msg.starts_with("generating SOIC footprint failed:"));
        assert!(msg.contains("Pitch"));
        assert_eq!(err.validation_error().map(|e| e.field.as_str()), Some("Pitch"));
    }

    #[test]
    fn unsupported_family_display() {
        let err = GenerateError::unsupported_family("BGA");
        assert_eq!(err.to_string(), "unsupported package family: BGA");
        assert!(err.validation_error().is_none());
    }
}
