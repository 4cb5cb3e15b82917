//! # Domain Errors
//!
//! Error types for the Binary Value object.
//!
//! Every [`ObjectError`] maps onto the `(error class, error code)` pair a
//! requester receives in the Error PDU.

use shared_types::{ErrorClass, ErrorCode, PropertyIdentifier};
use thiserror::Error;

/// Property access errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObjectError {
    /// No object with this instance exists.
    #[error("Unknown object: binary-value {0}")]
    UnknownObject(u32),

    /// Property is not part of the object's property set.
    #[error("Unknown property: {0}")]
    UnknownProperty(PropertyIdentifier),

    /// Property is read-only, or present value writes are disabled.
    #[error("Write access denied: {0}")]
    WriteAccessDenied(PropertyIdentifier),

    /// Value failed decoding, tag or bound validation.
    #[error("Value out of range")]
    ValueOutOfRange,

    /// Array index supplied for a scalar property.
    #[error("Property is not an array")]
    PropertyIsNotAnArray,
}

impl ObjectError {
    /// Error class reported to the requester.
    pub fn error_class(&self) -> ErrorClass {
        match self {
            Self::UnknownObject(_) => ErrorClass::Object,
            _ => ErrorClass::Property,
        }
    }

    /// Error code reported to the requester.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnknownObject(_) => ErrorCode::UnknownObject,
            Self::UnknownProperty(_) => ErrorCode::UnknownProperty,
            Self::WriteAccessDenied(_) => ErrorCode::WriteAccessDenied,
            Self::ValueOutOfRange => ErrorCode::ValueOutOfRange,
            Self::PropertyIsNotAnArray => ErrorCode::PropertyIsNotAnArray,
        }
    }
}

/// Object store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Instance is above the largest encodable instance.
    #[error("Instance {instance} out of range (max {max})")]
    InstanceOutOfRange {
        /// Requested instance
        instance: u32,
        /// Largest valid instance (the wildcard)
        max: u32,
    },

    /// Store holds its configured maximum, or no free instance is left.
    #[error("Object store exhausted: capacity {capacity}")]
    CapacityExhausted {
        /// Configured capacity
        capacity: usize,
    },
}

impl StoreError {
    /// Error class reported to a CreateObject requester.
    pub fn error_class(&self) -> ErrorClass {
        match self {
            Self::InstanceOutOfRange { .. } => ErrorClass::Property,
            Self::CapacityExhausted { .. } => ErrorClass::Resources,
        }
    }

    /// Error code reported to a CreateObject requester.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::InstanceOutOfRange { .. } => ErrorCode::ValueOutOfRange,
            Self::CapacityExhausted { .. } => ErrorCode::NoSpaceForObject,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_object_is_object_class() {
        let err = ObjectError::UnknownObject(7);
        assert_eq!(err.error_class(), ErrorClass::Object);
        assert_eq!(err.error_code(), ErrorCode::UnknownObject);
        assert!(err.to_string().contains('7'));
    }

    #[test]
    fn test_property_errors_are_property_class() {
        for err in [
            ObjectError::UnknownProperty(PropertyIdentifier::Units),
            ObjectError::WriteAccessDenied(PropertyIdentifier::ObjectName),
            ObjectError::ValueOutOfRange,
            ObjectError::PropertyIsNotAnArray,
        ] {
            assert_eq!(err.error_class(), ErrorClass::Property);
        }
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ObjectError::WriteAccessDenied(PropertyIdentifier::PresentValue).error_code(),
            ErrorCode::WriteAccessDenied
        );
        assert_eq!(
            ObjectError::PropertyIsNotAnArray.error_code(),
            ErrorCode::PropertyIsNotAnArray
        );
    }

    #[test]
    fn test_store_error_mapping() {
        let err = StoreError::CapacityExhausted { capacity: 4 };
        assert_eq!(err.error_class(), ErrorClass::Resources);
        assert_eq!(err.error_code(), ErrorCode::NoSpaceForObject);
        assert!(err.to_string().contains('4'));
    }
}
