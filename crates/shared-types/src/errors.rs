//! # Error Types
//!
//! Protocol error class / error code pairs reported back to a requester, and
//! the conversion error shared by the enumerated value types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An enumerated wire value outside the range its type defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Enumerated value {value} out of range (must be < {limit})")]
pub struct EnumeratedOutOfRange {
    /// Value received.
    pub value: u32,
    /// Exclusive upper bound.
    pub limit: u32,
}

/// Error class carried in an Error PDU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorClass {
    Device,
    Object,
    Property,
    Resources,
    Security,
    Services,
}

impl ErrorClass {
    /// Enumerated wire value.
    pub const fn to_u32(self) -> u32 {
        match self {
            Self::Device => 0,
            Self::Object => 1,
            Self::Property => 2,
            Self::Resources => 3,
            Self::Security => 4,
            Self::Services => 5,
        }
    }
}

/// Error code carried in an Error PDU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    Other,
    InvalidDataType,
    NoSpaceForObject,
    UnknownObject,
    UnknownProperty,
    ValueOutOfRange,
    WriteAccessDenied,
    PropertyIsNotAnArray,
}

impl ErrorCode {
    /// Enumerated wire value.
    pub const fn to_u32(self) -> u32 {
        match self {
            Self::Other => 0,
            Self::InvalidDataType => 9,
            Self::NoSpaceForObject => 18,
            Self::UnknownObject => 31,
            Self::UnknownProperty => 32,
            Self::ValueOutOfRange => 37,
            Self::WriteAccessDenied => 40,
            Self::PropertyIsNotAnArray => 50,
        }
    }
}
