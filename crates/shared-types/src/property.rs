//! # Property Identifiers
//!
//! Stable numeric identifiers of object properties and the array-index
//! convention used by ReadProperty / WriteProperty.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire value meaning "the whole property" rather than one array element.
pub const BACNET_ARRAY_ALL: u32 = u32::MAX;

/// Convert a wire array index into `None` (whole property) or `Some(index)`.
pub fn array_index_from_wire(raw: u32) -> Option<u32> {
    if raw == BACNET_ARRAY_ALL {
        None
    } else {
        Some(raw)
    }
}

/// Convert an optional array index back to its wire value.
pub fn array_index_to_wire(index: Option<u32>) -> u32 {
    index.unwrap_or(BACNET_ARRAY_ALL)
}

/// Property identifiers.
///
/// Named variants cover the properties the object crates know about;
/// everything else is carried as [`Other`](Self::Other).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum PropertyIdentifier {
    ActiveText,
    Description,
    EventState,
    InactiveText,
    ObjectIdentifier,
    ObjectName,
    ObjectType,
    OutOfService,
    Polarity,
    PresentValue,
    PriorityArray,
    Reliability,
    RelinquishDefault,
    StatusFlags,
    Units,
    Other(u32),
}

impl PropertyIdentifier {
    /// Numeric identifier on the wire.
    pub const fn to_u32(self) -> u32 {
        match self {
            Self::ActiveText => 4,
            Self::Description => 28,
            Self::EventState => 36,
            Self::InactiveText => 46,
            Self::ObjectIdentifier => 75,
            Self::ObjectName => 77,
            Self::ObjectType => 79,
            Self::OutOfService => 81,
            Self::Polarity => 84,
            Self::PresentValue => 85,
            Self::PriorityArray => 87,
            Self::Reliability => 103,
            Self::RelinquishDefault => 104,
            Self::StatusFlags => 111,
            Self::Units => 117,
            Self::Other(v) => v,
        }
    }

    /// Property identifier for a numeric value.
    pub const fn from_u32(value: u32) -> Self {
        match value {
            4 => Self::ActiveText,
            28 => Self::Description,
            36 => Self::EventState,
            46 => Self::InactiveText,
            75 => Self::ObjectIdentifier,
            77 => Self::ObjectName,
            79 => Self::ObjectType,
            81 => Self::OutOfService,
            84 => Self::Polarity,
            85 => Self::PresentValue,
            87 => Self::PriorityArray,
            103 => Self::Reliability,
            104 => Self::RelinquishDefault,
            111 => Self::StatusFlags,
            117 => Self::Units,
            v => Self::Other(v),
        }
    }

    /// Whether the property is array-valued and so accepts an array index.
    pub const fn is_array(self) -> bool {
        matches!(self, Self::PriorityArray)
    }
}

impl From<u32> for PropertyIdentifier {
    fn from(value: u32) -> Self {
        Self::from_u32(value)
    }
}

impl From<PropertyIdentifier> for u32 {
    fn from(value: PropertyIdentifier) -> Self {
        value.to_u32()
    }
}

impl fmt::Display for PropertyIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Other(v) => write!(f, "property-{}", v),
            named => write!(f, "{:?}", named),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_identifiers_round_trip() {
        for raw in [4, 28, 36, 46, 75, 77, 79, 81, 84, 85, 87, 103, 104, 111, 117] {
            let prop = PropertyIdentifier::from_u32(raw);
            assert!(!matches!(prop, PropertyIdentifier::Other(_)), "{}", raw);
            assert_eq!(prop.to_u32(), raw);
        }
    }

    #[test]
    fn test_unknown_identifier_is_other() {
        assert_eq!(
            PropertyIdentifier::from_u32(9999),
            PropertyIdentifier::Other(9999)
        );
        assert_eq!(PropertyIdentifier::Other(9999).to_string(), "property-9999");
    }

    #[test]
    fn test_only_priority_array_is_array() {
        assert!(PropertyIdentifier::PriorityArray.is_array());
        assert!(!PropertyIdentifier::PresentValue.is_array());
        assert!(!PropertyIdentifier::StatusFlags.is_array());
    }

    #[test]
    fn test_array_index_wire_conversion() {
        assert_eq!(array_index_from_wire(BACNET_ARRAY_ALL), None);
        assert_eq!(array_index_from_wire(3), Some(3));
        assert_eq!(array_index_to_wire(None), BACNET_ARRAY_ALL);
        assert_eq!(array_index_to_wire(Some(0)), 0);
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&PropertyIdentifier::PresentValue).unwrap();
        assert_eq!(json, "85");
        let back: PropertyIdentifier = serde_json::from_str("111").unwrap();
        assert_eq!(back, PropertyIdentifier::StatusFlags);
    }
}
