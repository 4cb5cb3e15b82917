//! # Object Identity
//!
//! Object types and the 22-bit instance space.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest encodable instance number. Also used as the wildcard/invalid
/// instance: a create request for this value asks the device to pick one.
pub const BACNET_MAX_INSTANCE: u32 = 0x3F_FFFF;

/// Number of bits an instance occupies inside an object identifier.
pub const BACNET_INSTANCE_BITS: u32 = 22;

/// Largest encodable object type (10 bits).
pub const BACNET_MAX_OBJECT_TYPE: u16 = 0x3FF;

/// Object types of the object model.
///
/// Only the types the workspace deals with get a named variant; every other
/// value round-trips through [`Proprietary`](Self::Proprietary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u16", into = "u16")]
pub enum ObjectType {
    AnalogInput,
    AnalogOutput,
    AnalogValue,
    BinaryInput,
    BinaryOutput,
    BinaryValue,
    Device,
    MultiStateValue,
    Proprietary(u16),
}

impl ObjectType {
    /// Numeric identifier on the wire.
    pub const fn to_u16(self) -> u16 {
        match self {
            Self::AnalogInput => 0,
            Self::AnalogOutput => 1,
            Self::AnalogValue => 2,
            Self::BinaryInput => 3,
            Self::BinaryOutput => 4,
            Self::BinaryValue => 5,
            Self::Device => 8,
            Self::MultiStateValue => 19,
            Self::Proprietary(v) => v,
        }
    }

    /// Object type for a numeric identifier.
    pub const fn from_u16(value: u16) -> Self {
        match value {
            0 => Self::AnalogInput,
            1 => Self::AnalogOutput,
            2 => Self::AnalogValue,
            3 => Self::BinaryInput,
            4 => Self::BinaryOutput,
            5 => Self::BinaryValue,
            8 => Self::Device,
            19 => Self::MultiStateValue,
            v => Self::Proprietary(v),
        }
    }
}

impl From<u16> for ObjectType {
    fn from(value: u16) -> Self {
        Self::from_u16(value)
    }
}

impl From<ObjectType> for u16 {
    fn from(value: ObjectType) -> Self {
        value.to_u16()
    }
}

/// `(type, instance)` pair naming one object inside a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectIdentifier {
    /// Object type.
    pub object_type: ObjectType,
    /// Instance number, `0..=BACNET_MAX_INSTANCE`.
    pub instance: u32,
}

impl ObjectIdentifier {
    /// Create an identifier.
    pub const fn new(object_type: ObjectType, instance: u32) -> Self {
        Self {
            object_type,
            instance,
        }
    }

    /// Pack into the 32-bit wire form: 10 bits of type, 22 bits of instance.
    pub fn to_packed(self) -> u32 {
        let object_type = u32::from(self.object_type.to_u16() & BACNET_MAX_OBJECT_TYPE);
        (object_type << BACNET_INSTANCE_BITS) | (self.instance & BACNET_MAX_INSTANCE)
    }

    /// Unpack the 32-bit wire form.
    pub fn from_packed(packed: u32) -> Self {
        // Upper 10 bits always fit in a u16.
        let object_type = (packed >> BACNET_INSTANCE_BITS) as u16;
        Self {
            object_type: ObjectType::from_u16(object_type),
            instance: packed & BACNET_MAX_INSTANCE,
        }
    }
}

impl fmt::Display for ObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}:{}", self.object_type, self.instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_type_numbers() {
        assert_eq!(ObjectType::BinaryValue.to_u16(), 5);
        assert_eq!(ObjectType::from_u16(3), ObjectType::BinaryInput);
        assert_eq!(ObjectType::from_u16(600), ObjectType::Proprietary(600));
    }

    #[test]
    fn test_object_identifier_packing() {
        let id = ObjectIdentifier::new(ObjectType::BinaryValue, 42);
        assert_eq!(id.to_packed(), (5 << 22) | 42);
        assert_eq!(ObjectIdentifier::from_packed(id.to_packed()), id);
    }

    #[test]
    fn test_object_identifier_max_instance() {
        let id = ObjectIdentifier::new(ObjectType::Device, BACNET_MAX_INSTANCE);
        let unpacked = ObjectIdentifier::from_packed(id.to_packed());
        assert_eq!(unpacked.instance, BACNET_MAX_INSTANCE);
        assert_eq!(unpacked.object_type, ObjectType::Device);
    }
}
