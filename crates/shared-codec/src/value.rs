//! Decoded application values

use bitvec::prelude::*;
use shared_types::{ObjectIdentifier, PropertyIdentifier, StatusFlags};

use crate::tag::ApplicationTag;

/// Bit string content, first bit on the wire first
pub type BitString = BitVec<u8, Msb0>;

/// Calendar date. `0xFF` in any field means "unspecified".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Date {
    /// Years since 1900
    pub year_since_1900: u8,
    pub month: u8,
    pub day: u8,
    /// 1 = Monday .. 7 = Sunday
    pub weekday: u8,
}

/// Time of day. `0xFF` in any field means "unspecified".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Time {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub hundredths: u8,
}

/// One application-tagged primitive value
#[derive(Debug, Clone, PartialEq)]
pub enum ApplicationValue {
    Null,
    Boolean(bool),
    Unsigned(u32),
    Signed(i32),
    Real(f32),
    Double(f64),
    OctetString(Vec<u8>),
    CharacterString(String),
    BitString(BitString),
    Enumerated(u32),
    Date(Date),
    Time(Time),
    ObjectId(ObjectIdentifier),
}

impl ApplicationValue {
    /// The application tag this value is encoded with
    pub fn tag(&self) -> ApplicationTag {
        match self {
            Self::Null => ApplicationTag::Null,
            Self::Boolean(_) => ApplicationTag::Boolean,
            Self::Unsigned(_) => ApplicationTag::UnsignedInt,
            Self::Signed(_) => ApplicationTag::SignedInt,
            Self::Real(_) => ApplicationTag::Real,
            Self::Double(_) => ApplicationTag::Double,
            Self::OctetString(_) => ApplicationTag::OctetString,
            Self::CharacterString(_) => ApplicationTag::CharacterString,
            Self::BitString(_) => ApplicationTag::BitString,
            Self::Enumerated(_) => ApplicationTag::Enumerated,
            Self::Date(_) => ApplicationTag::Date,
            Self::Time(_) => ApplicationTag::Time,
            Self::ObjectId(_) => ApplicationTag::ObjectId,
        }
    }
}

/// Status flags as a four-bit bit string
pub fn bit_string_from_flags(flags: StatusFlags) -> BitString {
    flags.bits().iter().copied().collect()
}

/// One entry of a property value list (as carried by change-of-value
/// notifications)
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyValue {
    pub property: PropertyIdentifier,
    /// `None` for the whole property
    pub array_index: Option<u32>,
    pub value: ApplicationValue,
    /// Command priority, `None` when not commanded
    pub priority: Option<u8>,
}

impl PropertyValue {
    /// Whole-property value without a priority
    pub fn new(property: PropertyIdentifier, value: ApplicationValue) -> Self {
        Self {
            property,
            array_index: None,
            value,
            priority: None,
        }
    }
}
