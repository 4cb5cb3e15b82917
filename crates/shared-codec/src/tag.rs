//! Tag numbers and tag header layout

use crate::error::CodecError;

/// Largest length/value/type that fits in the header octet itself.
pub(crate) const LVT_INLINE_MAX: u32 = 4;
/// LVT marker for an extended length.
pub(crate) const LVT_EXTENDED: u8 = 5;
/// Extended-length octet marking a following 16-bit length.
pub(crate) const EXTENDED_U16: u8 = 254;
/// Extended-length octet marking a following 32-bit length.
pub(crate) const EXTENDED_U32: u8 = 255;
/// Tag-number nibble marking an extended tag number.
pub(crate) const TAG_EXTENDED: u8 = 0x0F;
/// Class bit: set for context-specific tags.
pub(crate) const CLASS_CONTEXT: u8 = 0x08;

/// Application tag numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApplicationTag {
    Null,
    Boolean,
    UnsignedInt,
    SignedInt,
    Real,
    Double,
    OctetString,
    CharacterString,
    BitString,
    Enumerated,
    Date,
    Time,
    ObjectId,
}

impl ApplicationTag {
    /// Tag number in the header.
    pub const fn number(self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Boolean => 1,
            Self::UnsignedInt => 2,
            Self::SignedInt => 3,
            Self::Real => 4,
            Self::Double => 5,
            Self::OctetString => 6,
            Self::CharacterString => 7,
            Self::BitString => 8,
            Self::Enumerated => 9,
            Self::Date => 10,
            Self::Time => 11,
            Self::ObjectId => 12,
        }
    }

    /// Tag for a header tag number.
    pub fn from_number(number: u8) -> Result<Self, CodecError> {
        Ok(match number {
            0 => Self::Null,
            1 => Self::Boolean,
            2 => Self::UnsignedInt,
            3 => Self::SignedInt,
            4 => Self::Real,
            5 => Self::Double,
            6 => Self::OctetString,
            7 => Self::CharacterString,
            8 => Self::BitString,
            9 => Self::Enumerated,
            10 => Self::Date,
            11 => Self::Time,
            12 => Self::ObjectId,
            other => return Err(CodecError::UnknownTag(other)),
        })
    }
}

/// A decoded tag header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagHeader {
    /// Tag number (application tag number or context tag number)
    pub number: u8,
    /// Context-specific class
    pub context: bool,
    /// Length/value/type: content length, or the value itself for booleans
    pub lvt: u32,
}
