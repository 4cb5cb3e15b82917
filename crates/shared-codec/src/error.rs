//! Error types for the wire codec

use thiserror::Error;

use crate::tag::ApplicationTag;

/// Errors raised while encoding or decoding tagged application data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("Buffer truncated: need {needed} octets, have {available}")]
    Truncated { needed: usize, available: usize },

    #[error("Invalid length {length} for {tag:?}")]
    InvalidLength { tag: ApplicationTag, length: u32 },

    #[error("Unknown application tag: {0}")]
    UnknownTag(u8),

    #[error("Context tag {0} where application data was expected")]
    ContextTag(u8),

    #[error("Unsupported character set: {0}")]
    UnsupportedCharacterSet(u8),

    #[error("Character string is not valid UTF-8")]
    InvalidCharacterString,

    #[error("Bit string declares {0} unused bits")]
    InvalidBitString(u8),

    #[error("Content of {length} octets too long for {tag:?}")]
    ContentTooLong { tag: ApplicationTag, length: usize },

    #[error("Unexpected tag: expected {expected:?}, found {found:?}")]
    UnexpectedTag {
        expected: ApplicationTag,
        found: ApplicationTag,
    },
}
