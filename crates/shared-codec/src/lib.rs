//! # Shared Codec
//!
//! Application-tagged encoding of primitive property values.
//!
//! Every encoded value is a tag header (tag number, class bit and a
//! length/value/type field) followed by its content octets:
//!
//! ```text
//!  7   4   3   2   0
//! +-------+---+-----+
//! |  tag  | c | lvt |   c = 0 application, 1 context
//! +-------+---+-----+
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use shared_codec::{decode_application_data, encode_application_enumerated};
//!
//! let mut apdu = Vec::new();
//! encode_application_enumerated(&mut apdu, 1);
//! let (value, len) = decode_application_data(&apdu)?;
//! assert_eq!(len, apdu.len());
//! ```

pub mod decode;
pub mod encode;
pub mod error;
pub mod tag;
pub mod value;

pub use decode::{decode_application_data, decode_tag_header, expect_tag};
pub use encode::*;
pub use error::CodecError;
pub use tag::{ApplicationTag, TagHeader};
pub use value::{bit_string_from_flags, ApplicationValue, BitString, Date, PropertyValue, Time};
