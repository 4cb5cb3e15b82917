//! Decoder
//!
//! Parses one application-tagged value from the front of a buffer.

use shared_types::ObjectIdentifier;

use crate::error::CodecError;
use crate::tag::{
    ApplicationTag, TagHeader, CLASS_CONTEXT, EXTENDED_U16, EXTENDED_U32, LVT_EXTENDED,
    TAG_EXTENDED,
};
use crate::value::{ApplicationValue, BitString, Date, Time};

/// Character set octet for ISO 8859-1.
pub const CHARACTER_ISO8859_1: u8 = 5;

fn take(buf: &[u8], offset: usize, len: usize) -> Result<&[u8], CodecError> {
    let end = offset.checked_add(len).ok_or(CodecError::Truncated {
        needed: usize::MAX,
        available: buf.len(),
    })?;
    buf.get(offset..end).ok_or(CodecError::Truncated {
        needed: end,
        available: buf.len(),
    })
}

/// Decode a tag header, returning it and the number of octets it occupies.
pub fn decode_tag_header(buf: &[u8]) -> Result<(TagHeader, usize), CodecError> {
    let first = take(buf, 0, 1)?[0];
    let mut len = 1;

    let mut number = first >> 4;
    if number == TAG_EXTENDED {
        number = take(buf, len, 1)?[0];
        len += 1;
    }
    let context = first & CLASS_CONTEXT != 0;
    let lvt_bits = first & 0x07;

    let lvt = if lvt_bits == LVT_EXTENDED {
        let marker = take(buf, len, 1)?[0];
        len += 1;
        match marker {
            EXTENDED_U16 => {
                let octets = take(buf, len, 2)?;
                len += 2;
                u32::from(u16::from_be_bytes([octets[0], octets[1]]))
            }
            EXTENDED_U32 => {
                let octets = take(buf, len, 4)?;
                len += 4;
                u32::from_be_bytes([octets[0], octets[1], octets[2], octets[3]])
            }
            short => u32::from(short),
        }
    } else {
        u32::from(lvt_bits)
    };

    Ok((TagHeader { number, context, lvt }, len))
}

fn decode_unsigned(octets: &[u8]) -> u32 {
    octets
        .iter()
        .fold(0u32, |acc, octet| (acc << 8) | u32::from(*octet))
}

fn decode_signed(octets: &[u8]) -> i32 {
    let fill = if octets.first().is_some_and(|b| b & 0x80 != 0) {
        0xFF
    } else {
        0x00
    };
    let mut bytes = [fill; 4];
    bytes[4 - octets.len()..].copy_from_slice(octets);
    i32::from_be_bytes(bytes)
}

fn decode_character_string(content: &[u8]) -> Result<String, CodecError> {
    let (charset, text) = content
        .split_first()
        .ok_or(CodecError::InvalidLength {
            tag: ApplicationTag::CharacterString,
            length: 0,
        })?;
    match *charset {
        0 => String::from_utf8(text.to_vec()).map_err(|_| CodecError::InvalidCharacterString),
        CHARACTER_ISO8859_1 => Ok(text.iter().map(|b| char::from(*b)).collect()),
        other => Err(CodecError::UnsupportedCharacterSet(other)),
    }
}

fn decode_bit_string(content: &[u8]) -> Result<BitString, CodecError> {
    let (unused, octets) = content.split_first().ok_or(CodecError::InvalidLength {
        tag: ApplicationTag::BitString,
        length: 0,
    })?;
    if *unused > 7 || (octets.is_empty() && *unused != 0) {
        return Err(CodecError::InvalidBitString(*unused));
    }
    let mut bits = BitString::from_vec(octets.to_vec());
    bits.truncate(octets.len() * 8 - usize::from(*unused));
    Ok(bits)
}

/// Decode one application-tagged value.
///
/// Returns the value and the total number of octets consumed (header plus
/// content). Trailing octets after the value are left untouched.
pub fn decode_application_data(buf: &[u8]) -> Result<(ApplicationValue, usize), CodecError> {
    let (header, header_len) = decode_tag_header(buf)?;
    if header.context {
        return Err(CodecError::ContextTag(header.number));
    }
    let tag = ApplicationTag::from_number(header.number)?;

    let invalid = || CodecError::InvalidLength {
        tag,
        length: header.lvt,
    };

    // Booleans carry the value in the header and have no content octets.
    let content_len = if tag == ApplicationTag::Boolean {
        0
    } else {
        usize::try_from(header.lvt).map_err(|_| invalid())?
    };
    let content = take(buf, header_len, content_len)?;

    let value = match tag {
        ApplicationTag::Null => {
            if content_len != 0 {
                return Err(invalid());
            }
            ApplicationValue::Null
        }
        ApplicationTag::Boolean => match header.lvt {
            0 => ApplicationValue::Boolean(false),
            1 => ApplicationValue::Boolean(true),
            _ => return Err(invalid()),
        },
        ApplicationTag::UnsignedInt | ApplicationTag::Enumerated => {
            if !(1..=4).contains(&content_len) {
                return Err(invalid());
            }
            let value = decode_unsigned(content);
            if tag == ApplicationTag::Enumerated {
                ApplicationValue::Enumerated(value)
            } else {
                ApplicationValue::Unsigned(value)
            }
        }
        ApplicationTag::SignedInt => {
            if !(1..=4).contains(&content_len) {
                return Err(invalid());
            }
            ApplicationValue::Signed(decode_signed(content))
        }
        ApplicationTag::Real => {
            let octets: [u8; 4] = content.try_into().map_err(|_| invalid())?;
            ApplicationValue::Real(f32::from_be_bytes(octets))
        }
        ApplicationTag::Double => {
            let octets: [u8; 8] = content.try_into().map_err(|_| invalid())?;
            ApplicationValue::Double(f64::from_be_bytes(octets))
        }
        ApplicationTag::OctetString => ApplicationValue::OctetString(content.to_vec()),
        ApplicationTag::CharacterString => {
            ApplicationValue::CharacterString(decode_character_string(content)?)
        }
        ApplicationTag::BitString => ApplicationValue::BitString(decode_bit_string(content)?),
        ApplicationTag::Date => {
            let [year_since_1900, month, day, weekday]: [u8; 4] =
                content.try_into().map_err(|_| invalid())?;
            ApplicationValue::Date(Date {
                year_since_1900,
                month,
                day,
                weekday,
            })
        }
        ApplicationTag::Time => {
            let [hour, minute, second, hundredths]: [u8; 4] =
                content.try_into().map_err(|_| invalid())?;
            ApplicationValue::Time(Time {
                hour,
                minute,
                second,
                hundredths,
            })
        }
        ApplicationTag::ObjectId => {
            let octets: [u8; 4] = content.try_into().map_err(|_| invalid())?;
            ApplicationValue::ObjectId(ObjectIdentifier::from_packed(u32::from_be_bytes(octets)))
        }
    };

    Ok((value, header_len + content_len))
}

/// Check that a decoded value carries the expected tag.
pub fn expect_tag(value: &ApplicationValue, expected: ApplicationTag) -> Result<(), CodecError> {
    let found = value.tag();
    if found == expected {
        Ok(())
    } else {
        Err(CodecError::UnexpectedTag { expected, found })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::*;
    use bitvec::prelude::*;
    use proptest::prelude::*;
    use shared_types::ObjectType;

    #[test]
    fn test_decode_enumerated() {
        let (value, len) = decode_application_data(&[0x91, 0x01]).unwrap();
        assert_eq!(value, ApplicationValue::Enumerated(1));
        assert_eq!(len, 2);
    }

    #[test]
    fn test_decode_boolean_consumes_header_only() {
        let (value, len) = decode_application_data(&[0x11, 0xFF]).unwrap();
        assert_eq!(value, ApplicationValue::Boolean(true));
        assert_eq!(len, 1);
    }

    #[test]
    fn test_decode_boolean_extended_lvt() {
        // lvt written through the extended-length octet still carries the value
        let (value, len) = decode_application_data(&[0x15, 0x00, 0x91]).unwrap();
        assert_eq!(value, ApplicationValue::Boolean(false));
        assert_eq!(len, 2);

        assert_eq!(
            decode_application_data(&[0x15, 0x06]),
            Err(CodecError::InvalidLength {
                tag: ApplicationTag::Boolean,
                length: 6
            })
        );
    }

    #[test]
    fn test_decode_boolean_bad_lvt() {
        assert!(matches!(
            decode_application_data(&[0x12]),
            Err(CodecError::InvalidLength {
                tag: ApplicationTag::Boolean,
                length: 2
            })
        ));
    }

    #[test]
    fn test_decode_empty_buffer() {
        assert!(matches!(
            decode_application_data(&[]),
            Err(CodecError::Truncated { .. })
        ));
    }

    #[test]
    fn test_decode_truncated_content() {
        assert_eq!(
            decode_application_data(&[0x92, 0x01]),
            Err(CodecError::Truncated {
                needed: 3,
                available: 2
            })
        );
    }

    #[test]
    fn test_decode_oversized_enumerated() {
        let buf = [0x95, 0x05, 1, 2, 3, 4, 5];
        assert!(matches!(
            decode_application_data(&buf),
            Err(CodecError::InvalidLength {
                tag: ApplicationTag::Enumerated,
                length: 5
            })
        ));
    }

    #[test]
    fn test_decode_rejects_context_tag() {
        assert_eq!(
            decode_application_data(&[0x09, 0x01]),
            Err(CodecError::ContextTag(0))
        );
    }

    #[test]
    fn test_decode_rejects_unknown_tag() {
        assert_eq!(
            decode_application_data(&[0xD1, 0x00]),
            Err(CodecError::UnknownTag(13))
        );
    }

    #[test]
    fn test_decode_status_flags() {
        let (value, _) = decode_application_data(&[0x82, 0x04, 0x50]).unwrap();
        assert_eq!(
            value,
            ApplicationValue::BitString(bitvec![u8, Msb0; 0, 1, 0, 1])
        );
    }

    #[test]
    fn test_decode_bitstring_bad_unused_count() {
        assert_eq!(
            decode_application_data(&[0x82, 0x08, 0x00]),
            Err(CodecError::InvalidBitString(8))
        );
    }

    #[test]
    fn test_decode_latin1_string() {
        let (value, _) = decode_application_data(&[0x73, 0x05, 0x41, 0xE9]).unwrap();
        assert_eq!(value, ApplicationValue::CharacterString("A\u{e9}".to_string()));
    }

    #[test]
    fn test_decode_unsupported_charset() {
        assert_eq!(
            decode_application_data(&[0x72, 0x03, 0x41]),
            Err(CodecError::UnsupportedCharacterSet(3))
        );
    }

    #[test]
    fn test_decode_object_identifier() {
        let (value, len) = decode_application_data(&[0xC4, 0x01, 0x40, 0x00, 0x2A]).unwrap();
        assert_eq!(
            value,
            ApplicationValue::ObjectId(ObjectIdentifier::new(ObjectType::BinaryValue, 42))
        );
        assert_eq!(len, 5);
    }

    #[test]
    fn test_decode_negative_signed() {
        let (value, _) = decode_application_data(&[0x32, 0xFF, 0x7F]).unwrap();
        assert_eq!(value, ApplicationValue::Signed(-129));
    }

    #[test]
    fn test_expect_tag() {
        let value = ApplicationValue::Boolean(true);
        assert!(expect_tag(&value, ApplicationTag::Boolean).is_ok());
        assert_eq!(
            expect_tag(&value, ApplicationTag::Enumerated),
            Err(CodecError::UnexpectedTag {
                expected: ApplicationTag::Enumerated,
                found: ApplicationTag::Boolean
            })
        );
    }

    #[test]
    fn test_extended_u32_length_header() {
        let buf = [0x65, 255, 0x00, 0x01, 0x00, 0x00];
        let (header, len) = decode_tag_header(&buf).unwrap();
        assert_eq!(header.number, 6);
        assert_eq!(header.lvt, 0x0001_0000);
        assert_eq!(len, 6);
    }

    proptest! {
        #[test]
        fn prop_character_strings_survive(text in "\\PC{0,300}") {
            let mut apdu = Vec::new();
            let written = encode_application_character_string(&mut apdu, &text).unwrap();
            let (value, consumed) = decode_application_data(&apdu).unwrap();
            prop_assert_eq!(consumed, written);
            prop_assert_eq!(value, ApplicationValue::CharacterString(text));
        }

        #[test]
        fn prop_decoder_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..16)) {
            let _ = decode_application_data(&bytes);
        }
    }
}
