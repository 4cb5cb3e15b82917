//! Encoders
//!
//! Each `encode_application_*` function appends one tagged value to `apdu`
//! and returns the number of octets written. Encoders of variable-length
//! content fail with [`CodecError::ContentTooLong`] when the length does not
//! fit the 32-bit length field.

use shared_types::ObjectIdentifier;

use crate::error::CodecError;
use crate::tag::{
    ApplicationTag, CLASS_CONTEXT, EXTENDED_U16, EXTENDED_U32, LVT_EXTENDED, LVT_INLINE_MAX,
    TAG_EXTENDED,
};
use crate::value::{ApplicationValue, BitString, Date, Time};

/// Character set octet for UTF-8 (formerly ANSI X3.4).
pub const CHARACTER_UTF8: u8 = 0;

/// Append a tag header.
pub fn encode_tag(apdu: &mut Vec<u8>, number: u8, context: bool, lvt: u32) -> usize {
    let start = apdu.len();
    let class = if context { CLASS_CONTEXT } else { 0 };
    let tag_nibble = if number <= 14 { number } else { TAG_EXTENDED };
    let inline = u8::try_from(lvt)
        .ok()
        .filter(|short| u32::from(*short) <= LVT_INLINE_MAX);

    apdu.push((tag_nibble << 4) | class | inline.unwrap_or(LVT_EXTENDED));
    if tag_nibble == TAG_EXTENDED {
        apdu.push(number);
    }
    if inline.is_none() {
        match u8::try_from(lvt) {
            Ok(short) if short < EXTENDED_U16 => apdu.push(short),
            _ => match u16::try_from(lvt) {
                Ok(medium) => {
                    apdu.push(EXTENDED_U16);
                    apdu.extend_from_slice(&medium.to_be_bytes());
                }
                Err(_) => {
                    apdu.push(EXTENDED_U32);
                    apdu.extend_from_slice(&lvt.to_be_bytes());
                }
            },
        }
    }
    apdu.len() - start
}

fn encode_fixed_header(apdu: &mut Vec<u8>, tag: ApplicationTag, len: u8) -> usize {
    encode_tag(apdu, tag.number(), false, u32::from(len))
}

/// Header for content whose length is only known at run time.
fn encode_content_header(
    apdu: &mut Vec<u8>,
    tag: ApplicationTag,
    len: usize,
) -> Result<usize, CodecError> {
    let lvt = u32::try_from(len).map_err(|_| CodecError::ContentTooLong { tag, length: len })?;
    Ok(encode_tag(apdu, tag.number(), false, lvt))
}

/// Octets needed for `value` without leading zero octets (at least one).
fn unsigned_width(value: u32) -> u8 {
    match value {
        0..=0xFF => 1,
        0x100..=0xFFFF => 2,
        0x1_0000..=0xFF_FFFF => 3,
        _ => 4,
    }
}

/// Octets needed for the shortest two's complement form of `value`.
fn signed_width(value: i32) -> u8 {
    match value {
        -128..=127 => 1,
        -32_768..=32_767 => 2,
        -8_388_608..=8_388_607 => 3,
        _ => 4,
    }
}

/// Append the low `width` octets of a big-endian word.
fn encode_word(apdu: &mut Vec<u8>, tag: ApplicationTag, word: [u8; 4], width: u8) -> usize {
    let len = encode_fixed_header(apdu, tag, width);
    let width = usize::from(width);
    apdu.extend_from_slice(&word[4 - width..]);
    len + width
}

pub fn encode_application_null(apdu: &mut Vec<u8>) -> usize {
    encode_fixed_header(apdu, ApplicationTag::Null, 0)
}

/// Booleans carry their value in the LVT field and have no content octets.
pub fn encode_application_boolean(apdu: &mut Vec<u8>, value: bool) -> usize {
    encode_tag(apdu, ApplicationTag::Boolean.number(), false, u32::from(value))
}

pub fn encode_application_unsigned(apdu: &mut Vec<u8>, value: u32) -> usize {
    encode_word(
        apdu,
        ApplicationTag::UnsignedInt,
        value.to_be_bytes(),
        unsigned_width(value),
    )
}

pub fn encode_application_signed(apdu: &mut Vec<u8>, value: i32) -> usize {
    encode_word(
        apdu,
        ApplicationTag::SignedInt,
        value.to_be_bytes(),
        signed_width(value),
    )
}

pub fn encode_application_real(apdu: &mut Vec<u8>, value: f32) -> usize {
    let len = encode_fixed_header(apdu, ApplicationTag::Real, 4);
    apdu.extend_from_slice(&value.to_be_bytes());
    len + 4
}

pub fn encode_application_double(apdu: &mut Vec<u8>, value: f64) -> usize {
    let len = encode_fixed_header(apdu, ApplicationTag::Double, 8);
    apdu.extend_from_slice(&value.to_be_bytes());
    len + 8
}

pub fn encode_application_octet_string(
    apdu: &mut Vec<u8>,
    value: &[u8],
) -> Result<usize, CodecError> {
    let len = encode_content_header(apdu, ApplicationTag::OctetString, value.len())?;
    apdu.extend_from_slice(value);
    Ok(len + value.len())
}

/// Character strings are always encoded as UTF-8.
pub fn encode_application_character_string(
    apdu: &mut Vec<u8>,
    value: &str,
) -> Result<usize, CodecError> {
    let content = 1 + value.len();
    let len = encode_content_header(apdu, ApplicationTag::CharacterString, content)?;
    apdu.push(CHARACTER_UTF8);
    apdu.extend_from_slice(value.as_bytes());
    Ok(len + content)
}

/// Unused bits in the last octet, indexed by bit count modulo 8.
const UNUSED_BITS: [u8; 8] = [0, 7, 6, 5, 4, 3, 2, 1];

/// First content octet holds the number of unused bits in the last octet.
pub fn encode_application_bitstring(
    apdu: &mut Vec<u8>,
    value: &BitString,
) -> Result<usize, CodecError> {
    let used_octets = value.len().div_ceil(8);
    let unused_bits = UNUSED_BITS[value.len() % 8];
    let mut octets = vec![0u8; used_octets];
    for (i, bit) in value.iter().by_vals().enumerate() {
        if bit {
            octets[i / 8] |= 0x80 >> (i % 8);
        }
    }
    let content = 1 + used_octets;
    let len = encode_content_header(apdu, ApplicationTag::BitString, content)?;
    apdu.push(unused_bits);
    apdu.extend_from_slice(&octets);
    Ok(len + content)
}

pub fn encode_application_enumerated(apdu: &mut Vec<u8>, value: u32) -> usize {
    encode_word(
        apdu,
        ApplicationTag::Enumerated,
        value.to_be_bytes(),
        unsigned_width(value),
    )
}

pub fn encode_application_date(apdu: &mut Vec<u8>, value: &Date) -> usize {
    let len = encode_fixed_header(apdu, ApplicationTag::Date, 4);
    apdu.extend_from_slice(&[
        value.year_since_1900,
        value.month,
        value.day,
        value.weekday,
    ]);
    len + 4
}

pub fn encode_application_time(apdu: &mut Vec<u8>, value: &Time) -> usize {
    let len = encode_fixed_header(apdu, ApplicationTag::Time, 4);
    apdu.extend_from_slice(&[value.hour, value.minute, value.second, value.hundredths]);
    len + 4
}

pub fn encode_application_object_id(apdu: &mut Vec<u8>, value: ObjectIdentifier) -> usize {
    let len = encode_fixed_header(apdu, ApplicationTag::ObjectId, 4);
    apdu.extend_from_slice(&value.to_packed().to_be_bytes());
    len + 4
}

/// Encode any application value with its own tag.
pub fn encode_application_data(
    apdu: &mut Vec<u8>,
    value: &ApplicationValue,
) -> Result<usize, CodecError> {
    let len = match value {
        ApplicationValue::Null => encode_application_null(apdu),
        ApplicationValue::Boolean(v) => encode_application_boolean(apdu, *v),
        ApplicationValue::Unsigned(v) => encode_application_unsigned(apdu, *v),
        ApplicationValue::Signed(v) => encode_application_signed(apdu, *v),
        ApplicationValue::Real(v) => encode_application_real(apdu, *v),
        ApplicationValue::Double(v) => encode_application_double(apdu, *v),
        ApplicationValue::OctetString(v) => encode_application_octet_string(apdu, v)?,
        ApplicationValue::CharacterString(v) => encode_application_character_string(apdu, v)?,
        ApplicationValue::BitString(v) => encode_application_bitstring(apdu, v)?,
        ApplicationValue::Enumerated(v) => encode_application_enumerated(apdu, *v),
        ApplicationValue::Date(v) => encode_application_date(apdu, v),
        ApplicationValue::Time(v) => encode_application_time(apdu, v),
        ApplicationValue::ObjectId(v) => encode_application_object_id(apdu, *v),
    };
    Ok(len)
}
