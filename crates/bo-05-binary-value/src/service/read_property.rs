//! Property encoding for ReadProperty.

use shared_codec::{
    bit_string_from_flags, encode_application_bitstring, encode_application_boolean,
    encode_application_character_string, encode_application_enumerated,
    encode_application_object_id, CodecError,
};
use shared_types::{EventState, ObjectIdentifier, ObjectType, PropertyIdentifier};

use crate::domain::{BinaryValueObject, ObjectError};

/// Text longer than the 32-bit length field cannot be represented.
fn content_too_long(_: CodecError) -> ObjectError {
    ObjectError::ValueOutOfRange
}

/// Encode one property of `object` as application-tagged octets.
///
/// `name_prefix` feeds the default Object_Name of unnamed objects.
pub(crate) fn encode_property(
    object: &BinaryValueObject,
    property: PropertyIdentifier,
    name_prefix: &str,
) -> Result<Vec<u8>, ObjectError> {
    let mut apdu = Vec::new();

    match property {
        PropertyIdentifier::ObjectIdentifier => {
            let id = ObjectIdentifier::new(ObjectType::BinaryValue, object.instance());
            encode_application_object_id(&mut apdu, id);
        }
        PropertyIdentifier::ObjectName => {
            encode_application_character_string(&mut apdu, &object.object_name(name_prefix))
                .map_err(content_too_long)?;
        }
        PropertyIdentifier::ObjectType => {
            encode_application_enumerated(
                &mut apdu,
                u32::from(ObjectType::BinaryValue.to_u16()),
            );
        }
        PropertyIdentifier::PresentValue => {
            encode_application_enumerated(&mut apdu, object.present_value().to_u32());
        }
        PropertyIdentifier::StatusFlags => {
            encode_application_bitstring(&mut apdu, &bit_string_from_flags(object.status_flags()))
                .map_err(content_too_long)?;
        }
        PropertyIdentifier::EventState => {
            encode_application_enumerated(&mut apdu, EventState::Normal.to_u32());
        }
        PropertyIdentifier::OutOfService => {
            encode_application_boolean(&mut apdu, object.out_of_service());
        }
        PropertyIdentifier::Polarity => {
            encode_application_enumerated(&mut apdu, object.polarity().to_u32());
        }
        PropertyIdentifier::Reliability => {
            encode_application_enumerated(&mut apdu, u32::from(object.reliability()));
        }
        PropertyIdentifier::Description => {
            encode_application_character_string(&mut apdu, object.description())
                .map_err(content_too_long)?;
        }
        PropertyIdentifier::ActiveText => {
            encode_application_character_string(&mut apdu, object.active_text())
                .map_err(content_too_long)?;
        }
        PropertyIdentifier::InactiveText => {
            encode_application_character_string(&mut apdu, object.inactive_text())
                .map_err(content_too_long)?;
        }
        PropertyIdentifier::PriorityArray
        | PropertyIdentifier::RelinquishDefault
        | PropertyIdentifier::Units
        | PropertyIdentifier::Other(_) => {
            return Err(ObjectError::UnknownProperty(property));
        }
    }

    Ok(apdu)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{reliability, BinaryPv, Polarity};

    fn read(object: &BinaryValueObject, property: PropertyIdentifier) -> Vec<u8> {
        encode_property(object, property, "BINARY VALUE").unwrap()
    }

    #[test]
    fn test_object_identifier_and_type() {
        let object = BinaryValueObject::new(42);
        assert_eq!(
            read(&object, PropertyIdentifier::ObjectIdentifier),
            vec![0xC4, 0x01, 0x40, 0x00, 0x2A]
        );
        assert_eq!(read(&object, PropertyIdentifier::ObjectType), vec![0x91, 0x05]);
    }

    #[test]
    fn test_present_value_through_polarity() {
        let mut object = BinaryValueObject::new(1);
        assert_eq!(read(&object, PropertyIdentifier::PresentValue), vec![0x91, 0x00]);
        object.set_polarity(Polarity::Reverse);
        assert_eq!(read(&object, PropertyIdentifier::PresentValue), vec![0x91, 0x01]);
        object.set_present_value(BinaryPv::Inactive);
        assert_eq!(read(&object, PropertyIdentifier::PresentValue), vec![0x91, 0x00]);
        assert_eq!(read(&object, PropertyIdentifier::Polarity), vec![0x91, 0x01]);
    }

    #[test]
    fn test_status_flags_bits() {
        let mut object = BinaryValueObject::new(1);
        assert_eq!(read(&object, PropertyIdentifier::StatusFlags), vec![0x82, 0x04, 0x00]);
        object.set_reliability(reliability::OVER_RANGE);
        object.set_out_of_service(true);
        assert_eq!(read(&object, PropertyIdentifier::StatusFlags), vec![0x82, 0x04, 0x50]);
        assert_eq!(read(&object, PropertyIdentifier::Reliability), vec![0x91, 0x02]);
        assert_eq!(read(&object, PropertyIdentifier::OutOfService), vec![0x11]);
    }

    #[test]
    fn test_strings() {
        let object = BinaryValueObject::new(7);
        let mut expected = vec![0x75, 0x0F, 0x00];
        expected.extend_from_slice(b"BINARY VALUE 7");
        assert_eq!(read(&object, PropertyIdentifier::ObjectName), expected);
        assert_eq!(read(&object, PropertyIdentifier::Description), vec![0x71, 0x00]);

        let mut active = vec![0x75, 0x07, 0x00];
        active.extend_from_slice(b"Active");
        assert_eq!(read(&object, PropertyIdentifier::ActiveText), active);
    }

    #[test]
    fn test_codec_failure_maps_to_value_out_of_range() {
        let error = CodecError::ContentTooLong {
            tag: shared_codec::ApplicationTag::CharacterString,
            length: usize::MAX,
        };
        assert_eq!(content_too_long(error), ObjectError::ValueOutOfRange);
    }

    #[test]
    fn test_event_state_is_normal() {
        let object = BinaryValueObject::new(1);
        assert_eq!(read(&object, PropertyIdentifier::EventState), vec![0x91, 0x00]);
    }

    #[test]
    fn test_unknown_property() {
        let object = BinaryValueObject::new(1);
        for property in [
            PropertyIdentifier::PriorityArray,
            PropertyIdentifier::Units,
            PropertyIdentifier::Other(9999),
        ] {
            assert_eq!(
                encode_property(&object, property, "BINARY VALUE"),
                Err(ObjectError::UnknownProperty(property))
            );
        }
    }
}
