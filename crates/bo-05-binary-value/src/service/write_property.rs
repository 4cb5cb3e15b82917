//! WriteProperty dispatch.
//!
//! Order of checks: decode, array index, object existence, then the
//! per-property branch.

use shared_codec::{decode_application_data, expect_tag, ApplicationTag, ApplicationValue};
use shared_types::{Polarity, PropertyIdentifier};
use tracing::debug;

use crate::domain::{is_member, ObjectError};
use crate::ports::{BinaryValueApi, PresentValueNotifier};

use super::BinaryValueService;

impl<N: PresentValueNotifier> BinaryValueService<N> {
    pub(super) fn apply_write(
        &mut self,
        instance: u32,
        property: PropertyIdentifier,
        array_index: Option<u32>,
        application_data: &[u8],
    ) -> Result<(), ObjectError> {
        let (value, _) = decode_application_data(application_data).map_err(|e| {
            debug!(instance, %property, error = %e, "[bo-05] Undecodable write value");
            ObjectError::ValueOutOfRange
        })?;

        if array_index.is_some() && !property.is_array() {
            return Err(ObjectError::PropertyIsNotAnArray);
        }
        if !self.valid_instance(instance) {
            return Err(ObjectError::UnknownObject(instance));
        }

        match property {
            PropertyIdentifier::PresentValue => {
                let value = enumerated(&value)?;
                self.write_present_value(instance, value)
            }
            PropertyIdentifier::OutOfService => {
                expect_tag(&value, ApplicationTag::Boolean)
                    .map_err(|_| ObjectError::ValueOutOfRange)?;
                match value {
                    ApplicationValue::Boolean(flag) => self.out_of_service_set(instance, flag),
                    _ => Err(ObjectError::ValueOutOfRange),
                }
            }
            PropertyIdentifier::Polarity => {
                let polarity =
                    Polarity::try_from(enumerated(&value)?).map_err(|_| ObjectError::ValueOutOfRange)?;
                self.polarity_set(instance, polarity)
            }
            other if is_member(other) => Err(ObjectError::WriteAccessDenied(other)),
            other => Err(ObjectError::UnknownProperty(other)),
        }
    }
}

fn enumerated(value: &ApplicationValue) -> Result<u32, ObjectError> {
    match value {
        ApplicationValue::Enumerated(raw) => Ok(*raw),
        _ => Err(ObjectError::ValueOutOfRange),
    }
}
