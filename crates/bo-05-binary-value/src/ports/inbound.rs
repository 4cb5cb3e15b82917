//! # Inbound Ports
//!
//! API trait the service layer drives the Binary Value object through.

use shared_types::PropertyIdentifier;

use crate::domain::{ObjectError, PropertyLists, StoreError};

/// Binary Value API - inbound port.
///
/// Property access plus object lifecycle. Array indices are `None` for the
/// whole property.
pub trait BinaryValueApi {
    /// Encode the value of one property as application-tagged octets.
    fn read_property(
        &self,
        instance: u32,
        property: PropertyIdentifier,
        array_index: Option<u32>,
    ) -> Result<Vec<u8>, ObjectError>;

    /// Decode `application_data` and apply it to one property.
    fn write_property(
        &mut self,
        instance: u32,
        property: PropertyIdentifier,
        array_index: Option<u32>,
        application_data: &[u8],
    ) -> Result<(), ObjectError>;

    /// Create an object; `BACNET_MAX_INSTANCE` picks a free instance.
    fn create(&mut self, instance: u32) -> Result<u32, StoreError>;

    /// Delete an object. Returns `false` if it did not exist.
    fn delete(&mut self, instance: u32) -> bool;

    /// Delete every object.
    fn cleanup(&mut self);

    /// Number of objects.
    fn count(&self) -> usize;

    /// Instance at `index` in instance order.
    fn index_to_instance(&self, index: usize) -> Option<u32>;

    /// Index of `instance`, or [`count`](Self::count) if absent.
    fn instance_to_index(&self, instance: u32) -> usize;

    /// Whether an object with this instance exists.
    fn valid_instance(&self, instance: u32) -> bool;

    /// Required / optional / proprietary property lists.
    fn property_lists(&self) -> PropertyLists;
}
