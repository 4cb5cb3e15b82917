//! Binary Value Service
//!
//! Owns the object store and the injected notifier, and exposes the local
//! (administrative) setters alongside the protocol API.

use shared_codec::{bit_string_from_flags, ApplicationValue, PropertyValue};
use shared_types::{BinaryPv, Polarity, PropertyIdentifier, StatusFlags};
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::BinaryValueConfig;
use crate::domain::{
    property_lists, BinaryValueObject, ConfigError, ObjectError, PropertyLists, StoreError,
};
use crate::ports::{BinaryValueApi, PresentValueNotifier};
use crate::store::ObjectStore;

use super::read_property::encode_property;

/// Binary Value service implementation
///
/// Single-writer: mutating calls take `&mut self` and nothing is locked
/// internally.
pub struct BinaryValueService<N: PresentValueNotifier> {
    store: ObjectStore,
    notifier: Arc<N>,
    config: BinaryValueConfig,
}

impl<N: PresentValueNotifier> BinaryValueService<N> {
    /// Create a service with default configuration.
    pub fn new(notifier: Arc<N>) -> Self {
        let config = BinaryValueConfig::default();
        Self {
            store: ObjectStore::new(&config),
            notifier,
            config,
        }
    }

    /// Create a service with custom configuration.
    pub fn with_config(config: BinaryValueConfig, notifier: Arc<N>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            store: ObjectStore::new(&config),
            notifier,
            config,
        })
    }

    pub fn config(&self) -> &BinaryValueConfig {
        &self.config
    }

    pub fn notifier(&self) -> &Arc<N> {
        &self.notifier
    }

    /// Read-only view of one object.
    pub fn object(&self, instance: u32) -> Option<&BinaryValueObject> {
        self.store.lookup(instance)
    }

    pub fn instances(&self) -> impl Iterator<Item = u32> + '_ {
        self.store.instances()
    }

    fn object_mut(&mut self, instance: u32) -> Result<&mut BinaryValueObject, ObjectError> {
        self.store
            .lookup_mut(instance)
            .ok_or(ObjectError::UnknownObject(instance))
    }

    fn object_ref(&self, instance: u32) -> Result<&BinaryValueObject, ObjectError> {
        self.store
            .lookup(instance)
            .ok_or(ObjectError::UnknownObject(instance))
    }

    // -------------------------------------------------------------------------
    // Present value
    // -------------------------------------------------------------------------

    /// Observed (polarity-corrected) present value.
    pub fn present_value(&self, instance: u32) -> Option<BinaryPv> {
        self.store.lookup(instance).map(BinaryValueObject::present_value)
    }

    /// Local write of the present value, bypassing the write gate.
    pub fn present_value_set(&mut self, instance: u32, value: BinaryPv) -> Result<(), ObjectError> {
        self.object_mut(instance)?.set_present_value(value);
        Ok(())
    }

    /// Protocol write of the present value.
    ///
    /// `value` is the raw enumerated value from the request. The notifier
    /// runs only when the object is in service.
    pub fn write_present_value(&mut self, instance: u32, value: u32) -> Result<(), ObjectError> {
        let object = self.object_mut(instance)?;
        let value = BinaryPv::try_from(value).map_err(|_| ObjectError::ValueOutOfRange)?;
        let change = object.write_present_value(value)?;

        if change.propagate {
            self.notifier
                .present_value_written(instance, change.old_value, change.new_value);
        } else {
            debug!(
                instance,
                value = ?change.new_value,
                "[bo-05] Out of service, present value write not propagated"
            );
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Out of service / reliability / polarity
    // -------------------------------------------------------------------------

    pub fn out_of_service(&self, instance: u32) -> Option<bool> {
        self.store.lookup(instance).map(BinaryValueObject::out_of_service)
    }

    pub fn out_of_service_set(&mut self, instance: u32, value: bool) -> Result<(), ObjectError> {
        if self.object_mut(instance)?.set_out_of_service(value) {
            debug!(instance, out_of_service = value, "[bo-05] Out of service changed");
        }
        Ok(())
    }

    pub fn reliability(&self, instance: u32) -> Option<u8> {
        self.store.lookup(instance).map(BinaryValueObject::reliability)
    }

    /// Store a reliability code; codes above 255 are rejected.
    pub fn reliability_set(&mut self, instance: u32, code: u32) -> Result<(), ObjectError> {
        let object = self.object_mut(instance)?;
        let code = u8::try_from(code).map_err(|_| ObjectError::ValueOutOfRange)?;
        if object.set_reliability(code) {
            debug!(instance, reliability = code, fault = object.fault(), "[bo-05] Fault status changed");
        }
        Ok(())
    }

    pub fn polarity(&self, instance: u32) -> Option<Polarity> {
        self.store.lookup(instance).map(BinaryValueObject::polarity)
    }

    /// Change polarity. The observed present value flips with it, but no
    /// change of value is flagged.
    pub fn polarity_set(&mut self, instance: u32, polarity: Polarity) -> Result<(), ObjectError> {
        self.object_mut(instance)?.set_polarity(polarity);
        Ok(())
    }

    pub fn status_flags(&self, instance: u32) -> Option<StatusFlags> {
        self.store.lookup(instance).map(BinaryValueObject::status_flags)
    }

    // -------------------------------------------------------------------------
    // Change of value
    // -------------------------------------------------------------------------

    pub fn change_of_value(&self, instance: u32) -> Option<bool> {
        self.store.lookup(instance).map(BinaryValueObject::change_of_value)
    }

    pub fn change_of_value_clear(&mut self, instance: u32) -> Result<(), ObjectError> {
        self.object_mut(instance)?.clear_change_of_value();
        Ok(())
    }

    /// Values carried by a change-of-value notification: Present_Value and
    /// Status_Flags.
    pub fn encode_value_list(&self, instance: u32) -> Result<Vec<PropertyValue>, ObjectError> {
        let object = self.object_ref(instance)?;
        Ok(vec![
            PropertyValue::new(
                PropertyIdentifier::PresentValue,
                ApplicationValue::Enumerated(object.present_value().to_u32()),
            ),
            PropertyValue::new(
                PropertyIdentifier::StatusFlags,
                ApplicationValue::BitString(bit_string_from_flags(object.status_flags())),
            ),
        ])
    }

    // -------------------------------------------------------------------------
    // Write gate
    // -------------------------------------------------------------------------

    pub fn write_enabled(&self, instance: u32) -> Option<bool> {
        self.store.lookup(instance).map(BinaryValueObject::write_enabled)
    }

    pub fn write_enable(&mut self, instance: u32) -> Result<(), ObjectError> {
        self.object_mut(instance)?.set_write_enabled(true);
        Ok(())
    }

    pub fn write_disable(&mut self, instance: u32) -> Result<(), ObjectError> {
        self.object_mut(instance)?.set_write_enabled(false);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Display strings
    // -------------------------------------------------------------------------

    /// Object_Name, defaulting to `"<name_prefix> <instance>"`.
    pub fn object_name(&self, instance: u32) -> Option<String> {
        self.store
            .lookup(instance)
            .map(|object| object.object_name(&self.config.name_prefix))
    }

    pub fn name_set(&mut self, instance: u32, name: impl Into<String>) -> Result<(), ObjectError> {
        self.object_mut(instance)?.set_name(name);
        Ok(())
    }

    pub fn description_set(
        &mut self,
        instance: u32,
        description: impl Into<String>,
    ) -> Result<(), ObjectError> {
        self.object_mut(instance)?.set_description(description);
        Ok(())
    }

    pub fn active_text_set(&mut self, instance: u32, text: impl Into<String>) -> Result<(), ObjectError> {
        self.object_mut(instance)?.set_active_text(text);
        Ok(())
    }

    pub fn inactive_text_set(
        &mut self,
        instance: u32,
        text: impl Into<String>,
    ) -> Result<(), ObjectError> {
        self.object_mut(instance)?.set_inactive_text(text);
        Ok(())
    }
}

impl<N: PresentValueNotifier> BinaryValueApi for BinaryValueService<N> {
    fn read_property(
        &self,
        instance: u32,
        property: PropertyIdentifier,
        array_index: Option<u32>,
    ) -> Result<Vec<u8>, ObjectError> {
        let object = self.object_ref(instance)?;
        let apdu = encode_property(object, property, &self.config.name_prefix)?;

        // Only array properties accept an array index.
        if array_index.is_some() && !property.is_array() {
            return Err(ObjectError::PropertyIsNotAnArray);
        }
        Ok(apdu)
    }

    fn write_property(
        &mut self,
        instance: u32,
        property: PropertyIdentifier,
        array_index: Option<u32>,
        application_data: &[u8],
    ) -> Result<(), ObjectError> {
        self.apply_write(instance, property, array_index, application_data)
    }

    fn create(&mut self, instance: u32) -> Result<u32, StoreError> {
        let created = self.store.create(instance)?;
        info!(instance = created, "[bo-05] Binary value ready");
        Ok(created)
    }

    fn delete(&mut self, instance: u32) -> bool {
        let deleted = self.store.delete(instance);
        if deleted {
            info!(instance, "[bo-05] Binary value deleted");
        }
        deleted
    }

    fn cleanup(&mut self) {
        let count = self.store.count();
        self.store.clear();
        info!(count, "[bo-05] All binary values released");
    }

    fn count(&self) -> usize {
        self.store.count()
    }

    fn index_to_instance(&self, index: usize) -> Option<u32> {
        self.store.instance_at(index)
    }

    fn instance_to_index(&self, instance: u32) -> usize {
        self.store.index_of(instance)
    }

    fn valid_instance(&self, instance: u32) -> bool {
        self.store.contains(instance)
    }

    fn property_lists(&self) -> PropertyLists {
        property_lists()
    }
}
