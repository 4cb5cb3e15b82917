//! # Domain Entities
//!
//! The per-instance Binary Value record and its state transitions.
//!
//! The stored bit (`raw_value`) is always kept in the *physical* sense; the
//! observed present value is derived through polarity, and the fault flag is
//! derived from reliability. Neither derived value is ever stored.

use serde::{Deserialize, Serialize};
use shared_types::{reliability, BinaryPv, Polarity, PropertyIdentifier, StatusFlags};

use super::errors::ObjectError;

/// Default Active_Text.
pub const DEFAULT_ACTIVE_TEXT: &str = "Active";

/// Default Inactive_Text.
pub const DEFAULT_INACTIVE_TEXT: &str = "Inactive";

/// Result of an accepted protocol write of the present value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentValueChange {
    /// Observed value before the write.
    pub old_value: BinaryPv,
    /// Observed value after the write.
    pub new_value: BinaryPv,
    /// `false` while out of service: the write must not reach the physical point.
    pub propagate: bool,
}

/// One Binary Value object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryValueObject {
    instance: u32,
    raw_value: bool,
    polarity: Polarity,
    out_of_service: bool,
    write_enabled: bool,
    reliability: u8,
    change_of_value: bool,
    name: Option<String>,
    description: Option<String>,
    active_text: String,
    inactive_text: String,
}

impl BinaryValueObject {
    /// Create an object in its initial state with the default state texts.
    pub fn new(instance: u32) -> Self {
        Self::with_texts(instance, DEFAULT_ACTIVE_TEXT, DEFAULT_INACTIVE_TEXT)
    }

    /// Create an object in its initial state with the given state texts.
    pub fn with_texts(instance: u32, active_text: &str, inactive_text: &str) -> Self {
        Self {
            instance,
            raw_value: false,
            polarity: Polarity::Normal,
            out_of_service: false,
            write_enabled: false,
            reliability: reliability::NO_FAULT_DETECTED,
            change_of_value: false,
            name: None,
            description: None,
            active_text: active_text.to_string(),
            inactive_text: inactive_text.to_string(),
        }
    }

    pub fn instance(&self) -> u32 {
        self.instance
    }

    /// Stored bit before polarity correction.
    pub fn raw_value(&self) -> BinaryPv {
        BinaryPv::from_bool(self.raw_value)
    }

    /// Observed present value: the stored bit seen through polarity.
    pub fn present_value(&self) -> BinaryPv {
        self.polarity.apply(self.raw_value())
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    pub fn out_of_service(&self) -> bool {
        self.out_of_service
    }

    pub fn write_enabled(&self) -> bool {
        self.write_enabled
    }

    pub fn reliability(&self) -> u8 {
        self.reliability
    }

    /// Any reliability other than "no fault detected" is a fault.
    pub fn fault(&self) -> bool {
        self.reliability != reliability::NO_FAULT_DETECTED
    }

    pub fn change_of_value(&self) -> bool {
        self.change_of_value
    }

    /// Status_Flags: in-alarm and overridden are never set for this object.
    pub fn status_flags(&self) -> StatusFlags {
        StatusFlags {
            in_alarm: false,
            fault: self.fault(),
            overridden: false,
            out_of_service: self.out_of_service,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Object_Name, falling back to `"<prefix> <instance>"`.
    pub fn object_name(&self, default_prefix: &str) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("{} {}", default_prefix, self.instance),
        }
    }

    /// Description, empty when unset.
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    pub fn active_text(&self) -> &str {
        &self.active_text
    }

    pub fn inactive_text(&self) -> &str {
        &self.inactive_text
    }

    /// Store `stored`, marking a change of value if the stored bit differs.
    fn store_raw(&mut self, stored: BinaryPv) {
        if self.raw_value() != stored {
            self.change_of_value = true;
        }
        self.raw_value = stored.is_active();
    }

    /// Administrative (local) write: not gated by `write_enabled`. The
    /// stored bit is chosen so that the observed value equals `value`.
    pub fn set_present_value(&mut self, value: BinaryPv) {
        let stored = self.polarity.apply(value);
        self.store_raw(stored);
    }

    /// Protocol write of the present value.
    ///
    /// Rejected while writes are disabled, leaving the object untouched.
    pub fn write_present_value(&mut self, value: BinaryPv) -> Result<PresentValueChange, ObjectError> {
        if !self.write_enabled {
            return Err(ObjectError::WriteAccessDenied(PropertyIdentifier::PresentValue));
        }
        let old_value = self.present_value();
        self.set_present_value(value);
        Ok(PresentValueChange {
            old_value,
            new_value: self.present_value(),
            propagate: !self.out_of_service,
        })
    }

    /// Returns `true` if the flag actually changed.
    pub fn set_out_of_service(&mut self, value: bool) -> bool {
        if self.out_of_service == value {
            return false;
        }
        self.out_of_service = value;
        self.change_of_value = true;
        true
    }

    /// Store a reliability code. Change of value is flagged only when the
    /// fault status flips. Returns `true` in that case.
    pub fn set_reliability(&mut self, code: u8) -> bool {
        let was_fault = self.fault();
        self.reliability = code;
        let flipped = was_fault != self.fault();
        if flipped {
            self.change_of_value = true;
        }
        flipped
    }

    /// Polarity changes leave the stored bit and the change-of-value flag alone.
    pub fn set_polarity(&mut self, polarity: Polarity) {
        self.polarity = polarity;
    }

    pub fn clear_change_of_value(&mut self) {
        self.change_of_value = false;
    }

    pub fn set_write_enabled(&mut self, enabled: bool) {
        self.write_enabled = enabled;
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    pub fn set_active_text(&mut self, text: impl Into<String>) {
        self.active_text = text.into();
    }

    pub fn set_inactive_text(&mut self, text: impl Into<String>) {
        self.inactive_text = text.into();
    }
}
