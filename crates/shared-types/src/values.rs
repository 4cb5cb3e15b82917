//! # Property Value Enumerations
//!
//! Binary present value, polarity, event state, reliability codes and the
//! four-bit status flag set.

use serde::{Deserialize, Serialize};

use crate::errors::EnumeratedOutOfRange;

/// Two-state present value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BinaryPv {
    #[default]
    Inactive,
    Active,
}

/// Number of defined [`BinaryPv`] values; valid encodings are `< MAX_BINARY_PV`.
pub const MAX_BINARY_PV: u32 = 2;

impl BinaryPv {
    /// Enumerated wire value.
    pub const fn to_u32(self) -> u32 {
        match self {
            Self::Inactive => 0,
            Self::Active => 1,
        }
    }

    /// Logical complement.
    pub const fn inverted(self) -> Self {
        match self {
            Self::Inactive => Self::Active,
            Self::Active => Self::Inactive,
        }
    }

    /// `Active` for `true`.
    pub const fn from_bool(value: bool) -> Self {
        if value {
            Self::Active
        } else {
            Self::Inactive
        }
    }

    /// `true` for `Active`.
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl TryFrom<u32> for BinaryPv {
    type Error = EnumeratedOutOfRange;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Inactive),
            1 => Ok(Self::Active),
            _ => Err(EnumeratedOutOfRange {
                value,
                limit: MAX_BINARY_PV,
            }),
        }
    }
}

/// Relationship between the stored bit and the observed present value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Polarity {
    #[default]
    Normal,
    Reverse,
}

/// Number of defined [`Polarity`] values; valid encodings are `< MAX_POLARITY`.
pub const MAX_POLARITY: u32 = 2;

impl Polarity {
    /// Enumerated wire value.
    pub const fn to_u32(self) -> u32 {
        match self {
            Self::Normal => 0,
            Self::Reverse => 1,
        }
    }

    /// Map a logical value onto the stored representation (and back; the
    /// mapping is its own inverse).
    pub const fn apply(self, value: BinaryPv) -> BinaryPv {
        match self {
            Self::Normal => value,
            Self::Reverse => value.inverted(),
        }
    }
}

impl TryFrom<u32> for Polarity {
    type Error = EnumeratedOutOfRange;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Normal),
            1 => Ok(Self::Reverse),
            _ => Err(EnumeratedOutOfRange {
                value,
                limit: MAX_POLARITY,
            }),
        }
    }
}

/// Event state. Objects without intrinsic reporting always report `Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EventState {
    #[default]
    Normal,
    Fault,
    OffNormal,
    HighLimit,
    LowLimit,
    LifeSafetyAlarm,
}

impl EventState {
    /// Enumerated wire value.
    pub const fn to_u32(self) -> u32 {
        match self {
            Self::Normal => 0,
            Self::Fault => 1,
            Self::OffNormal => 2,
            Self::HighLimit => 3,
            Self::LowLimit => 4,
            Self::LifeSafetyAlarm => 5,
        }
    }
}

/// Reliability codes. Stored and reported verbatim as `u8`; only
/// [`NO_FAULT_DETECTED`](reliability::NO_FAULT_DETECTED) means healthy.
pub mod reliability {
    pub const NO_FAULT_DETECTED: u8 = 0;
    pub const NO_SENSOR: u8 = 1;
    pub const OVER_RANGE: u8 = 2;
    pub const UNDER_RANGE: u8 = 3;
    pub const OPEN_LOOP: u8 = 4;
    pub const SHORTED_LOOP: u8 = 5;
    pub const NO_OUTPUT: u8 = 6;
    pub const UNRELIABLE_OTHER: u8 = 7;
    pub const PROCESS_ERROR: u8 = 8;
    pub const MULTI_STATE_FAULT: u8 = 9;
    pub const CONFIGURATION_ERROR: u8 = 10;
    pub const COMMUNICATION_FAILURE: u8 = 12;
}

/// Status flag bit positions, in wire order.
pub mod status_flag {
    pub const IN_ALARM: usize = 0;
    pub const FAULT: usize = 1;
    pub const OVERRIDDEN: usize = 2;
    pub const OUT_OF_SERVICE: usize = 3;
}

/// The four-bit Status_Flags set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusFlags {
    pub in_alarm: bool,
    pub fault: bool,
    pub overridden: bool,
    pub out_of_service: bool,
}

impl StatusFlags {
    /// Flags in wire order (`IN_ALARM` first).
    pub const fn bits(&self) -> [bool; 4] {
        [
            self.in_alarm,
            self.fault,
            self.overridden,
            self.out_of_service,
        ]
    }

    /// Build from bits in wire order. Missing trailing bits read as clear.
    pub fn from_bits(bits: &[bool]) -> Self {
        let bit = |i: usize| bits.get(i).copied().unwrap_or(false);
        Self {
            in_alarm: bit(status_flag::IN_ALARM),
            fault: bit(status_flag::FAULT),
            overridden: bit(status_flag::OVERRIDDEN),
            out_of_service: bit(status_flag::OUT_OF_SERVICE),
        }
    }
}
