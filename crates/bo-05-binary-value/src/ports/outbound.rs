//! # Outbound Ports
//!
//! Notification of protocol-driven present value writes.
//!
//! The notifier is injected into each service at construction; every service
//! instance therefore has its own delivery target.

use parking_lot::Mutex;
use shared_types::BinaryPv;

/// Receives accepted protocol writes of the present value.
///
/// Called synchronously from inside the write, after the new value has been
/// stored. Implementations must not call back into the service that invoked
/// them, and anything slow here delays the write response.
pub trait PresentValueNotifier: Send + Sync {
    /// `old_value` and `new_value` are observed (polarity-corrected) values.
    fn present_value_written(&self, instance: u32, old_value: BinaryPv, new_value: BinaryPv);
}

/// Discards every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpNotifier;

impl PresentValueNotifier for NoOpNotifier {
    fn present_value_written(&self, _instance: u32, _old_value: BinaryPv, _new_value: BinaryPv) {}
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// One recorded notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PresentValueWrite {
    pub instance: u32,
    pub old_value: BinaryPv,
    pub new_value: BinaryPv,
}

/// Records notifications for later inspection.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    writes: Mutex<Vec<PresentValueWrite>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications received so far, oldest first.
    pub fn writes(&self) -> Vec<PresentValueWrite> {
        self.writes.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.writes.lock().len()
    }

    pub fn clear(&self) {
        self.writes.lock().clear();
    }
}

impl PresentValueNotifier for RecordingNotifier {
    fn present_value_written(&self, instance: u32, old_value: BinaryPv, new_value: BinaryPv) {
        self.writes.lock().push(PresentValueWrite {
            instance,
            old_value,
            new_value,
        });
    }
}
