//! Notifier that reports present value writes as log events.

use shared_types::BinaryPv;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

use crate::ports::PresentValueNotifier;

/// Logs every delivered present value write at `info`.
///
/// Stands in for a physical output when the object is not wired to one.
#[derive(Debug, Default)]
pub struct TracingNotifier {
    delivered: AtomicU64,
}

impl TracingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications logged so far.
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }
}

impl PresentValueNotifier for TracingNotifier {
    fn present_value_written(&self, instance: u32, old_value: BinaryPv, new_value: BinaryPv) {
        self.delivered.fetch_add(1, Ordering::Relaxed);
        info!(
            instance,
            old = ?old_value,
            new = ?new_value,
            changed = old_value != new_value,
            "[bo-05] Present value written"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_deliveries() {
        let notifier = TracingNotifier::new();
        notifier.present_value_written(1, BinaryPv::Inactive, BinaryPv::Active);
        notifier.present_value_written(1, BinaryPv::Active, BinaryPv::Active);
        assert_eq!(notifier.delivered(), 2);
    }
}
