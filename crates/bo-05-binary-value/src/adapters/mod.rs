//! # Adapters Layer
//!
//! Implementations of the outbound notifier port.

mod tracing_notifier;

pub use tracing_notifier::TracingNotifier;
