//! # BO-05 Binary Value
//!
//! Two-state value object (object type 5) with polarity, out-of-service,
//! reliability and change-of-value tracking.
//!
//! **Object Type:** 5 (Binary Value)
//! **Architecture:** Hexagonal (domain + ports/adapters)
//!
//! ## Behavior
//!
//! | Property | Rule |
//! |----------|------|
//! | Present_Value | stored bit seen through polarity |
//! | Status_Flags | fault = reliability != 0, out-of-service as stored |
//! | Out_Of_Service | writes still stored, never propagated |
//! | Polarity | flips the observed value without flagging a change |
//!
//! Protocol writes of Present_Value are gated per object (disabled by
//! default) and, when the object is in service, reported to the injected
//! [`PresentValueNotifier`].
//!
//! ## Module Structure
//!
//! ```text
//! bo-05-binary-value/
//! ├── domain/     # Object record, property table, errors
//! ├── store       # Instance-ordered registry
//! ├── service/    # Read/write dispatch, administrative setters
//! ├── ports/      # BinaryValueApi + PresentValueNotifier
//! ├── adapters/   # Notifier implementations
//! └── ipc/        # Request/response payloads and handler
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use bo_05_binary_value::{BinaryValueApi, BinaryValueService, NoOpNotifier};
//! use shared_types::PropertyIdentifier;
//! use std::sync::Arc;
//!
//! let mut service = BinaryValueService::new(Arc::new(NoOpNotifier));
//! service.create(1)?;
//! let apdu = service.read_property(1, PropertyIdentifier::PresentValue, None)?;
//! assert_eq!(apdu, vec![0x91, 0x00]);
//! ```

#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ipc;
pub mod metrics;
pub mod ports;
pub mod service;
pub mod store;

pub use adapters::TracingNotifier;
pub use config::BinaryValueConfig;
pub use domain::{
    property_lists, BinaryValueObject, ConfigError, ObjectError, PresentValueChange,
    PropertyGroup, PropertyLists, StoreError, PROPERTY_TABLE,
};
pub use ipc::BinaryValueHandler;
pub use metrics::{Metrics, MetricsSnapshot};
pub use ports::{
    BinaryValueApi, NoOpNotifier, PresentValueNotifier, PresentValueWrite, RecordingNotifier,
};
pub use service::BinaryValueService;
pub use store::ObjectStore;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
