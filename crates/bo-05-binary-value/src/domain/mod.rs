//! # Domain Module
//!
//! Core domain types for the Binary Value object: the per-instance record,
//! the property set and the error types.

pub mod entities;
pub mod errors;
pub mod properties;

pub use entities::*;
pub use errors::*;
pub use properties::*;
