//! Service layer: property access and administrative operations.

mod binary_value_service;
mod read_property;
mod write_property;

pub use binary_value_service::BinaryValueService;
