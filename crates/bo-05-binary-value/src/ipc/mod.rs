//! IPC Module for the Binary Value object
//!
//! - Accept: ReadProperty, WriteProperty, CreateObject, DeleteObject
//! - Send: the matching response, carrying the protocol error on failure

pub mod handler;
pub mod payloads;

pub use handler::BinaryValueHandler;
pub use payloads::*;
