//! IPC Payloads for the Binary Value object
//!
//! Property identifiers travel as their numeric wire values and array
//! indices use `BACNET_ARRAY_ALL` for "whole property", so a payload maps
//! one-to-one onto a ReadProperty / WriteProperty service request.

use serde::{Deserialize, Serialize};
use shared_types::{PropertyIdentifier, BACNET_ARRAY_ALL};

use crate::domain::{ObjectError, StoreError};

fn array_all() -> u32 {
    BACNET_ARRAY_ALL
}

// ============================================================
// INCOMING REQUESTS
// ============================================================

/// Read one property of one object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadPropertyRequest {
    pub object_instance: u32,
    pub property: PropertyIdentifier,
    #[serde(default = "array_all")]
    pub array_index: u32,
}

/// Write one property of one object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WritePropertyRequest {
    pub object_instance: u32,
    pub property: PropertyIdentifier,
    #[serde(default = "array_all")]
    pub array_index: u32,
    /// Application-tagged value octets
    pub application_data: Vec<u8>,
    /// Command priority; accepted and ignored (the object is not commandable)
    #[serde(default)]
    pub priority: Option<u8>,
}

/// Create an object; `BACNET_MAX_INSTANCE` picks a free instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateObjectRequest {
    pub object_instance: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteObjectRequest {
    pub object_instance: u32,
}

// ============================================================
// OUTGOING RESPONSES
// ============================================================

/// Protocol error triple returned with a failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error_class: u32,
    pub error_code: u32,
    pub message: String,
}

impl From<&ObjectError> for ErrorPayload {
    fn from(err: &ObjectError) -> Self {
        Self {
            error_class: err.error_class().to_u32(),
            error_code: err.error_code().to_u32(),
            message: err.to_string(),
        }
    }
}

impl From<&StoreError> for ErrorPayload {
    fn from(err: &StoreError) -> Self {
        Self {
            error_class: err.error_class().to_u32(),
            error_code: err.error_code().to_u32(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadPropertyResponse {
    pub object_instance: u32,
    pub property: PropertyIdentifier,
    pub success: bool,
    /// Encoded value (empty on failure)
    pub application_data: Vec<u8>,
    pub error: Option<ErrorPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WritePropertyResponse {
    pub object_instance: u32,
    pub property: PropertyIdentifier,
    pub success: bool,
    pub error: Option<ErrorPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateObjectResponse {
    pub success: bool,
    /// Instance actually created (resolved for wildcard requests)
    pub object_instance: Option<u32>,
    pub error: Option<ErrorPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteObjectResponse {
    pub object_instance: u32,
    /// `false` if the object did not exist
    pub deleted: bool,
}

/// Every object instance, in index order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListObjectsResponse {
    pub object_instances: Vec<u32>,
    pub required: Vec<PropertyIdentifier>,
    pub optional: Vec<PropertyIdentifier>,
}
