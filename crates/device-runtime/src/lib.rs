//! # Device Runtime
//!
//! Hosts the Binary Value objects of one device and serves property
//! requests over a line-oriented JSON protocol.
//!
//! ## Protocol
//!
//! One request per line, one response per line:
//!
//! ```text
//! {"op":"create","object_instance":4194303}
//! {"op":"write_gate","object_instance":1,"enabled":true}
//! {"op":"write","object_instance":1,"property":85,"application_data":[145,1]}
//! {"op":"read","object_instance":1,"property":85}
//! ```
//!
//! Malformed lines are answered with `{"success":false,"message":...}`
//! and never stop the runtime.

use bo_05_binary_value::ipc::{
    CreateObjectRequest, CreateObjectResponse, DeleteObjectRequest, DeleteObjectResponse,
    ErrorPayload, ListObjectsResponse, ReadPropertyRequest, ReadPropertyResponse,
    WritePropertyRequest, WritePropertyResponse,
};
use bo_05_binary_value::{
    BinaryValueConfig, BinaryValueHandler, BinaryValueService, ConfigError, MetricsSnapshot,
    ObjectError, PresentValueNotifier,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One request line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    Read(ReadPropertyRequest),
    Write(WritePropertyRequest),
    Create(CreateObjectRequest),
    Delete(DeleteObjectRequest),
    List,
    Metrics,
    /// Local operation: open or close protocol writes of Present_Value.
    WriteGate { object_instance: u32, enabled: bool },
    /// Local operation: store a reliability code.
    SetReliability { object_instance: u32, reliability: u32 },
    /// Local operation: set Object_Name.
    SetName { object_instance: u32, name: String },
}

/// Result of a local operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalResponse {
    pub object_instance: u32,
    pub success: bool,
    pub error: Option<ErrorPayload>,
}

impl LocalResponse {
    fn from_result(object_instance: u32, result: Result<(), ObjectError>) -> Self {
        match result {
            Ok(()) => Self {
                object_instance,
                success: true,
                error: None,
            },
            Err(e) => Self {
                object_instance,
                success: false,
                error: Some(ErrorPayload::from(&e)),
            },
        }
    }
}

/// Answer to a line that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidRequest {
    pub success: bool,
    pub message: String,
}

/// One response line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Read(ReadPropertyResponse),
    Write(WritePropertyResponse),
    Create(CreateObjectResponse),
    Delete(DeleteObjectResponse),
    List(ListObjectsResponse),
    Metrics(MetricsSnapshot),
    Local(LocalResponse),
    Invalid(InvalidRequest),
}

/// The runtime: one handler, driven from a single task.
pub struct DeviceRuntime<N: PresentValueNotifier> {
    handler: BinaryValueHandler<N>,
}

impl<N: PresentValueNotifier> DeviceRuntime<N> {
    /// Create a runtime with a validated configuration.
    pub fn new(config: BinaryValueConfig, notifier: Arc<N>) -> Result<Self, ConfigError> {
        info!(
            max_objects = config.max_objects,
            name_prefix = %config.name_prefix,
            "[bo-05] Starting device runtime"
        );
        let service = BinaryValueService::with_config(config, notifier)?;
        Ok(Self {
            handler: BinaryValueHandler::new(service),
        })
    }

    pub fn handler(&self) -> &BinaryValueHandler<N> {
        &self.handler
    }

    /// Execute one request.
    pub fn dispatch(&mut self, request: Request) -> Response {
        match request {
            Request::Read(req) => Response::Read(self.handler.handle_read_property(req)),
            Request::Write(req) => Response::Write(self.handler.handle_write_property(req)),
            Request::Create(req) => Response::Create(self.handler.handle_create_object(req)),
            Request::Delete(req) => Response::Delete(self.handler.handle_delete_object(req)),
            Request::List => Response::List(self.handler.handle_list_objects()),
            Request::Metrics => Response::Metrics(self.handler.metrics().snapshot()),
            Request::WriteGate {
                object_instance,
                enabled,
            } => {
                let service = self.handler.service_mut();
                let result = if enabled {
                    service.write_enable(object_instance)
                } else {
                    service.write_disable(object_instance)
                };
                Response::Local(LocalResponse::from_result(object_instance, result))
            }
            Request::SetReliability {
                object_instance,
                reliability,
            } => {
                let result = self
                    .handler
                    .service_mut()
                    .reliability_set(object_instance, reliability);
                Response::Local(LocalResponse::from_result(object_instance, result))
            }
            Request::SetName {
                object_instance,
                name,
            } => {
                let result = self.handler.service_mut().name_set(object_instance, name);
                Response::Local(LocalResponse::from_result(object_instance, result))
            }
        }
    }

    /// Parse one line, execute it and serialize the response.
    ///
    /// Blank lines yield `None`.
    pub fn process_line(&mut self, line: &str) -> Result<Option<String>, serde_json::Error> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let response = match serde_json::from_str::<Request>(line) {
            Ok(request) => {
                debug!(?request, "[bo-05] Request received");
                self.dispatch(request)
            }
            Err(e) => {
                warn!(error = %e, "[bo-05] Malformed request line");
                Response::Invalid(InvalidRequest {
                    success: false,
                    message: e.to_string(),
                })
            }
        };
        serde_json::to_string(&response).map(Some)
    }

    /// Release every object.
    pub fn shutdown(&mut self) {
        self.handler.shutdown();
    }
}
