//! IPC Handler for the Binary Value object
//!
//! Converts payloads into service calls, records metrics and turns every
//! result into a response. Errors never escape as `Err`: a failed request
//! is a response with `success == false` and the protocol error triple.

use shared_types::{array_index_from_wire, PropertyIdentifier};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::ObjectError;
use crate::ipc::payloads::{
    CreateObjectRequest, CreateObjectResponse, DeleteObjectRequest, DeleteObjectResponse,
    ErrorPayload, ListObjectsResponse, ReadPropertyRequest, ReadPropertyResponse,
    WritePropertyRequest, WritePropertyResponse,
};
use crate::metrics::Metrics;
use crate::ports::{BinaryValueApi, PresentValueNotifier};
use crate::service::BinaryValueService;

/// IPC Handler for Binary Value requests.
pub struct BinaryValueHandler<N: PresentValueNotifier> {
    service: BinaryValueService<N>,
    metrics: Arc<Metrics>,
}

impl<N: PresentValueNotifier> BinaryValueHandler<N> {
    pub fn new(service: BinaryValueService<N>) -> Self {
        Self {
            service,
            metrics: Arc::new(Metrics::new()),
        }
    }

    /// Share an existing metrics collector.
    pub fn with_metrics(service: BinaryValueService<N>, metrics: Arc<Metrics>) -> Self {
        Self { service, metrics }
    }

    pub fn service(&self) -> &BinaryValueService<N> {
        &self.service
    }

    pub fn service_mut(&mut self) -> &mut BinaryValueService<N> {
        &mut self.service
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    /// Handle a ReadPropertyRequest.
    pub fn handle_read_property(&self, request: ReadPropertyRequest) -> ReadPropertyResponse {
        let array_index = array_index_from_wire(request.array_index);
        debug!(
            instance = request.object_instance,
            property = %request.property,
            ?array_index,
            "[bo-05] ReadProperty"
        );

        let result =
            self.service
                .read_property(request.object_instance, request.property, array_index);
        self.metrics.record_read(result.is_ok());

        match result {
            Ok(application_data) => ReadPropertyResponse {
                object_instance: request.object_instance,
                property: request.property,
                success: true,
                application_data,
                error: None,
            },
            Err(e) => {
                warn!(
                    instance = request.object_instance,
                    property = %request.property,
                    error = %e,
                    "[bo-05] ReadProperty rejected"
                );
                ReadPropertyResponse {
                    object_instance: request.object_instance,
                    property: request.property,
                    success: false,
                    application_data: Vec::new(),
                    error: Some(ErrorPayload::from(&e)),
                }
            }
        }
    }

    /// Handle a WritePropertyRequest.
    pub fn handle_write_property(&mut self, request: WritePropertyRequest) -> WritePropertyResponse {
        let array_index = array_index_from_wire(request.array_index);
        debug!(
            instance = request.object_instance,
            property = %request.property,
            ?array_index,
            priority = ?request.priority,
            len = request.application_data.len(),
            "[bo-05] WriteProperty"
        );

        let result = self.service.write_property(
            request.object_instance,
            request.property,
            array_index,
            &request.application_data,
        );
        self.metrics.record_write(result.is_ok());
        if result.is_ok() && request.property == PropertyIdentifier::PresentValue {
            let in_service = self.service.out_of_service(request.object_instance) == Some(false);
            self.metrics.record_notification(in_service);
        }

        self.write_response(request.object_instance, request.property, result)
    }

    fn write_response(
        &self,
        object_instance: u32,
        property: PropertyIdentifier,
        result: Result<(), ObjectError>,
    ) -> WritePropertyResponse {
        match result {
            Ok(()) => WritePropertyResponse {
                object_instance,
                property,
                success: true,
                error: None,
            },
            Err(e) => {
                warn!(
                    instance = object_instance,
                    property = %property,
                    error = %e,
                    "[bo-05] WriteProperty rejected"
                );
                WritePropertyResponse {
                    object_instance,
                    property,
                    success: false,
                    error: Some(ErrorPayload::from(&e)),
                }
            }
        }
    }

    pub fn handle_create_object(&mut self, request: CreateObjectRequest) -> CreateObjectResponse {
        match self.service.create(request.object_instance) {
            Ok(instance) => CreateObjectResponse {
                success: true,
                object_instance: Some(instance),
                error: None,
            },
            Err(e) => {
                warn!(
                    instance = request.object_instance,
                    error = %e,
                    "[bo-05] CreateObject rejected"
                );
                CreateObjectResponse {
                    success: false,
                    object_instance: None,
                    error: Some(ErrorPayload::from(&e)),
                }
            }
        }
    }

    pub fn handle_delete_object(&mut self, request: DeleteObjectRequest) -> DeleteObjectResponse {
        DeleteObjectResponse {
            object_instance: request.object_instance,
            deleted: self.service.delete(request.object_instance),
        }
    }

    pub fn handle_list_objects(&self) -> ListObjectsResponse {
        let lists = self.service.property_lists();
        let object_instances = (0..self.service.count())
            .filter_map(|index| self.service.index_to_instance(index))
            .collect();
        ListObjectsResponse {
            object_instances,
            required: lists.required,
            optional: lists.optional,
        }
    }

    /// Release every object.
    pub fn shutdown(&mut self) {
        let snapshot = self.metrics.snapshot();
        info!(
            reads = snapshot.reads,
            writes = snapshot.writes,
            rejected = snapshot.rejected,
            "[bo-05] Handler shutting down"
        );
        self.service.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BinaryValueConfig;
    use crate::ports::RecordingNotifier;
    use shared_types::{BACNET_ARRAY_ALL, BACNET_MAX_INSTANCE};

    fn handler() -> (BinaryValueHandler<RecordingNotifier>, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        let service =
            BinaryValueService::with_config(BinaryValueConfig::for_testing(), notifier.clone())
                .unwrap();
        (BinaryValueHandler::new(service), notifier)
    }

    fn read(instance: u32, property: PropertyIdentifier) -> ReadPropertyRequest {
        ReadPropertyRequest {
            object_instance: instance,
            property,
            array_index: BACNET_ARRAY_ALL,
        }
    }

    fn write(instance: u32, property: PropertyIdentifier, data: &[u8]) -> WritePropertyRequest {
        WritePropertyRequest {
            object_instance: instance,
            property,
            array_index: BACNET_ARRAY_ALL,
            application_data: data.to_vec(),
            priority: None,
        }
    }

    #[test]
    fn test_read_unknown_object() {
        let (handler, _) = handler();
        let response = handler.handle_read_property(read(5, PropertyIdentifier::PresentValue));
        assert!(!response.success);
        assert!(response.application_data.is_empty());
        let error = response.error.unwrap();
        assert_eq!((error.error_class, error.error_code), (1, 31));
        assert_eq!(handler.metrics().snapshot().rejected, 1);
    }

    #[test]
    fn test_read_with_array_index() {
        let (mut handler, _) = handler();
        handler.handle_create_object(CreateObjectRequest { object_instance: 1 });
        let mut request = read(1, PropertyIdentifier::PresentValue);
        request.array_index = 0;
        let response = handler.handle_read_property(request);
        assert!(!response.success);
        assert_eq!(response.error.unwrap().error_code, 50);
    }

    #[test]
    fn test_write_then_read_present_value() {
        let (mut handler, notifier) = handler();
        handler.handle_create_object(CreateObjectRequest { object_instance: 1 });
        handler.service_mut().write_enable(1).unwrap();

        let response =
            handler.handle_write_property(write(1, PropertyIdentifier::PresentValue, &[0x91, 0x01]));
        assert!(response.success);
        assert_eq!(notifier.count(), 1);

        let response = handler.handle_read_property(read(1, PropertyIdentifier::PresentValue));
        assert_eq!(response.application_data, vec![0x91, 0x01]);

        let snapshot = handler.metrics().snapshot();
        assert_eq!(snapshot.writes, 1);
        assert_eq!(snapshot.reads, 1);
        assert_eq!(snapshot.notifications_delivered, 1);
    }

    #[test]
    fn test_out_of_service_write_counted_as_suppressed() {
        let (mut handler, notifier) = handler();
        handler.handle_create_object(CreateObjectRequest { object_instance: 1 });
        handler.service_mut().write_enable(1).unwrap();
        handler.handle_write_property(write(1, PropertyIdentifier::OutOfService, &[0x11]));
        handler.handle_write_property(write(1, PropertyIdentifier::PresentValue, &[0x91, 0x01]));

        assert_eq!(notifier.count(), 0);
        assert_eq!(handler.metrics().snapshot().notifications_suppressed, 1);
    }

    #[test]
    fn test_write_denied_returns_error_triple() {
        let (mut handler, _) = handler();
        handler.handle_create_object(CreateObjectRequest { object_instance: 1 });
        let response =
            handler.handle_write_property(write(1, PropertyIdentifier::PresentValue, &[0x91, 0x01]));
        assert!(!response.success);
        let error = response.error.unwrap();
        assert_eq!((error.error_class, error.error_code), (2, 40));
    }

    #[test]
    fn test_create_list_delete() {
        let (mut handler, _) = handler();
        let created = handler.handle_create_object(CreateObjectRequest {
            object_instance: BACNET_MAX_INSTANCE,
        });
        assert_eq!(created.object_instance, Some(1));
        handler.handle_create_object(CreateObjectRequest { object_instance: 9 });

        let list = handler.handle_list_objects();
        assert_eq!(list.object_instances, vec![1, 9]);
        assert!(list.required.contains(&PropertyIdentifier::PresentValue));

        let deleted = handler.handle_delete_object(DeleteObjectRequest { object_instance: 9 });
        assert!(deleted.deleted);
        handler.shutdown();
        assert_eq!(handler.service().count(), 0);
    }

    #[test]
    fn test_create_out_of_range() {
        let (mut handler, _) = handler();
        let response = handler.handle_create_object(CreateObjectRequest {
            object_instance: BACNET_MAX_INSTANCE + 1,
        });
        assert!(!response.success);
        assert_eq!(response.error.unwrap().error_code, 37);
    }
}
