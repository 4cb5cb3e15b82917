//! End-to-end tests of the JSON-line protocol.

use bo_05_binary_value::{BinaryValueConfig, RecordingNotifier};
use device_runtime::{DeviceRuntime, Request, Response};
use serde_json::Value;
use shared_codec::{decode_application_data, ApplicationValue};
use std::sync::Arc;

fn runtime() -> (DeviceRuntime<RecordingNotifier>, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::new());
    let runtime = DeviceRuntime::new(BinaryValueConfig::for_testing(), notifier.clone()).unwrap();
    (runtime, notifier)
}

fn run(runtime: &mut DeviceRuntime<RecordingNotifier>, script: &str) -> Vec<Value> {
    script
        .lines()
        .filter_map(|line| runtime.process_line(line).unwrap())
        .map(|out| serde_json::from_str(&out).unwrap())
        .collect()
}

#[test]
fn session_with_named_object() {
    let (mut runtime, notifier) = runtime();
    let responses = run(
        &mut runtime,
        r#"
{"op":"create","object_instance":12}
{"op":"set_name","object_instance":12,"name":"Boiler Enable"}
{"op":"write_gate","object_instance":12,"enabled":true}
{"op":"write","object_instance":12,"property":85,"application_data":[145,1],"priority":8}
{"op":"read","object_instance":12,"property":77}
"#,
    );
    assert_eq!(responses.len(), 5);
    assert!(responses.iter().all(|r| r["success"] == true));
    assert_eq!(notifier.count(), 1);

    let data: Vec<u8> = serde_json::from_value(responses[4]["application_data"].clone()).unwrap();
    let (value, _) = decode_application_data(&data).unwrap();
    assert_eq!(
        value,
        ApplicationValue::CharacterString("Boiler Enable".to_string())
    );
}

#[test]
fn list_reports_instances_in_order() {
    let (mut runtime, _) = runtime();
    run(
        &mut runtime,
        r#"
{"op":"create","object_instance":7}
{"op":"create","object_instance":3}
{"op":"delete","object_instance":7}
{"op":"create","object_instance":5}
"#,
    );
    match runtime.dispatch(Request::List) {
        Response::List(list) => assert_eq!(list.object_instances, vec![3, 5]),
        other => panic!("unexpected response {:?}", other),
    }
}

#[test]
fn array_index_on_scalar_property() {
    let (mut runtime, _) = runtime();
    let responses = run(
        &mut runtime,
        r#"
{"op":"create","object_instance":1}
{"op":"read","object_instance":1,"property":111,"array_index":0}
"#,
    );
    assert_eq!(responses[1]["success"], false);
    assert_eq!(responses[1]["error"]["error_class"], 2);
    assert_eq!(responses[1]["error"]["error_code"], 50);
}

#[test]
fn capacity_exhaustion_reported() {
    let (mut runtime, _) = runtime();
    for instance in 1..=8 {
        let line = format!(r#"{{"op":"create","object_instance":{}}}"#, instance);
        runtime.process_line(&line).unwrap();
    }
    let out = runtime
        .process_line(r#"{"op":"create","object_instance":4194303}"#)
        .unwrap()
        .unwrap();
    let response: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(response["success"], false);
    assert_eq!(response["error"]["error_code"], 18);
}
