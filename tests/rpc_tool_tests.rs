//! Tests for client tools that forward calls over RPC.

mod common;

use std::sync::Arc;

use common::{capture_logs, client_descriptor, MockRoom};
use dynamic_agent::room::{ParticipantKind, RemoteParticipant, RoomSlot};
use dynamic_agent::tools::validation::validate_client_descriptor;
use dynamic_agent::tools::*;
use serde_json::json;

fn rpc_tool(name: &str, room: Arc<MockRoom>) -> RpcTool {
    let spec = validate_client_descriptor(&client_descriptor(name, &[("x", "An argument")]))
        .expect("descriptor should be valid");
    RpcTool::new(spec, Arc::new(RoomSlot::with_room(room)))
}

async fn invoke(tool: &RpcTool, value: serde_json::Value) -> String {
    let args = ToolArguments::from_value(value).expect("arguments should parse");
    tool.invoke(&args, &ToolExecutionContext::default()).await
}

#[tokio::test]
async fn room_without_browser_returns_lookup_message_and_sends_nothing() {
    let room = Arc::new(MockRoom::new(vec![
        RemoteParticipant::new("+15550100", ParticipantKind::Sip),
        RemoteParticipant::new("assistant", ParticipantKind::Agent),
    ]));
    let tool = rpc_tool("open_door", room.clone());

    let result = invoke(&tool, json!({"x": "1"})).await;

    assert_eq!(result, "No browser participant found");
    assert!(room.calls().is_empty());
}

#[tokio::test]
async fn empty_room_returns_lookup_message() {
    let room = Arc::new(MockRoom::new(Vec::new()));
    let tool = rpc_tool("open_door", room.clone());

    assert_eq!(invoke(&tool, json!({})).await, NO_BROWSER_PARTICIPANT);
    assert!(room.calls().is_empty());
}

#[tokio::test]
async fn empty_arguments_send_empty_payload() {
    let room = Arc::new(MockRoom::with_browser());
    let tool = rpc_tool("open_door", room.clone());

    invoke(&tool, json!({})).await;

    let calls = room.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].payload, "");
}

#[tokio::test]
async fn arguments_are_sent_as_json_to_camel_case_method() {
    let room = Arc::new(MockRoom::with_browser().respond_with("door opened"));
    let tool = rpc_tool("open_door", room.clone());

    let result = invoke(&tool, json!({"x": "1"})).await;

    assert_eq!(result, "Result: door opened");
    let calls = room.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].destination_identity, "browser");
    assert_eq!(calls[0].method, "openDoor");
    assert_eq!(calls[0].payload, r#"{"x": "1"}"#);
}

#[tokio::test]
async fn multi_argument_payload_keeps_call_order() {
    let room = Arc::new(MockRoom::with_browser());
    let tool = rpc_tool("set_volume_level", room.clone());

    invoke(&tool, json!(r#"{"level": "7", "room": "kitchen"}"#)).await;

    assert_eq!(room.calls()[0].payload, r#"{"level": "7", "room": "kitchen"}"#);
}

#[tokio::test]
async fn first_standard_participant_is_targeted() {
    let room = Arc::new(MockRoom::new(vec![
        RemoteParticipant::new("phone", ParticipantKind::Sip),
        RemoteParticipant::new("tab-a", ParticipantKind::Standard),
        RemoteParticipant::new("tab-b", ParticipantKind::Standard),
    ]));
    let tool = rpc_tool("set_volume_level", room.clone());

    invoke(&tool, json!({"x": "7"})).await;

    let calls = room.calls();
    assert_eq!(calls[0].destination_identity, "tab-a");
    assert_eq!(calls[0].method, "setVolumeLevel");
}

#[tokio::test]
async fn rpc_failure_becomes_error_string() {
    let room = Arc::new(MockRoom::with_browser().fail_with("method not registered"));
    let tool = rpc_tool("open_door", room.clone());

    let result = invoke(&tool, json!({})).await;

    assert!(result.starts_with("Error: "), "got {result}");
    assert!(result.contains("method not registered"));
    assert_eq!(room.calls().len(), 1);
}

#[tokio::test]
async fn rpc_failure_is_logged_with_category_and_retry_flag() {
    let (_guard, logs) = capture_logs();
    let room = Arc::new(MockRoom::with_browser().fail_with("method not registered"));
    let tool = rpc_tool("open_door", room);

    invoke(&tool, json!({})).await;

    let output = logs.contents();
    assert!(output.contains("client tool failed"), "logs: {output}");
    assert!(output.contains("category=\"rpc\""), "logs: {output}");
    assert!(output.contains("retryable=false"), "logs: {output}");
}

#[tokio::test]
async fn missing_room_becomes_error_string() {
    let spec = validate_client_descriptor(&client_descriptor("open_door", &[])).unwrap();
    let tool = RpcTool::new(spec, Arc::new(RoomSlot::new()));

    let result = invoke(&tool, json!({})).await;

    assert!(result.starts_with("Error: No active room"), "got {result}");
}

#[tokio::test]
async fn room_attached_after_construction_is_used_at_call_time() {
    let slot = Arc::new(RoomSlot::new());
    let spec = validate_client_descriptor(&client_descriptor("ping", &[])).unwrap();
    let tool = RpcTool::new(spec, slot.clone());

    let room = Arc::new(MockRoom::with_browser().respond_with("pong"));
    slot.attach(room.clone());

    assert_eq!(invoke(&tool, json!(null)).await, "Result: pong");
    assert_eq!(room.calls()[0].method, "ping");
}

#[tokio::test]
async fn concurrent_calls_do_not_interfere() {
    let room = Arc::new(MockRoom::with_browser());
    let tool = Arc::new(rpc_tool("open_door", room.clone()));

    let calls = (0..8).map(|i| {
        let tool = tool.clone();
        async move { invoke(&tool, json!({"x": i.to_string()})).await }
    });
    let results = futures::future::join_all(calls).await;

    assert!(results.iter().all(|r| r == "Result: ok"));
    let mut payloads: Vec<String> = room.calls().into_iter().map(|c| c.payload).collect();
    payloads.sort();
    assert_eq!(payloads.len(), 8);
    payloads.dedup();
    assert_eq!(payloads.len(), 8);
}

#[test]
fn schema_comes_from_descriptor() {
    let tool = rpc_tool("open_door", Arc::new(MockRoom::with_browser()));
    let schema = tool.schema();

    assert_eq!(schema.name, "open_door");
    assert_eq!(schema.required(), vec!["x"]);
    assert_eq!(tool.rpc_method(), "openDoor");
}
