//! End-to-end command scenarios against a recording transport

use hub_state::cli::{Commands, ReaderPrompt};
use hub_state::client::Method;
use hub_state::config::OutputMode;
use hub_state::error::StateError;
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::Cursor;

use crate::integration::{context, response, RecordingTransport, TEST_ID_TOKEN};

const ENDPOINT: &str = "https://us-central1-test-project.cloudfunctions.net/stacks";

fn no_answer() -> ReaderPrompt<Cursor<&'static str>> {
    ReaderPrompt::new(Cursor::new(""))
}

fn stacks_body(count: usize) -> String {
    let stacks: Vec<Value> = (0..count)
        .map(|i| {
            serde_json::json!({
                "id": format!("stack-{:02}", i),
                "name": format!("Stack {}", i),
                "status": "incomplete",
                "latestOperation": {
                    "name": "deploy",
                    "status": "failed",
                    "initiator": "bob@example.com",
                    "timestamp": "2022-03-01T09:00:00Z"
                }
            })
        })
        .collect();
    Value::Array(stacks).to_string()
}

fn stack_rows(output: &str) -> usize {
    output.lines().filter(|l| l.contains("stack-")).count()
}

#[test]
fn test_ls_sends_compiled_filters() {
    let transport = RecordingTransport::replying(vec![response(200, "200 OK", &stacks_body(3))]);
    let ctx = context(OutputMode::Table, transport.clone());

    let outcome = ctx.execute(
        &Commands::Ls {
            filter: vec!["status=incomplete".to_string()],
        },
        &mut no_answer(),
    );

    assert_eq!(outcome.exit_code, 0);
    let output = outcome.output.unwrap();
    assert!(output.starts_with("Listing Stacks in [test-project] GCP project"));
    assert_eq!(stack_rows(&output), 3);
    assert!(output.contains("3 hours ago"));

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::Get);
    assert_eq!(requests[0].url, ENDPOINT);
    let expected: BTreeMap<String, String> =
        [("status".to_string(), "incomplete".to_string())].into();
    assert_eq!(requests[0].query, expected);
    assert_eq!(requests[0].authorization, format!("Bearer {}", TEST_ID_TOKEN));
}

#[test]
fn test_ls_filter_keys_are_normalized() {
    let transport = RecordingTransport::replying(vec![response(200, "200 OK", "[]")]);
    let ctx = context(OutputMode::Table, transport.clone());

    let outcome = ctx.execute(
        &Commands::Ls {
            filter: vec![
                "Initiator=bob".to_string(),
                "broken".to_string(),
                "name=GKE".to_string(),
            ],
        },
        &mut no_answer(),
    );

    assert_eq!(outcome.output.as_deref(), Some("Nothing has been found"));
    let query = &transport.requests()[0].query;
    assert_eq!(query.len(), 2);
    assert_eq!(
        query.get("latestOperation.initiator").map(String::as_str),
        Some("bob")
    );
    assert_eq!(query.get("name").map(String::as_str), Some("GKE"));
}

#[test]
fn test_ls_truncates_to_twenty_rows() {
    let transport = RecordingTransport::replying(vec![response(200, "200 OK", &stacks_body(25))]);
    let ctx = context(OutputMode::Table, transport);

    let outcome = ctx.execute(&Commands::Ls { filter: Vec::new() }, &mut no_answer());

    let output = outcome.output.unwrap();
    assert_eq!(stack_rows(&output), 20);
    assert!(output.contains("stack-19"));
    assert!(!output.contains("stack-20"));
}

#[test]
fn test_ls_json_mode_is_not_truncated() {
    let transport = RecordingTransport::replying(vec![response(200, "200 OK", &stacks_body(25))]);
    let ctx = context(OutputMode::Json, transport);

    let outcome = ctx.execute(&Commands::Ls { filter: Vec::new() }, &mut no_answer());

    let document: Value = serde_json::from_str(&outcome.output.unwrap()).unwrap();
    assert_eq!(document.as_array().unwrap().len(), 25);
}

#[test]
fn test_ls_service_error_keeps_status_line() {
    let transport = RecordingTransport::replying(vec![response(
        500,
        "500 Internal Server Error",
        "oops",
    )]);
    let ctx = context(OutputMode::Table, transport);

    let outcome = ctx.execute(&Commands::Ls { filter: Vec::new() }, &mut no_answer());

    assert_eq!(outcome.exit_code, 0);
    assert!(outcome
        .output
        .unwrap()
        .contains("500 Internal Server Error"));
}

#[test]
fn test_ls_transport_failure_is_rendered() {
    let transport = RecordingTransport::replying(vec![Err(StateError::Transport(
        "Connection error: connection refused".to_string(),
    ))]);
    let ctx = context(OutputMode::Json, transport);

    let outcome = ctx.execute(&Commands::Ls { filter: Vec::new() }, &mut no_answer());

    let document: Value = serde_json::from_str(&outcome.output.unwrap()).unwrap();
    assert_eq!(document["error"], "Connection error: connection refused");
}

#[test]
fn test_show_renders_details() {
    let body = r#"{
        "id": "gke.dev",
        "name": "GKE",
        "status": "deployed",
        "latestOperation": {
            "name": "deploy",
            "status": "success",
            "initiator": "alice@example.com",
            "timestamp": "2022-02-27T12:00:00Z",
            "phases": [{"phase": "apply", "status": "success"}]
        },
        "stateLocation": {"uri": "gs://bucket/gke.dev.json", "kind": "gcs"},
        "components": [{"name": "cluster", "status": "deployed"}]
    }"#;
    let transport = RecordingTransport::replying(vec![response(200, "200 OK", body)]);
    let ctx = context(OutputMode::Table, transport.clone());

    let outcome = ctx.execute(
        &Commands::Show {
            id: "gke.dev".to_string(),
            raw: false,
        },
        &mut no_answer(),
    );

    assert_eq!(outcome.exit_code, 0);
    let output = outcome.output.unwrap();
    assert!(output.contains("Showing details of [gke.dev]"));
    assert!(output.contains("gs://bucket/gke.dev.json"));
    assert!(output.contains("2 days ago"));
    assert!(output.contains("cluster"));
    assert!(output.contains("apply"));

    let requests = transport.requests();
    assert_eq!(requests[0].url, format!("{}/gke.dev", ENDPOINT));
    assert!(requests[0].query.is_empty());
}

#[test]
fn test_show_missing_stack_fails() {
    let transport = RecordingTransport::replying(vec![response(404, "404 Not Found", "")]);
    let ctx = context(OutputMode::Table, transport);

    let outcome = ctx.execute(
        &Commands::Show {
            id: "missing-id".to_string(),
            raw: false,
        },
        &mut no_answer(),
    );

    assert_eq!(outcome.exit_code, 1);
    assert_eq!(
        outcome.output.as_deref(),
        Some("Error: State \"missing-id\" not found")
    );
}

#[test]
fn test_show_raw_requests_and_prints_document() {
    let body = r#"{"meta": {"kind": "state"}, "stack": {"name": "GKE"}}"#;
    let transport = RecordingTransport::replying(vec![response(200, "200 OK", body)]);
    let ctx = context(OutputMode::Table, transport.clone());

    let outcome = ctx.execute(
        &Commands::Show {
            id: "gke.dev".to_string(),
            raw: true,
        },
        &mut no_answer(),
    );

    let output = outcome.output.unwrap();
    assert!(output.find("\"meta\"").unwrap() < output.find("\"stack\"").unwrap());
    assert_eq!(
        transport.requests()[0].query.get("raw").map(String::as_str),
        Some("")
    );
}

#[test]
fn test_rm_confirmed_deletes_once() {
    let transport = RecordingTransport::replying(vec![response(200, "200 OK", "")]);
    let ctx = context(OutputMode::Table, transport.clone());
    let mut prompt = ReaderPrompt::new(Cursor::new("Yes\n"));

    let outcome = ctx.execute(&Commands::Rm { id: "abc".to_string() }, &mut prompt);

    assert_eq!(outcome.exit_code, 0);
    let output = outcome.output.unwrap();
    assert_eq!(output.matches("State \"abc\" is removed").count(), 1);
    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::Delete);
    assert_eq!(requests[0].url, format!("{}/abc", ENDPOINT));
}

#[test]
fn test_rm_lowercase_answer_aborts_without_requests() {
    let transport = RecordingTransport::replying(Vec::new());
    let ctx = context(OutputMode::Table, transport.clone());
    let mut prompt = ReaderPrompt::new(Cursor::new("y\n"));

    let outcome = ctx.execute(&Commands::Rm { id: "abc".to_string() }, &mut prompt);

    assert_eq!(outcome.exit_code, 0);
    assert!(outcome.output.is_none());
    assert!(transport.requests().is_empty());
}

#[test]
fn test_rm_missing_stack_fails() {
    let transport = RecordingTransport::replying(vec![response(404, "404 Not Found", "")]);
    let ctx = context(OutputMode::Json, transport);
    let mut prompt = ReaderPrompt::new(Cursor::new("Y\n"));

    let outcome = ctx.execute(&Commands::Rm { id: "gone".to_string() }, &mut prompt);

    assert_eq!(outcome.exit_code, 1);
    let document: Value = serde_json::from_str(&outcome.output.unwrap()).unwrap();
    assert_eq!(document["error"], "State \"gone\" not found");
}

#[test]
fn test_ls_json_mode_prints_document_with_unexpected_field_types() {
    let body = r#"[{"id":"a","name":"A","latestOperation":{"initiator":42}}]"#;
    let transport = RecordingTransport::replying(vec![response(200, "200 OK", body)]);
    let ctx = context(OutputMode::Json, transport);

    let outcome = ctx.execute(&Commands::Ls { filter: Vec::new() }, &mut no_answer());

    assert_eq!(outcome.exit_code, 0);
    let document: Value = serde_json::from_str(&outcome.output.unwrap()).unwrap();
    assert_eq!(document[0]["id"], "a");
    assert_eq!(document[0]["latestOperation"]["initiator"], 42);
}

#[test]
fn test_show_json_mode_prints_document_with_unexpected_field_types() {
    let body = r#"{"id":"a","components":{"x":1}}"#;
    let transport = RecordingTransport::replying(vec![response(200, "200 OK", body)]);
    let ctx = context(OutputMode::Json, transport);

    let outcome = ctx.execute(
        &Commands::Show {
            id: "a".to_string(),
            raw: false,
        },
        &mut no_answer(),
    );

    assert_eq!(outcome.exit_code, 0);
    let output = outcome.output.unwrap();
    assert!(output.find("\"id\"").unwrap() < output.find("\"components\"").unwrap());
    let document: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(document["components"]["x"], 1);
}

#[test]
fn test_show_table_mode_reports_undecodable_stack_as_not_found() {
    let body = r#"{"id":"a","components":{"x":1}}"#;
    let transport = RecordingTransport::replying(vec![response(200, "200 OK", body)]);
    let ctx = context(OutputMode::Table, transport);

    let outcome = ctx.execute(
        &Commands::Show {
            id: "a".to_string(),
            raw: false,
        },
        &mut no_answer(),
    );

    assert_eq!(outcome.exit_code, 1);
    assert_eq!(outcome.output.as_deref(), Some("Error: State \"a\" not found"));
}
