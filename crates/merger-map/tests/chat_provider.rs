//! Exercises the chat-completion provider against a mocked endpoint.

use std::path::PathBuf;
use std::time::Duration;

use merger_map::{
    ChatMappingConfig, ChatMappingProvider, FieldMapping, MappingError, MappingProvider,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn completion_body(content: &str) -> serde_json::Value {
    json!({
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
    })
}

async fn mount_completion(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(response)
        .named("chat completion")
        .expect(1)
        .mount(server)
        .await;
}

/// Runs `propose` on a blocking thread; the blocking client owns its own runtime.
async fn propose(
    server: &MockServer,
    fields: &[&str],
    mapping_file: Option<PathBuf>,
) -> Result<FieldMapping, MappingError> {
    let base_url = format!("{}/v1", server.uri());
    let fields: Vec<String> = fields.iter().map(ToString::to_string).collect();
    tokio::task::spawn_blocking(move || {
        let mut config = ChatMappingConfig::new("test-key");
        config.base_url = base_url;
        config.timeout = Some(Duration::from_secs(10));
        config.mapping_file = mapping_file;
        ChatMappingProvider::new(config)?.propose(&fields)
    })
    .await
    .unwrap()
}

#[tokio::test]
async fn propose_parses_fenced_completion() {
    let server = MockServer::start().await;
    let completion = "```json\n{\"Name\": [\"Full Name\", \"name\"], \"Email\": [\"email\"]}\n```";
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({"model": "gpt-4"})))
        .and(body_string_contains(r#""role":"user""#))
        .and(body_string_contains(r#"[\"Full Name\",\"email\"]"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(completion)))
        .named("chat completion")
        .expect(1)
        .mount(&server)
        .await;

    let mapping = propose(&server, &["Full Name", "email"], None).await.unwrap();

    assert_eq!(
        mapping.canonical_fields().collect::<Vec<_>>(),
        vec!["Name", "Email"]
    );
}

#[tokio::test]
async fn propose_reports_http_status() {
    let server = MockServer::start().await;
    mount_completion(
        &server,
        ResponseTemplate::new(401).set_body_string(r#"{"error":"bad key"}"#),
    )
    .await;

    let result = propose(&server, &["a"], None).await;

    match result {
        Err(MappingError::Status { status, message }) => {
            assert_eq!(status, 401);
            assert!(message.contains("bad key"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn propose_rejects_non_json_completion() {
    let server = MockServer::start().await;
    mount_completion(
        &server,
        ResponseTemplate::new(200).set_body_json(completion_body("Sorry, I cannot help.")),
    )
    .await;

    let result = propose(&server, &["a"], None).await;

    assert!(matches!(result, Err(MappingError::Parse { .. })));
}

#[tokio::test]
async fn propose_rejects_response_without_choices() {
    let server = MockServer::start().await;
    mount_completion(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"choices": []})),
    )
    .await;

    let result = propose(&server, &["a"], None).await;

    assert!(matches!(result, Err(MappingError::MalformedResponse { .. })));
}

#[tokio::test]
async fn completion_is_saved_verbatim() {
    let server = MockServer::start().await;
    let completion = "```json\n{\"Name\": [\"name\"]}\n```";
    mount_completion(
        &server,
        ResponseTemplate::new(200).set_body_json(completion_body(completion)),
    )
    .await;
    let dir = tempfile::tempdir().unwrap();
    let mapping_file = dir.path().join("fieldMapping.json");

    let mapping = propose(&server, &["name"], Some(mapping_file.clone()))
        .await
        .unwrap();

    assert_eq!(mapping.len(), 1);
    assert_eq!(std::fs::read_to_string(&mapping_file).unwrap(), completion);
    assert_eq!(merger_map::load_mapping(&mapping_file).unwrap(), mapping);
}

#[tokio::test]
async fn unparsable_completion_is_still_saved() {
    let server = MockServer::start().await;
    let completion = "Sure: {\"Name\": [\"name\"]}";
    mount_completion(
        &server,
        ResponseTemplate::new(200).set_body_json(completion_body(completion)),
    )
    .await;
    let dir = tempfile::tempdir().unwrap();
    let mapping_file = dir.path().join("out").join("fieldMapping.json");

    let result = propose(&server, &["name"], Some(mapping_file.clone())).await;

    assert!(matches!(result, Err(MappingError::Parse { .. })));
    assert_eq!(std::fs::read_to_string(&mapping_file).unwrap(), completion);
}

#[tokio::test]
async fn failed_save_does_not_fail_the_proposal() {
    let server = MockServer::start().await;
    mount_completion(
        &server,
        ResponseTemplate::new(200).set_body_json(completion_body(r#"{"Name": ["name"]}"#)),
    )
    .await;
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();

    let mapping = propose(&server, &["name"], Some(blocker.join("fieldMapping.json")))
        .await
        .unwrap();

    assert_eq!(mapping.len(), 1);
}
