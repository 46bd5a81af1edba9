//! Relay endpoint integration tests
//!
//! - Payload assembly (prompt, image, PDF, model) as seen by the upstream
//! - Raw and JSON-extracting response modes
//! - Request validation (content type, missing prompt)

use axum::http::StatusCode;
use axum_test::multipart::MultipartForm;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use vision_relay::{config::DEFAULT_MODEL, prompt::PromptPreset};

use crate::common::{
    bearer, constants, image_and_pdf_form, image_form, prompt_form, RelayTestHarness,
};
use crate::mocks::MockOpenRouter;

async fn post_form(
    harness: &RelayTestHarness,
    path: &str,
    form: MultipartForm,
) -> axum_test::TestResponse {
    let (name, value) = bearer(constants::TEST_CALLER_KEY);
    harness
        .server
        .post(path)
        .add_header(name, value)
        .multipart(form)
        .await
}

#[tokio::test]
async fn test_text_only_request_returns_wrapped_content() {
    let harness = RelayTestHarness::new().await;
    harness.upstream.mock_completion("A treadmill display.").await;

    let response = post_form(&harness, "/", prompt_form("What is this?")).await;

    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "application/json");
    assert_eq!(
        response.json::<Value>(),
        json!({ "response": "A treadmill display." })
    );

    let payload = harness.upstream.single_payload().await;
    assert_eq!(
        payload,
        json!({
            "model": DEFAULT_MODEL,
            "messages": [{
                "role": "user",
                "content": [{ "type": "text", "text": "What is this?" }]
            }]
        })
    );
}

#[tokio::test]
async fn test_upstream_receives_service_credential_not_caller_key() {
    let harness = RelayTestHarness::new().await;
    harness.upstream.mock_completion("ok").await;

    post_form(&harness, "/", prompt_form("hi"))
        .await
        .assert_status_ok();

    let requests = harness.upstream.received().await;
    let authorization = requests[0]
        .headers
        .get("authorization")
        .unwrap()
        .to_str()
        .unwrap();
    assert_eq!(
        authorization,
        format!("Bearer {}", constants::TEST_UPSTREAM_KEY)
    );
    assert!(!authorization.contains(constants::TEST_CALLER_KEY));
}

#[tokio::test]
async fn test_image_and_pdf_are_sent_as_ordered_data_uris() {
    let harness = RelayTestHarness::new().await;
    harness.upstream.mock_completion("ok").await;

    post_form(&harness, "/", image_and_pdf_form("Summarize"))
        .await
        .assert_status_ok();

    let payload = harness.upstream.single_payload().await;
    let content = payload["messages"][0]["content"].as_array().unwrap().clone();

    assert_eq!(content.len(), 3);
    assert_eq!(content[0], json!({ "type": "text", "text": "Summarize" }));
    assert_eq!(
        content[1],
        json!({
            "type": "image_url",
            "image_url": format!("data:image/png;base64,{}", STANDARD.encode(constants::TEST_IMAGE))
        })
    );
    assert_eq!(
        content[2],
        json!({
            "type": "image_url",
            "image_url": format!("data:application/pdf;base64,{}", STANDARD.encode(constants::TEST_PDF))
        })
    );
}

#[tokio::test]
async fn test_forwarded_image_decodes_to_original_bytes() {
    let harness = RelayTestHarness::new().await;
    harness.upstream.mock_completion("ok").await;

    post_form(&harness, "/", image_form("p")).await.assert_status_ok();

    let payload = harness.upstream.single_payload().await;
    let uri = payload["messages"][0]["content"][1]["image_url"]
        .as_str()
        .unwrap()
        .to_string();
    let encoded = uri.strip_prefix("data:image/png;base64,").unwrap();
    assert_eq!(STANDARD.decode(encoded).unwrap(), constants::TEST_IMAGE);
}

#[tokio::test]
async fn test_model_field_overrides_default() {
    let harness = RelayTestHarness::new().await;
    harness.upstream.mock_completion("ok").await;

    let form = prompt_form("hi").add_text("model", "meta-llama/llama-4-maverick:free");
    post_form(&harness, "/", form).await.assert_status_ok();

    let payload = harness.upstream.single_payload().await;
    assert_eq!(payload["model"], json!("meta-llama/llama-4-maverick:free"));
}

#[tokio::test]
async fn test_configured_default_model_is_used() {
    let harness =
        RelayTestHarness::with_config(|config| config.default_model = "openai/gpt-4o".to_string())
            .await;
    harness.upstream.mock_completion("ok").await;

    post_form(&harness, "/", prompt_form("hi")).await.assert_status_ok();

    let payload = harness.upstream.single_payload().await;
    assert_eq!(payload["model"], json!("openai/gpt-4o"));
}

#[tokio::test]
async fn test_expect_json_returns_extracted_object_unwrapped() {
    let harness = RelayTestHarness::new().await;
    harness
        .upstream
        .mock_completion(r#"noise {"a":1,"b":{"c":2}} trailing"#)
        .await;

    let form = image_form("extract").add_text("expectJson", "true");
    let response = post_form(&harness, "/", form).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "a": 1, "b": { "c": 2 } }));
}

#[tokio::test]
async fn test_expect_json_other_values_keep_raw_mode() {
    let harness = RelayTestHarness::new().await;
    harness.upstream.mock_completion(r#"{"a":1}"#).await;

    let form = prompt_form("p").add_text("expectJson", "yes");
    let response = post_form(&harness, "/", form).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "response": "{\"a\":1}" }));
}

#[tokio::test]
async fn test_missing_content_is_null_in_raw_mode() {
    let harness = RelayTestHarness::new().await;
    harness
        .upstream
        .mock_raw_body(200, json!({ "id": "gen-1", "choices": [] }))
        .await;

    let response = post_form(&harness, "/", prompt_form("p")).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "response": null }));
}

#[tokio::test]
async fn test_non_string_content_is_null_in_raw_mode() {
    let harness = RelayTestHarness::new().await;
    harness
        .upstream
        .mock_raw_body(200, MockOpenRouter::completion_body(json!(null)))
        .await;

    let response = post_form(&harness, "/", prompt_form("p")).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "response": null }));
}

#[tokio::test]
async fn test_any_path_is_relayed() {
    let harness = RelayTestHarness::new().await;
    harness.upstream.mock_completion("ok").await;

    let response = post_form(&harness, "/v1/extract", prompt_form("p")).await;

    response.assert_status_ok();
    assert_eq!(harness.upstream.received().await.len(), 1);
}

#[tokio::test]
async fn test_non_multipart_content_type_returns_400() {
    let harness = RelayTestHarness::new().await;
    let (name, value) = bearer(constants::TEST_CALLER_KEY);

    let response = harness
        .server
        .post("/")
        .add_header(name, value)
        .json(&json!({ "prompt": "hi" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.text(), "Content-Type must be multipart/form-data");
    assert!(harness.upstream.received().await.is_empty());
}

#[tokio::test]
async fn test_missing_prompt_returns_400() {
    let harness = RelayTestHarness::new().await;

    let form = MultipartForm::new().add_text("model", "some/model");
    let response = post_form(&harness, "/", form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.text(), "Missing prompt field");
    assert!(harness.upstream.received().await.is_empty());
}

#[tokio::test]
async fn test_preset_prompt_used_when_prompt_missing() {
    let harness = RelayTestHarness::with_workout_preset().await;
    harness
        .upstream
        .mock_completion(
            "```json\n{\"distance_metres\": 5000, \"confidence_level\": \"high\"}\n```",
        )
        .await;

    let form = MultipartForm::new()
        .add_part(
            "image",
            axum_test::multipart::Part::bytes(constants::TEST_IMAGE.to_vec())
                .file_name("treadmill.png")
                .mime_type("image/png"),
        )
        .add_text("expectJson", "true");
    let response = post_form(&harness, "/", form).await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({ "distance_metres": 5000, "confidence_level": "high" })
    );

    let payload = harness.upstream.single_payload().await;
    assert_eq!(
        payload["messages"][0]["content"][0]["text"],
        json!(PromptPreset::Workout.text())
    );
}

#[tokio::test]
async fn test_explicit_prompt_wins_over_preset() {
    let harness = RelayTestHarness::with_workout_preset().await;
    harness.upstream.mock_completion("ok").await;

    post_form(&harness, "/", prompt_form("custom")).await.assert_status_ok();

    let payload = harness.upstream.single_payload().await;
    assert_eq!(payload["messages"][0]["content"][0]["text"], json!("custom"));
}

#[tokio::test]
async fn test_attribution_headers_are_sent_when_configured() {
    let harness = RelayTestHarness::with_config(|config| {
        config.site_url = Some("https://relay.example.com".to_string());
        config.site_name = Some("Vision Relay".to_string());
    })
    .await;
    harness.upstream.mock_completion("ok").await;

    post_form(&harness, "/", prompt_form("p")).await.assert_status_ok();

    let requests = harness.upstream.received().await;
    let headers = &requests[0].headers;
    assert_eq!(
        headers.get("http-referer").unwrap().to_str().unwrap(),
        "https://relay.example.com"
    );
    assert_eq!(
        headers.get("x-title").unwrap().to_str().unwrap(),
        "Vision Relay"
    );
}
