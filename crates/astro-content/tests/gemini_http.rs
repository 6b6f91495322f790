//! Gemini client tests against a mocked API.

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use astro_content::GeminiClient;

fn brief_response(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [
            { "content": { "parts": [ { "text": text } ] } }
        ]
    }))
}

#[tokio::test]
async fn test_request_shape_and_text_extraction() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(json!({
            "generationConfig": { "responseMimeType": "application/json" }
        })))
        .respond_with(brief_response("{\"caption\": \"hello\"}"))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::new("test-key").with_api_base(server.uri());
    let text = client.generate("daily brief please").await.unwrap();

    assert_eq!(text, "{\"caption\": \"hello\"}");
}

#[tokio::test]
async fn test_falls_back_to_next_model_on_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash-lite:generateContent"))
        .respond_with(brief_response("fallback brief"))
        .mount(&server)
        .await;

    let client = GeminiClient::new("test-key").with_api_base(server.uri());
    let text = client.generate("daily brief please").await.unwrap();

    assert_eq!(text, "fallback brief");
}

#[tokio::test]
async fn test_all_models_failing_reports_last_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend error"))
        .mount(&server)
        .await;

    let client = GeminiClient::new("test-key").with_api_base(server.uri());
    let err = client.generate("daily brief please").await.unwrap_err();

    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_empty_candidates_is_an_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let client = GeminiClient::new("test-key").with_api_base(server.uri());
    let err = client.generate("daily brief please").await.unwrap_err();

    assert!(err.to_string().contains("No content"));
}
