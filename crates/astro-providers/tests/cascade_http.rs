//! End-to-end cascade tests against mocked provider HTTP APIs.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{header, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use astro_models::MediaKind;
use astro_providers::{
    LumaVideo, PollinationsImage, PollinationsVideo, ReplicateVideo, VideoCascade, VideoProvider,
    VideoRequest,
};

fn mp4_bytes() -> Vec<u8> {
    let mut bytes = vec![0, 0, 0, 0x20];
    bytes.extend_from_slice(b"ftypisom");
    bytes.resize(4096, 0);
    bytes
}

fn jpeg_bytes() -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];
    bytes.resize(4096, 0);
    bytes
}

fn png_bytes() -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.resize(4096, 0);
    bytes
}

fn fast_cascade(providers: Vec<Box<dyn VideoProvider>>) -> VideoCascade {
    VideoCascade::with_providers(providers).with_poll_schedule(Duration::from_millis(1), 5)
}

#[tokio::test]
async fn test_replicate_submit_poll_fetch() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/bytedance/seedance-1-lite/predictions"))
        .and(header("authorization", "Bearer r8_test"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "pred-1",
            "status": "starting",
            "urls": { "get": format!("{}/predictions/pred-1", server.uri()) },
        })))
        .mount(&server)
        .await;

    // First poll is still running, second is terminal.
    Mock::given(method("GET"))
        .and(path("/predictions/pred-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "pred-1",
            "status": "processing",
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/predictions/pred-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "pred-1",
            "status": "succeeded",
            "output": [format!("{}/assets/clip.mp4", server.uri())],
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/assets/clip.mp4"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(mp4_bytes(), "video/mp4"))
        .mount(&server)
        .await;

    let provider = ReplicateVideo::new("r8_test").with_api_base(server.uri());
    let cascade = fast_cascade(vec![Box::new(provider)]);

    let clip = cascade
        .generate(&VideoRequest::new("a slow pan over saturn's rings", 5))
        .await
        .unwrap();

    assert_eq!(clip.kind, MediaKind::Video);
    assert_eq!(clip.len(), 4096);
}

#[tokio::test]
async fn test_luma_submit_poll_fetch() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/dream-machine/v1/generations"))
        .and(header("authorization", "Bearer luma_test"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "gen-1",
            "state": "queued",
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dream-machine/v1/generations/gen-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "gen-1",
            "state": "dreaming",
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dream-machine/v1/generations/gen-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "gen-1",
            "state": "completed",
            "assets": { "video": format!("{}/assets/luma.mp4", server.uri()) },
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/assets/luma.mp4"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(mp4_bytes(), "video/mp4"))
        .mount(&server)
        .await;

    let provider = LumaVideo::new("luma_test").with_api_base(server.uri());
    let cascade = fast_cascade(vec![Box::new(provider)]);

    let clip = cascade
        .generate(&VideoRequest::new("moonrise over a calm sea", 8))
        .await
        .unwrap();

    assert_eq!(clip.kind, MediaKind::Video);
}

#[tokio::test]
async fn test_image_payload_falls_through_to_next_provider() {
    let server = MockServer::start().await;

    // Replicate "succeeds" but hands back a JPEG where a clip should be.
    Mock::given(method("POST"))
        .and(path("/models/bytedance/seedance-1-lite/predictions"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "pred-2",
            "status": "starting",
            "urls": { "get": format!("{}/predictions/pred-2", server.uri()) },
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/predictions/pred-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "succeeded",
            "output": format!("{}/assets/still.jpg", server.uri()),
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/assets/still.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(jpeg_bytes(), "image/jpeg"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex("^/text-to-video/.*"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(mp4_bytes(), "video/mp4"))
        .mount(&server)
        .await;

    let replicate = ReplicateVideo::new("r8_test").with_api_base(server.uri());
    let pollinations = PollinationsVideo::new().with_video_base(server.uri());
    let cascade = fast_cascade(vec![Box::new(replicate), Box::new(pollinations)]);

    let clip = cascade
        .generate(&VideoRequest::new("shooting star", 5))
        .await
        .unwrap();

    assert_eq!(clip.kind, MediaKind::Video);
}

#[tokio::test]
async fn test_failed_job_falls_through_to_next_provider() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/bytedance/seedance-1-lite/predictions"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "pred-3",
            "status": "starting",
            "urls": { "get": format!("{}/predictions/pred-3", server.uri()) },
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/predictions/pred-3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "failed",
            "error": "content flagged",
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex("^/text-to-video/.*"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(mp4_bytes(), "video/mp4"))
        .mount(&server)
        .await;

    let replicate = ReplicateVideo::new("r8_test").with_api_base(server.uri());
    let pollinations = PollinationsVideo::new().with_video_base(server.uri());
    let cascade = fast_cascade(vec![Box::new(replicate), Box::new(pollinations)]);

    let clip = cascade.generate(&VideoRequest::new("aurora", 5)).await;

    assert!(clip.is_some());
}

#[tokio::test]
async fn test_all_providers_down_yields_none() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/bytedance/seedance-1-lite/predictions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("over capacity"))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex("^/text-to-video/.*"))
        .respond_with(ResponseTemplate::new(500).set_body_string("generation error"))
        .mount(&server)
        .await;

    let replicate = ReplicateVideo::new("r8_test").with_api_base(server.uri());
    let pollinations = PollinationsVideo::new().with_video_base(server.uri());
    let cascade = fast_cascade(vec![Box::new(replicate), Box::new(pollinations)]);

    let clip = cascade.generate(&VideoRequest::new("void", 5)).await;

    assert!(clip.is_none());
}

#[tokio::test]
async fn test_pollinations_image_fetch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex("^/prompt/.*"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(png_bytes(), "image/png"))
        .mount(&server)
        .await;

    let provider = PollinationsImage::new().with_image_base(server.uri());
    let fetched = provider
        .fetch_image("celestial tarot card, gold leaf")
        .await
        .unwrap();

    assert!(fetched.url.contains("width=1080&height=1080"));
    assert!(fetched.url.contains("nologo=true"));
    assert_eq!(fetched.bytes, png_bytes());
}
