// SPDX-FileCopyrightText: 2026 reviewdeck contributors
//
// SPDX-License-Identifier: AGPL-3.0-only

//! End-to-end tests for the dashboard router: submissions in, inference
//! calls out, replies (or errors) back. The remote endpoint is a wiremock
//! server.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use reviewdeck::config::Config;
use reviewdeck::server::{AppState, create_router};

// ─── Test helpers ────────────────────────────────────────────────────────────

fn test_router(server_url: &str) -> Router {
    test_router_with(server_url, |c| c)
}

fn test_router_with(server_url: &str, tweak: impl FnOnce(Config) -> Config) -> Router {
    let config = Config {
        base_url: server_url.to_string(),
        api_token: Some("test-token".into()),
        timeout_secs: 5,
        ..Config::default()
    };
    create_router(Arc::new(AppState::new(tweak(config))))
}

fn chat_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "choices": [
            {"message": {"role": "assistant", "content": content}}
        ]
    })
}

async fn post_json(
    router: Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ─── Dashboard page ──────────────────────────────────────────────────────────

#[tokio::test]
async fn dashboard_page_is_served() {
    let server = MockServer::start().await;
    let router = test_router(&server.uri());

    let response = router
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/html"));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let page = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(page.contains("reviewdeck"));
    assert!(page.contains("textarea"));
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let server = MockServer::start().await;
    let router = test_router(&server.uri());

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["model"], "HuggingFaceH4/zephyr-7b-beta");
}

// ─── Local validation (no outbound call) ─────────────────────────────────────

#[tokio::test]
async fn empty_submission_rejected_without_outbound_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("unreachable")))
        .expect(0)
        .mount(&server)
        .await;

    let router = test_router(&server.uri());
    let (status, json) = post_json(
        router,
        "/api/review",
        serde_json::json!({"code": "  \n\t "}),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"]["code"], "validation_error");

    server.verify().await;
}

#[tokio::test]
async fn blank_question_rejected_without_outbound_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("unreachable")))
        .expect(0)
        .mount(&server)
        .await;

    let router = test_router(&server.uri());
    let (status, json) = post_json(
        router,
        "/api/ask",
        serde_json::json!({"code": "fn main() {}", "question": ""}),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"]["code"], "validation_error");

    server.verify().await;
}

#[tokio::test]
async fn oversize_submission_rejected_locally() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("unreachable")))
        .expect(0)
        .mount(&server)
        .await;

    let router = test_router_with(&server.uri(), |c| Config {
        max_code_chars: 16,
        ..c
    });
    let (status, json) = post_json(
        router,
        "/api/review",
        serde_json::json!({"code": "a very long submission that exceeds the bound"}),
    )
    .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(json["error"]["code"], "payload_too_large");

    server.verify().await;
}

// ─── Review round trip ───────────────────────────────────────────────────────

#[tokio::test]
async fn submission_triggers_exactly_one_call_and_returns_reply_verbatim() {
    let server = MockServer::start().await;

    let review_text = "1. Code Readability:\n- looks fine\n";
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("fn main()"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body(review_text)))
        .expect(1)
        .mount(&server)
        .await;

    let router = test_router(&server.uri());
    let (status, json) = post_json(
        router,
        "/api/review",
        serde_json::json!({"code": "fn main() {}"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["review"], review_text);
    assert_eq!(json["model"], "HuggingFaceH4/zephyr-7b-beta");

    server.verify().await;
}

#[tokio::test]
async fn question_round_trip_carries_question() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("why is this slow"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("because of the loop")))
        .expect(1)
        .mount(&server)
        .await;

    let router = test_router(&server.uri());
    let (status, json) = post_json(
        router,
        "/api/ask",
        serde_json::json!({"code": "for i in 0..n {}", "question": "why is this slow?"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["review"], "because of the loop");

    server.verify().await;
}

// ─── Inference failure leaves the server alive ───────────────────────────────

#[tokio::test]
async fn failed_inference_surfaces_error_then_next_submission_succeeds() {
    let server = MockServer::start().await;

    // First call fails, the mock is then exhausted and the fallback succeeds
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("recovered")))
        .mount(&server)
        .await;

    let router = test_router(&server.uri());

    let (status, json) = post_json(
        router.clone(),
        "/api/review",
        serde_json::json!({"code": "fn main() {}"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"]["code"], "inference_error");

    let (status, json) = post_json(
        router,
        "/api/review",
        serde_json::json!({"code": "fn main() {}"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["review"], "recovered");
}
