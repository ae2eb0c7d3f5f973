//! Integration tests for the verification API.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use otp_auth_server::{
    api::{create_router, AppState},
    DeliveryError, MessageSender, OtpService, OtpStore, SessionStore,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

/// Sender stub that records messages instead of delivering them.
#[derive(Default)]
struct StubSender {
    sent: Mutex<Vec<(String, String)>>,
    fail: bool,
}

#[async_trait]
impl MessageSender for StubSender {
    async fn send(&self, to: &str, _from: &str, body: &str) -> Result<(), DeliveryError> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), body.to_string()));
        if self.fail {
            Err(DeliveryError::Provider("stub failure".into()))
        } else {
            Ok(())
        }
    }
}

struct TestApp {
    router: Router,
    state: AppState,
    sender: Arc<StubSender>,
}

fn create_test_app(fail: bool) -> TestApp {
    let sender = Arc::new(StubSender {
        fail,
        ..Default::default()
    });
    let service = OtpService::new(
        Arc::new(OtpStore::new()),
        Arc::new(SessionStore::new()),
        sender.clone(),
        "+15550000000",
        Duration::from_secs(5),
    );
    let state = AppState::new(service);
    TestApp {
        router: create_router(state.clone()),
        state,
        sender,
    }
}

fn json_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app(false);

    let (status, json) = send(&app.router, get_request("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["pendingCodes"], 0);
    assert_eq!(json["verifiedSessions"], 0);
}

#[tokio::test]
async fn test_full_verification_flow() {
    let app = create_test_app(false);

    let (status, json) = send(
        &app.router,
        json_request("/api/send-otp", r#"{"phoneNumber":"+15550001111"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "OTP sent successfully");

    let code = app.state.service.otp_store().get("+15550001111").unwrap();
    {
        let sent = app.sender.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "+15550001111");
        assert!(sent[0].1.ends_with(&code));
    }

    let (_, json) = send(
        &app.router,
        get_request("/api/check-auth?phoneNumber=%2B15550001111"),
    )
    .await;
    assert_eq!(json["isAuthenticated"], false);

    let body = format!(r#"{{"phoneNumber":"+15550001111","otp":"{}"}}"#, code);
    let (status, json) = send(&app.router, json_request("/api/verify-otp", &body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "OTP verified successfully");

    let (status, json) = send(
        &app.router,
        get_request("/api/check-auth?phoneNumber=%2B15550001111"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["isAuthenticated"], true);

    // The code is consumed
    let (status, json) = send(&app.router, json_request("/api/verify-otp", &body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "No OTP found for this phone number");
}

#[tokio::test]
async fn test_verify_without_send() {
    let app = create_test_app(false);

    let (status, json) = send(
        &app.router,
        json_request(
            "/api/verify-otp",
            r#"{"phoneNumber":"+15550009999","otp":"000000"}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "No OTP found for this phone number");
    assert_eq!(json["code"], "OTP_NOT_FOUND");
}

#[tokio::test]
async fn test_verify_wrong_code() {
    let app = create_test_app(false);
    app.state.service.otp_store().set("+15550001111", "482913");

    let (status, json) = send(
        &app.router,
        json_request(
            "/api/verify-otp",
            r#"{"phoneNumber":"+15550001111","otp":"482914"}"#,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid OTP");
    assert!(!app.state.service.check_auth("+15550001111"));
    assert!(app.state.service.otp_store().get("+15550001111").is_some());
}

#[tokio::test]
async fn test_delivery_failure() {
    let app = create_test_app(true);

    let (status, json) = send(
        &app.router,
        json_request("/api/send-otp", r#"{"phoneNumber":"+15550001111"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Failed to send OTP");
    // Code stays stored even though it was never delivered
    assert!(app.state.service.otp_store().get("+15550001111").is_some());
}

#[tokio::test]
async fn test_malformed_bodies() {
    let app = create_test_app(false);

    let cases = [
        ("/api/send-otp", "not json", "Invalid request format"),
        ("/api/send-otp", r#"{"phoneNumber":12345}"#, "Invalid request format"),
        ("/api/send-otp", r#"{}"#, "Phone number is required"),
        ("/api/send-otp", r#"{"phoneNumber":""}"#, "Phone number is required"),
        ("/api/verify-otp", r#"{"phoneNumber":"+15550001111"}"#, "OTP is required"),
        ("/api/verify-otp", r#"{"otp":"123456"}"#, "Phone number is required"),
        (
            "/api/verify-otp",
            r#"{"phoneNumber":"+15550001111","otp":""}"#,
            "OTP is required",
        ),
    ];

    for (uri, body, expected) in cases {
        let (status, json) = send(&app.router, json_request(uri, body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{} {}", uri, body);
        assert_eq!(json["error"], expected, "{} {}", uri, body);
    }

    // Nothing reached the stores or the sender
    assert!(app.state.service.otp_store().is_empty());
    assert!(app.sender.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_content_type() {
    let app = create_test_app(false);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/send-otp")
        .body(Body::from(r#"{"phoneNumber":"+15550001111"}"#))
        .unwrap();
    let (status, json) = send(&app.router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid request format");
}

#[tokio::test]
async fn test_check_auth_missing_parameter() {
    let app = create_test_app(false);

    for uri in ["/api/check-auth", "/api/check-auth?phoneNumber="] {
        let (status, json) = send(&app.router, get_request(uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Phone number is required");
    }
}

#[tokio::test]
async fn test_check_auth_repeated_parameter_uses_first() {
    let app = create_test_app(false);
    app.state.service.session_store().create("+15550001111");

    let (status, json) = send(
        &app.router,
        get_request("/api/check-auth?phoneNumber=%2B15550001111&phoneNumber=%2B15550001111"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["isAuthenticated"], true);

    let (status, json) = send(
        &app.router,
        get_request("/api/check-auth?phoneNumber=%2B15550001111&phoneNumber=%2B15550009999"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["isAuthenticated"], true);

    let (status, json) = send(
        &app.router,
        get_request("/api/check-auth?phoneNumber=%2B15550009999&phoneNumber=%2B15550001111"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["isAuthenticated"], false);
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = create_test_app(false);

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/send-otp")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    let headers = response.headers();

    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:5173"
    );
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    assert_eq!(headers[header::ACCESS_CONTROL_MAX_AGE], "43200");
}

#[tokio::test]
async fn test_cors_rejects_unknown_origin() {
    let app = create_test_app(false);

    let request = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "http://evil.test")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}
