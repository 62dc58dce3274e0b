//! End-to-end checks of the Gemini client against a local stub server.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::Router;
use image::{DynamicImage, ImageFormat, RgbImage};
use radiograph_core::{Config, InitializationError, Outcome, Radiograph, RadiographError};
use serde_json::Value;
use std::io::Cursor;
use std::sync::{Arc, Mutex};
use std::time::Duration;

struct Recorded {
    method: Method,
    path: String,
    api_key: Option<String>,
    body: Option<Value>,
}

struct Stub {
    status: StatusCode,
    body: String,
    delay: Option<Duration>,
    seen: Mutex<Vec<Recorded>>,
}

impl Stub {
    fn new(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: None,
            seen: Mutex::new(Vec::new()),
        }
    }

    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

async fn handle(
    State(stub): State<Arc<Stub>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    stub.seen.lock().unwrap().push(Recorded {
        method,
        path: uri.path().to_string(),
        api_key: headers
            .get("x-goog-api-key")
            .and_then(|v| v.to_str().ok())
            .map(String::from),
        body: serde_json::from_slice(&body).ok(),
    });
    if let Some(delay) = stub.delay {
        tokio::time::sleep(delay).await;
    }
    (stub.status, stub.body.clone())
}

/// Start the stub and return its `/v1beta` base URL.
async fn spawn(stub: Arc<Stub>) -> String {
    let app = Router::new().fallback(handle).with_state(stub);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/v1beta")
}

fn config(endpoint: &str) -> Config {
    let mut config = Config::default();
    config.gemini.endpoint = endpoint.to_string();
    config.gemini.api_key = "valid-key".to_string();
    config
}

fn jpeg_100() -> Vec<u8> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(RgbImage::new(100, 100))
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)
        .unwrap();
    bytes
}

const FIT_RESPONSE: &str = r#"{
    "candidates": [{
        "content": {"role": "model", "parts": [{"text": "**Preferred Detail**: fit"}]},
        "finishReason": "STOP"
    }],
    "modelVersion": "gemini-2.0-flash"
}"#;

#[tokio::test]
async fn sends_prompt_then_image_and_returns_text() {
    let stub = Arc::new(Stub::new(StatusCode::OK, FIT_RESPONSE));
    let endpoint = spawn(stub.clone()).await;
    let radiograph = Radiograph::new(config(&endpoint)).unwrap();

    let outcome = radiograph
        .diagnose_upload(Some("chest.jpg"), jpeg_100())
        .await
        .unwrap();

    assert_eq!(
        outcome.diagnosis().unwrap().text,
        "**Preferred Detail**: fit"
    );

    let seen = stub.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let request = &seen[0];
    assert_eq!(request.method, Method::POST);
    assert_eq!(
        request.path,
        "/v1beta/models/gemini-2.0-flash:generateContent"
    );
    assert_eq!(request.api_key.as_deref(), Some("valid-key"));

    let body = request.body.as_ref().unwrap();
    let parts = &body["contents"][0]["parts"];
    assert_eq!(parts[0]["text"], radiograph.prompt().as_str());
    assert_eq!(parts[1]["inlineData"]["mimeType"], "image/jpeg");
    assert!(parts[1]["inlineData"]["data"]
        .as_str()
        .unwrap()
        .starts_with("/9j/"));
}

#[tokio::test]
async fn service_error_becomes_failed_outcome() {
    let stub = Arc::new(Stub::new(
        StatusCode::SERVICE_UNAVAILABLE,
        r#"{"error":{"code":503,"message":"The model is overloaded."}}"#,
    ));
    let endpoint = spawn(stub.clone()).await;
    let radiograph = Radiograph::new(config(&endpoint)).unwrap();

    let outcome = radiograph
        .diagnose_upload(Some("chest.jpg"), jpeg_100())
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Failed);
    // No retry
    assert_eq!(stub.seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn malformed_response_becomes_failed_outcome() {
    let stub = Arc::new(Stub::new(StatusCode::OK, "<html>gateway</html>"));
    let endpoint = spawn(stub).await;
    let radiograph = Radiograph::new(config(&endpoint)).unwrap();

    let outcome = radiograph
        .diagnose_upload(Some("chest.jpg"), jpeg_100())
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Failed);
}

#[tokio::test]
async fn configured_timeout_becomes_failed_outcome() {
    let stub = Arc::new(
        Stub::new(StatusCode::OK, FIT_RESPONSE).with_delay(Duration::from_secs(2)),
    );
    let endpoint = spawn(stub).await;
    let mut config = config(&endpoint);
    config.gemini.timeout_ms = Some(100);
    let radiograph = Radiograph::new(config).unwrap();

    let outcome = radiograph
        .diagnose_upload(Some("chest.jpg"), jpeg_100())
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Failed);
}

#[tokio::test]
async fn unreachable_service_becomes_failed_outcome() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let radiograph = Radiograph::new(config(&format!("http://{addr}/v1beta"))).unwrap();

    let outcome = radiograph
        .diagnose_upload(Some("chest.jpg"), jpeg_100())
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Failed);
}

#[tokio::test]
async fn rejected_credential_stops_before_generation() {
    let stub = Arc::new(Stub::new(
        StatusCode::BAD_REQUEST,
        r#"{"error":{"code":400,"message":"API key not valid."}}"#,
    ));
    let endpoint = spawn(stub.clone()).await;
    let mut config = config(&endpoint);
    config.gemini.verify_credential = true;
    let radiograph = Radiograph::new(config).unwrap();

    let err = radiograph
        .diagnose_upload(Some("chest.jpg"), jpeg_100())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RadiographError::Initialization(InitializationError::Rejected { status: 400, .. })
    ));
    let seen = stub.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].method, Method::GET);
    assert_eq!(seen[0].path, "/v1beta/models/gemini-2.0-flash");
}
