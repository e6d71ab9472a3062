//! Verify request building and status classification against JSON test
//! vectors stored in `test-vectors/`.
//!
//! Bodies are compared as parsed JSON values; URLs are compared verbatim
//! because parameter order on the wire is part of the contract.

use std::sync::{Arc, Mutex};

use serde_json::Value;
use upmind_sdk::{
    Api, ApiError, BodyParams, Config, ErrorKind, HttpMethod, HttpRequest, HttpResponse,
    HttpTransport, QueryParams, TransportError,
};

/// Captures the last request and replies with a fixed status.
struct Capture {
    last: Mutex<Option<HttpRequest>>,
    status: u16,
}

impl Capture {
    fn new(status: u16) -> Arc<Self> {
        Arc::new(Self {
            last: Mutex::new(None),
            status,
        })
    }
}

impl HttpTransport for Capture {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        *self.last.lock().unwrap() = Some(request);
        Ok(HttpResponse {
            status: self.status,
            headers: Vec::new(),
            body: String::new(),
        })
    }
}

fn object(value: &Value) -> serde_json::Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

fn parse_kind(s: Option<&str>) -> Option<ErrorKind> {
    match s {
        None => None,
        Some("auth") => Some(ErrorKind::Auth),
        Some("validation") => Some(ErrorKind::Validation),
        Some("client") => Some(ErrorKind::Client),
        Some("server") => Some(ErrorKind::Server),
        Some("http") => Some(ErrorKind::Http),
        Some(other) => panic!("unknown kind: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();
    let hostname = vectors["hostname"].as_str().unwrap();
    let token = vectors["token"].as_str().unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();

        let mut config = Config::new(hostname, token)
            .with_without_notifications(case["without_notifications"].as_bool().unwrap_or(false));
        if let Some(brand_id) = case["brand_id"].as_str() {
            config = config.with_brand_id(brand_id);
        }

        let capture = Capture::new(200);
        let api = Api::new(config, capture.clone());

        let method: HttpMethod = case["method"].as_str().unwrap().parse().unwrap();
        let body = case.get("body").map(|b| BodyParams::from(object(b)));
        let query = case.get("query").map(|q| QueryParams::from(object(q)));

        api.send_request(method, case["uri"].as_str().unwrap(), body, query)
            .unwrap();

        let request = capture.last.lock().unwrap().take().unwrap();
        assert_eq!(request.method, method, "{name}: method");
        assert_eq!(request.url, case["expected_url"].as_str().unwrap(), "{name}: url");
        assert_eq!(
            request.header("Authorization"),
            Some(format!("Bearer {token}").as_str()),
            "{name}: auth"
        );

        match &case["expected_body"] {
            Value::Null => assert!(request.body.is_none(), "{name}: body should be empty"),
            expected => {
                let sent: Value = serde_json::from_str(request.body_str().unwrap()).unwrap();
                assert_eq!(&sent, expected, "{name}: body");
                assert_eq!(
                    request.header("Content-Type"),
                    Some("application/json"),
                    "{name}: content type"
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Statuses
// ---------------------------------------------------------------------------

#[test]
fn status_test_vectors() {
    let raw = include_str!("../../test-vectors/statuses.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let status = case["status"].as_u64().unwrap() as u16;
        let expected = parse_kind(case["kind"].as_str());

        assert_eq!(ErrorKind::from_status(status), expected, "status {status}");

        let api = Api::new(
            Config::new("h", "t").with_restful_exceptions(true),
            Capture::new(status),
        );
        match api.get("x", None) {
            Ok(response) => {
                assert!(expected.is_none(), "status {status}: expected an error");
                assert_eq!(response.status(), status);
            }
            Err(err) => {
                assert_eq!(err.kind(), expected, "status {status}: kind");
                assert_eq!(err.status(), Some(status));
                assert!(!matches!(err, ApiError::Connection(_)));
            }
        }
    }
}
