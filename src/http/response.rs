//! HTTP response building module
//!
//! Builders for the JSON and plain-text responses the API produces,
//! decoupled from routing and store logic.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{
    HeaderName, HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE, ALLOW, CONTENT_TYPE, SERVER,
};
use hyper::{Method, Response, StatusCode};
use serde::Serialize;

use crate::config::HttpConfig;

pub type HttpResponse = Response<Full<Bytes>>;

const JSON: &str = "application/json";
const TEXT: &str = "text/plain; charset=utf-8";

/// Serialize `body` as JSON with the given status
pub fn json_response<T: Serialize + ?Sized>(status: StatusCode, body: &T) -> HttpResponse {
    match serde_json::to_vec(body) {
        Ok(json) => build(status, JSON, Bytes::from(json)),
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            build(
                StatusCode::INTERNAL_SERVER_ERROR,
                JSON,
                Bytes::from_static(br#"{"error":"Internal server error"}"#),
            )
        }
    }
}

/// `{"error": message}` with the given status
pub fn error_response(status: StatusCode, message: &str) -> HttpResponse {
    json_response(status, &serde_json::json!({ "error": message }))
}

/// `200 {"status":"success"}`
pub fn build_success_response() -> HttpResponse {
    json_response(StatusCode::OK, &serde_json::json!({ "status": "success" }))
}

/// `200 {"status":"ok"}` for health probes
pub fn build_health_response() -> HttpResponse {
    json_response(StatusCode::OK, &serde_json::json!({ "status": "ok" }))
}

pub fn build_text_response(status: StatusCode, text: &'static str) -> HttpResponse {
    build(status, TEXT, Bytes::from_static(text.as_bytes()))
}

/// Build 404 Not Found response
pub fn build_404_response() -> HttpResponse {
    error_response(StatusCode::NOT_FOUND, "Not Found")
}

/// Build 405 Method Not Allowed response
pub fn build_405_response(allow: &[Method]) -> HttpResponse {
    let mut response = error_response(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed");
    set_header(&mut response, ALLOW, &allow_header(allow));
    response
}

/// Build 413 Payload Too Large response
pub fn build_413_response(max_body_size: u64) -> HttpResponse {
    error_response(
        StatusCode::PAYLOAD_TOO_LARGE,
        &format!("request body exceeds {max_body_size} bytes"),
    )
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response(allow: &[Method], enable_cors: bool) -> HttpResponse {
    let allow = allow_header(allow);
    let mut response = build(StatusCode::NO_CONTENT, TEXT, Bytes::new());
    set_header(&mut response, ALLOW, &allow);

    if enable_cors {
        let headers = response.headers_mut();
        headers.insert(ACCESS_CONTROL_ALLOW_METHODS, header_value(&allow));
        headers.insert(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        );
        headers.insert(ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static("86400"));
    }
    response
}

/// Attach headers every response carries
pub fn apply_common_headers(response: &mut HttpResponse, http_config: &HttpConfig) {
    set_header(response, SERVER, &http_config.server_name);
    if http_config.enable_cors {
        response
            .headers_mut()
            .insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    }
}

fn build(status: StatusCode, content_type: &'static str, body: Bytes) -> HttpResponse {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, content_type)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(status, &e);
            Response::new(Full::new(Bytes::new()))
        })
}

fn allow_header(allow: &[Method]) -> String {
    allow
        .iter()
        .map(Method::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn set_header(response: &mut HttpResponse, name: HeaderName, value: &str) {
    response.headers_mut().insert(name, header_value(value));
}

fn header_value(value: &str) -> HeaderValue {
    HeaderValue::from_str(value).unwrap_or_else(|e| {
        crate::logger::log_warning(&format!("Invalid header value '{value}': {e}"));
        HeaderValue::from_static("")
    })
}

/// Log response build error
fn log_build_error(status: StatusCode, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_string(response: HttpResponse) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_error_response_shape() {
        let response = error_response(StatusCode::BAD_REQUEST, "bad \"json\"");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()[CONTENT_TYPE], JSON);
        assert_eq!(body_string(response).await, r#"{"error":"bad \"json\""}"#);
    }

    #[tokio::test]
    async fn test_success_response() {
        let response = build_success_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, r#"{"status":"success"}"#);
    }

    #[test]
    fn test_405_carries_allow_header() {
        let response = build_405_response(&[Method::GET, Method::PUT]);
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[ALLOW], "GET, PUT");
    }

    #[test]
    fn test_options_with_cors() {
        let response = build_options_response(&[Method::GET, Method::OPTIONS], true);
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(response.headers()[ALLOW], "GET, OPTIONS");
        assert_eq!(
            response.headers()[ACCESS_CONTROL_ALLOW_METHODS],
            "GET, OPTIONS"
        );

        let response = build_options_response(&[Method::GET], false);
        assert!(!response.headers().contains_key(ACCESS_CONTROL_ALLOW_METHODS));
    }

    #[test]
    fn test_common_headers() {
        let http_config = HttpConfig {
            server_name: "receitas-test".to_string(),
            enable_cors: true,
            max_body_size: 16,
        };
        let mut response = build_404_response();
        apply_common_headers(&mut response, &http_config);
        assert_eq!(response.headers()[SERVER], "receitas-test");
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
}
