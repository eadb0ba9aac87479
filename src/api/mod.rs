//! Recipe API module
//!
//! `handle_request` adapts a hyper request to the synchronous
//! [`Dispatcher`]: it reads the body under the configured size limit,
//! dispatches, stamps common headers and writes the access log.

mod dispatcher;
mod handlers;

pub use dispatcher::{error_to_response, Dispatcher};

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::{CONTENT_LENGTH, USER_AGENT};
use hyper::{Request, Version};

use crate::config::AppState;
use crate::error::ApiError;
use crate::http::{self, HttpResponse};
use crate::logger::{self, AccessLogEntry};

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<HttpResponse, Infallible>
where
    B: Body<Data = Bytes> + Send,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let started = Instant::now();
    let (parts, body) = req.into_parts();
    let max_body_size = state.config.http.max_body_size;

    let mut response = match read_body(&parts, body, max_body_size).await {
        Ok(bytes) => state
            .dispatcher
            .dispatch(&parts.method, parts.uri.path(), &bytes),
        Err(ApiError::PayloadTooLarge(limit)) => {
            logger::log_warning(&format!(
                "Request body too large for {} {} (max: {limit})",
                parts.method,
                parts.uri.path()
            ));
            http::build_413_response(limit)
        }
        Err(err) => error_to_response(&err),
    };
    http::apply_common_headers(&mut response, &state.config.http);

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            parts.method.to_string(),
            parts.uri.path().to_string(),
        );
        entry.query = parts.uri.query().map(ToString::to_string);
        entry.http_version = version_label(parts.version).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = usize::try_from(response.body().size_hint().lower()).unwrap_or(usize::MAX);
        entry.user_agent = parts
            .headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Collect the request body, refusing anything over `max_body_size`
///
/// A declared `Content-Length` over the limit is rejected before reading.
async fn read_body<B>(
    parts: &hyper::http::request::Parts,
    body: B,
    max_body_size: u64,
) -> Result<Bytes, ApiError>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let declared = parts
        .headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());
    if declared.is_some_and(|size| size > max_body_size) {
        return Err(ApiError::PayloadTooLarge(max_body_size));
    }

    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            Err(ApiError::PayloadTooLarge(max_body_size))
        }
        Err(e) => Err(ApiError::BodyRead(e.to_string())),
    }
}

const fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::store::{MemStore, RecipeStore};
    use http_body_util::Full;
    use hyper::{Method, StatusCode};

    fn state_with(config: Config) -> (Arc<AppState>, Arc<MemStore>) {
        let store = Arc::new(MemStore::new());
        let state = AppState::new(config, store.clone()).unwrap();
        (Arc::new(state), store)
    }

    fn request(method: Method, uri: &str, body: &'static str) -> Request<Full<Bytes>> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Full::new(Bytes::from_static(body.as_bytes())))
            .unwrap()
    }

    fn peer() -> SocketAddr {
        "127.0.0.1:40000".parse().unwrap()
    }

    #[tokio::test]
    async fn test_request_round_trip_through_hyper_types() {
        let (state, store) = state_with(Config::default());

        let req = request(Method::POST, "/receitas", r#"{"name":"Bolo de Milho"}"#);
        let response = handle_request(req, Arc::clone(&state), peer()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["server"], "receitas-server");
        assert!(store.get("bolo-de-milho").is_ok());
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let mut config = Config::default();
        config.http.max_body_size = 8;
        let (state, store) = state_with(config);

        let req = request(Method::POST, "/receitas", r#"{"name":"Bolo de Milho"}"#);
        let response = handle_request(req, state, peer()).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(store.len().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_declared_content_length_over_limit() {
        let mut config = Config::default();
        config.http.max_body_size = 8;
        let (state, _) = state_with(config);

        let mut req = request(Method::PUT, "/receitas/bolo", "{}");
        req.headers_mut()
            .insert(CONTENT_LENGTH, hyper::header::HeaderValue::from_static("4096"));
        let response = handle_request(req, state, peer()).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_cors_header_when_enabled() {
        let mut config = Config::default();
        config.http.enable_cors = true;
        let (state, _) = state_with(config);

        let response = handle_request(request(Method::GET, "/receitas", ""), state, peer())
            .await
            .unwrap();
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }
}
