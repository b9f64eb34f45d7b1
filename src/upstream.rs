//! Plumbing shared by the carbon-intensity and COVID collaborators.

use std::io::Read;

use axum::http::{header, HeaderValue, Method, Request, StatusCode, Uri};
use flate2::read::GzDecoder;
use hyper::body::{self, Body, Bytes};
use hyper::client::HttpConnector;
use hyper::Client;
use hyper_tls::HttpsConnector;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub type HttpsClient = Client<HttpsConnector<HttpConnector>, Body>;

pub fn https_client() -> HttpsClient {
    Client::builder().build::<HttpsConnector<HttpConnector>, Body>(HttpsConnector::new())
}

#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The upstream answered, but not with a success status.
    #[error("upstream responded with {status}")]
    Status { status: StatusCode, payload: Value },

    #[error("invalid upstream uri: {0}")]
    InvalidUri(#[from] axum::http::uri::InvalidUri),

    #[error("failed to build upstream request: {0}")]
    Request(#[from] axum::http::Error),

    #[error("upstream transport error: {0}")]
    Transport(#[from] hyper::Error),

    #[error("failed to decompress upstream body: {0}")]
    Decompress(#[from] std::io::Error),

    #[error("upstream body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

impl UpstreamError {
    /// What the caller gets to see: the upstream's `error` field when it sent one,
    /// otherwise whatever it sent, otherwise our own description.
    pub fn payload(&self) -> Value {
        match self {
            UpstreamError::Status { payload, .. } => payload
                .get("error")
                .cloned()
                .unwrap_or_else(|| payload.clone()),
            other => Value::String(other.to_string()),
        }
    }
}

/// Joins a configured base url and an absolute path, tolerating a trailing slash on the base.
pub(crate) fn join(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

pub(crate) async fn get_json(client: &HttpsClient, uri: Uri) -> Result<Value, UpstreamError> {
    debug!(%uri, "querying upstream");

    let request = Request::builder()
        .uri(uri)
        .method(Method::GET)
        .header(header::ACCEPT, HeaderValue::from_static("application/json"))
        .body(Body::empty())?;

    let resp = client.request(request).await?;
    let status = resp.status();
    let gzipped = resp
        .headers()
        .get(header::CONTENT_ENCODING)
        .map_or(false, |encoding| encoding.as_bytes().eq_ignore_ascii_case(b"gzip"));

    let raw = body::to_bytes(resp.into_body()).await?;
    let bytes = if gzipped { gunzip(&raw)? } else { raw.to_vec() };

    debug!(%status, bytes = bytes.len(), "upstream responded");

    if !status.is_success() {
        let payload = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        return Err(UpstreamError::Status { status, payload });
    }

    // 204s and empty 200s carry nothing to relay
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    Ok(serde_json::from_slice(&bytes)?)
}

fn gunzip(encoded: &Bytes) -> std::io::Result<Vec<u8>> {
    let mut gz = GzDecoder::new(&encoded[..]);
    let mut decoded = vec![];
    gz.read_to_end(&mut decoded)?;
    Ok(decoded)
}
