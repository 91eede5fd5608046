//! The seam between the API client and the physical HTTP stack. The retry
//! policy, session header and cache-busting all live above this boundary, so
//! tests can drive them through a scripted transport.

mod http;

pub use http::HttpTransport;

use std::future::Future;

use thiserror::Error;

/// HTTP method of a Game API call. The API uses nothing beyond these two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// One fully-resolved outbound request: absolute URL, headers attached,
/// cache-busting already applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

/// The raw result of one attempt: whatever status the server answered with,
/// plus the body text. Status interpretation belongs to the API client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Network-level failure of a single attempt: the request never produced an
/// HTTP response at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("network error: {message}")]
    Network { message: String },
}

/// Performs one request attempt. Implementations do not retry and do not
/// interpret statuses; every received HTTP response is an `Ok`.
pub trait Transport: Send + Sync {
    fn perform(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send;
}
