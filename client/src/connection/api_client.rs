use std::time::Duration;

use log::warn;
use serde::{de::DeserializeOwned, Serialize};
use tokio::time::sleep;

use crate::{
    error::{ApiError, ERROR_BODY_LIMIT},
    session::SessionId,
    transport::{ApiRequest, Method, Transport},
};

use super::{EndpointResolver, Timestamp};

/// Header identifying the client session on every request.
pub const SESSION_HEADER: &str = "X-Session-ID";

/// Retry policy for Game API calls.
#[derive(Clone)]
pub struct RetryConfig {
    /// Total attempts for one call, including the first.
    pub max_attempts: u32,
    /// Unit delay of the linear backoff; the wait before attempt n+1 is
    /// n times this.
    pub backoff_unit: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_unit: Duration::from_millis(250),
        }
    }
}

/// Wraps a transport with everything a Game API call needs: endpoint
/// resolution, the session header, cache busting on GETs, and the retry
/// policy. Transient failures (network errors, 5xx) are retried with linear
/// backoff; 4xx failures surface immediately.
pub struct ApiClient<T> {
    transport: T,
    resolver: EndpointResolver,
    session_id: SessionId,
    retry: RetryConfig,
}

impl<T: Transport> ApiClient<T> {
    pub(crate) fn new(
        transport: T,
        resolver: EndpointResolver,
        session_id: SessionId,
        retry: RetryConfig,
    ) -> Self {
        Self {
            transport,
            resolver,
            session_id,
            retry,
        }
    }

    /// GET an endpoint and decode its JSON body.
    pub async fn get_json<R: DeserializeOwned>(&self, endpoint: &str) -> Result<R, ApiError> {
        let text = self.request(Method::Get, endpoint, None).await?;
        serde_json::from_str(&text).map_err(ApiError::malformed)
    }

    /// POST a JSON payload to an endpoint and decode the JSON body of the
    /// response.
    pub async fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        let value = serde_json::to_value(body).map_err(ApiError::malformed)?;
        let text = self.request(Method::Post, endpoint, Some(value)).await?;
        serde_json::from_str(&text).map_err(ApiError::malformed)
    }

    async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<serde_json::Value>,
    ) -> Result<String, ApiError> {
        let mut url = self.resolver.resolve(endpoint);
        if method == Method::Get {
            // Timestamp parameter defeats intermediary caches.
            let separator = if url.contains('?') { '&' } else { '?' };
            url.push(separator);
            url.push_str("t=");
            url.push_str(&Timestamp::now_millis().to_string());
        }

        let mut headers = vec![(
            SESSION_HEADER.to_string(),
            self.session_id.as_str().to_string(),
        )];
        if body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }

        let request = ApiRequest {
            method,
            url,
            headers,
            body,
        };

        let mut last_failure = None;
        for attempt in 1..=self.retry.max_attempts {
            if attempt > 1 {
                sleep(self.retry.backoff_unit * (attempt - 1)).await;
            }

            let failure = match self.transport.perform(request.clone()).await {
                Ok(response) if (200..300).contains(&response.status) => {
                    return Ok(response.body);
                }
                Ok(response) => ApiError::Status {
                    status: response.status,
                    body: truncate_body(&response.body),
                },
                Err(err) => ApiError::Network(err),
            };

            if !failure.is_transient() {
                return Err(failure);
            }
            warn!(
                "{} {} attempt {}/{} failed: {}",
                method.as_str(),
                endpoint,
                attempt,
                self.retry.max_attempts,
                failure
            );
            last_failure = Some(failure);
        }

        Err(last_failure.unwrap_or_else(|| ApiError::Malformed {
            detail: "retry policy allowed no attempts".to_string(),
        }))
    }
}

/// Truncation mirrors what callers can usefully display; bodies can be
/// arbitrarily large HTML error pages.
fn truncate_body(body: &str) -> String {
    match body.char_indices().nth(ERROR_BODY_LIMIT) {
        Some((index, _)) => body[..index].to_string(),
        None => body.to_string(),
    }
}
