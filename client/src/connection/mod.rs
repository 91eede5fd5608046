//! Outbound call plumbing: endpoint resolution, the session header, cache
//! busting, and the retry policy.

mod api_client;
mod endpoint;
mod timestamp;

pub use api_client::{ApiClient, RetryConfig, SESSION_HEADER};
pub(crate) use endpoint::EndpointResolver;
pub(crate) use timestamp::Timestamp;
