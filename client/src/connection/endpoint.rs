/// Hostnames treated as a local development environment, where the API is
/// reachable same-origin.
const LOCAL_HOSTS: [&str; 2] = ["localhost", "127.0.0.1"];

/// Decides the physical origin for each call. When the page host is a
/// recognized local development host, calls stay on the local origin;
/// otherwise they go straight to the fixed remote origin, bypassing the
/// hosting proxy whose hard timeout kills long-running model turns. The
/// decision is made per call, never cached.
#[derive(Clone)]
pub(crate) struct EndpointResolver {
    page_host: String,
    local_origin: String,
    remote_origin: String,
}

impl EndpointResolver {
    pub fn new(page_host: &str, local_origin: &str, remote_origin: &str) -> Self {
        Self {
            page_host: page_host.to_string(),
            local_origin: local_origin.trim_end_matches('/').to_string(),
            remote_origin: remote_origin.trim_end_matches('/').to_string(),
        }
    }

    fn is_local(&self) -> bool {
        LOCAL_HOSTS.iter().any(|host| self.page_host == *host)
    }

    /// Absolute URL for an endpoint path such as `/api/move`.
    pub fn resolve(&self, endpoint: &str) -> String {
        let origin = if self.is_local() {
            &self.local_origin
        } else {
            &self.remote_origin
        };
        let path = endpoint.strip_prefix('/').unwrap_or(endpoint);
        format!("{origin}/{path}")
    }
}
