use log::trace;

use super::{ApiRequest, Method, Transport, TransportError, TransportResponse};

/// Production transport over reqwest. One shared connection pool per client.
#[derive(Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    async fn perform(&self, request: ApiRequest) -> Result<TransportResponse, TransportError> {
        trace!("{} {}", request.method.as_str(), request.url);

        let mut builder = match request.method {
            Method::Get => self.http.get(&request.url),
            Method::Post => self.http.post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|err| TransportError::Network {
            message: err.to_string(),
        })?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|err| TransportError::Network {
            message: err.to_string(),
        })?;

        Ok(TransportResponse { status, body })
    }
}
