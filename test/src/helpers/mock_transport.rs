use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex},
};

use shogi_client::transport::{ApiRequest, Transport, TransportError, TransportResponse};

/// One scripted reply for an endpoint.
#[derive(Clone, Debug)]
pub enum Scripted {
    Response { status: u16, body: String },
    NetworkError(String),
}

impl Scripted {
    pub fn ok(body: impl Into<String>) -> Self {
        Scripted::Response {
            status: 200,
            body: body.into(),
        }
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Scripted::Response {
            status,
            body: body.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Scripted::NetworkError(message.into())
    }
}

#[derive(Default)]
struct Inner {
    queues: HashMap<String, VecDeque<Scripted>>,
    defaults: HashMap<String, Scripted>,
    requests: Vec<ApiRequest>,
}

/// Transport whose replies are scripted per endpoint path, recording every
/// request performed through it. Clones share the same script and record,
/// so a test keeps one handle while the client owns another.
#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<Inner>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a one-shot reply for an endpoint path; queued replies are
    /// consumed in order before the path's default applies.
    pub fn enqueue(&self, path: &str, reply: Scripted) {
        let mut inner = self.inner.lock().unwrap();
        inner
            .queues
            .entry(path.to_string())
            .or_default()
            .push_back(reply);
    }

    /// Sets the reply used whenever an endpoint path's queue is empty.
    pub fn set_default(&self, path: &str, reply: Scripted) {
        let mut inner = self.inner.lock().unwrap();
        inner.defaults.insert(path.to_string(), reply);
    }

    /// Every request performed so far, in order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|request| path_of(&request.url) == path)
            .collect()
    }

    pub fn calls_to(&self, path: &str) -> usize {
        self.requests_to(path).len()
    }
}

impl Transport for MockTransport {
    async fn perform(&self, request: ApiRequest) -> Result<TransportResponse, TransportError> {
        let path = path_of(&request.url);
        let reply = {
            let mut inner = self.inner.lock().unwrap();
            inner.requests.push(request.clone());
            let queued = inner
                .queues
                .get_mut(&path)
                .and_then(|queue| queue.pop_front());
            queued.or_else(|| inner.defaults.get(&path).cloned())
        };

        match reply {
            Some(Scripted::Response { status, body }) => Ok(TransportResponse { status, body }),
            Some(Scripted::NetworkError(message)) => Err(TransportError::Network { message }),
            None => Err(TransportError::Network {
                message: format!("no scripted reply for {path}"),
            }),
        }
    }
}

/// The path component of a URL, without origin or query.
pub fn path_of(url: &str) -> String {
    let rest = match url.split_once("://") {
        Some((_, rest)) => rest,
        None => url,
    };
    let path = match rest.find('/') {
        Some(index) => &rest[index..],
        None => "/",
    };
    match path.split_once('?') {
        Some((bare, _)) => bare.to_string(),
        None => path.to_string(),
    }
}
