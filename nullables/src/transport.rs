//! Nullable transport: a scripted node that records every request.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use mochimo_rpc::{RpcError, Transport, TransportResponse};

/// A request the node "received".
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedRequest {
    pub path: String,
    pub body: serde_json::Value,
}

#[derive(Clone)]
enum Reply {
    Response(TransportResponse),
    Fail(String),
}

#[derive(Default)]
struct Route {
    /// Replies consumed one per request, in order.
    queued: VecDeque<Reply>,
    /// Reply used once the queue is empty.
    fallback: Option<Reply>,
}

/// A test transport that answers from a per-path script.
///
/// Requests to a path with nothing scripted fail as transport errors.
pub struct NullTransport {
    routes: Mutex<HashMap<String, Route>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl NullTransport {
    /// Base URL to give a client backed by this transport.
    pub const BASE_URL: &'static str = "http://null.node";

    pub fn new() -> Self {
        Self {
            routes: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a 200 response for the next request to `path`.
    pub fn respond(&self, path: &str, body: serde_json::Value) -> &Self {
        self.respond_with_status(path, 200, body)
    }

    /// Queue a response with an explicit status for the next request to `path`.
    pub fn respond_with_status(&self, path: &str, status: u16, body: serde_json::Value) -> &Self {
        self.queue(path, Reply::Response(TransportResponse { status, body }))
    }

    /// Queue a node error envelope for the next request to `path`.
    pub fn respond_error(&self, path: &str, code: i64, message: &str) -> &Self {
        self.respond_with_status(
            path,
            500,
            serde_json::json!({ "code": code, "message": message, "retriable": false }),
        )
    }

    /// Queue a transport failure for the next request to `path`.
    pub fn fail(&self, path: &str, message: &str) -> &Self {
        self.queue(path, Reply::Fail(message.to_string()))
    }

    /// Answer every otherwise unscripted request to `path` with `body`.
    pub fn always(&self, path: &str, body: serde_json::Value) -> &Self {
        self.routes
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .fallback = Some(Reply::Response(TransportResponse::ok(body)));
        self
    }

    /// Answer every otherwise unscripted request to `path` with an error envelope.
    pub fn always_error(&self, path: &str, code: i64, message: &str) -> &Self {
        self.routes
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .fallback = Some(Reply::Response(TransportResponse {
            status: 500,
            body: serde_json::json!({ "code": code, "message": message, "retriable": true }),
        }));
        self
    }

    /// All requests received so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Paths of all requests received so far, in order.
    pub fn paths(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.path.clone())
            .collect()
    }

    /// Bodies of the requests sent to `path`, in order.
    pub fn bodies_for(&self, path: &str) -> Vec<serde_json::Value> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.path == path)
            .map(|r| r.body.clone())
            .collect()
    }

    fn queue(&self, path: &str, reply: Reply) -> &Self {
        self.routes
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .queued
            .push_back(reply);
        self
    }

    fn next_reply(&self, path: &str) -> Option<Reply> {
        let mut routes = self.routes.lock().unwrap();
        let route = routes.get_mut(path)?;
        route.queued.pop_front().or_else(|| route.fallback.clone())
    }
}

impl Default for NullTransport {
    fn default() -> Self {
        Self::new()
    }
}

/// Path component of `url` (`http://host:port/a/b` → `/a/b`).
fn path_of(url: &str) -> &str {
    let rest = url.split_once("://").map(|(_, r)| r).unwrap_or(url);
    rest.find('/').map(|i| &rest[i..]).unwrap_or("/")
}

#[async_trait]
impl Transport for NullTransport {
    async fn post(&self, url: &str, body: &serde_json::Value) -> Result<TransportResponse, RpcError> {
        let path = path_of(url).to_string();
        self.requests.lock().unwrap().push(RecordedRequest {
            path: path.clone(),
            body: body.clone(),
        });

        match self.next_reply(&path) {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Fail(message)) => Err(RpcError::Transport {
                url: url.to_string(),
                message,
            }),
            None => Err(RpcError::Transport {
                url: url.to_string(),
                message: format!("no response scripted for {path}"),
            }),
        }
    }
}
