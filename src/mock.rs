//! Scripted transport for testing.
//!
//! Replays canned response bodies in order and records every request, so the
//! processor can be exercised without a coordinator.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use reqwest::header::HeaderMap;
use serde_json::Value;
use tokio::time::Instant;

use crate::models::{PrestoError, Result};
use crate::transport::{RawResponse, StatementTransport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Post,
    Get,
}

/// A request as seen by the transport.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub uri: String,
    pub headers: HeaderMap,
    pub body: Option<String>,
    pub at: Instant,
}

#[derive(Debug, Clone)]
enum Scripted {
    Body(String),
    Status(u16, String),
}

/// Transport that answers each request with the next scripted response.
///
/// Clones share the same script and request log.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport {
    responses: Arc<Mutex<VecDeque<Scripted>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a JSON envelope.
    pub fn with_body(self, body: Value) -> Self {
        self.push(Scripted::Body(body.to_string()))
    }

    /// Queue a body verbatim, e.g. something that is not JSON at all.
    pub fn with_raw(self, body: impl Into<String>) -> Self {
        self.push(Scripted::Body(body.into()))
    }

    /// Queue a non-success HTTP status.
    pub fn with_error(self, status: u16, body: impl Into<String>) -> Self {
        self.push(Scripted::Status(status, body.into()))
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    pub fn remaining(&self) -> usize {
        lock(&self.responses).len()
    }

    fn push(self, scripted: Scripted) -> Self {
        lock(&self.responses).push_back(scripted);
        self
    }

    fn respond(&self, request: RecordedRequest) -> Result<RawResponse> {
        let uri = request.uri.clone();
        lock(&self.requests).push(request);

        match lock(&self.responses).pop_front() {
            Some(Scripted::Body(body)) => Ok(RawResponse::ok(body)),
            Some(Scripted::Status(status, body)) => Err(PrestoError::HttpStatus { status, body }),
            None => Err(PrestoError::HttpStatus {
                status: 404,
                body: format!("no scripted response left for {uri}"),
            }),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl StatementTransport for ScriptedTransport {
    async fn post_statement(
        &self,
        uri: &str,
        headers: &HeaderMap,
        body: &str,
    ) -> Result<RawResponse> {
        self.respond(RecordedRequest {
            method: Method::Post,
            uri: uri.to_string(),
            headers: headers.clone(),
            body: Some(body.to_string()),
            at: Instant::now(),
        })
    }

    async fn get_continuation(&self, uri: &str) -> Result<RawResponse> {
        self.respond(RecordedRequest {
            method: Method::Get,
            uri: uri.to_string(),
            headers: HeaderMap::new(),
            body: None,
            at: Instant::now(),
        })
    }
}
