use std::future::Future;

use reqwest::header::HeaderMap;

use crate::models::Result;

/// Raw response of one protocol round. Only the body is decoded by the processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }
}

/// The two HTTP operations the statement protocol needs.
///
/// Returned futures are `Send` so a processor can be driven from a spawned task.
pub trait StatementTransport {
    /// POST {host}/v1/statement
    /// Submit the raw SQL text with the identity headers.
    fn post_statement(
        &self,
        uri: &str,
        headers: &HeaderMap,
        body: &str,
    ) -> impl Future<Output = Result<RawResponse>> + Send;

    /// GET {nextUri}
    /// Fetch the next round. The URI is used exactly as the server sent it.
    fn get_continuation(&self, uri: &str) -> impl Future<Output = Result<RawResponse>> + Send;
}
