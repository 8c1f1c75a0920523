use reqwest::header::HeaderMap;
use reqwest::Client;
use tracing::{debug, trace};

use crate::models::{PrestoError, Result};
use crate::transport::{RawResponse, StatementTransport};

/// Statement transport backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    http_client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse an existing client (connection pool, proxy and TLS settings).
    pub fn with_client(http_client: Client) -> Self {
        Self { http_client }
    }

    /// Helper to turn a response into a `RawResponse` or a transport error.
    async fn handle_response(resp: reqwest::Response) -> Result<RawResponse> {
        let status = resp.status();
        let body = resp.text().await?;

        trace!(status = status.as_u16(), body = %body, "statement response");

        if !status.is_success() {
            debug!(status = status.as_u16(), "non-success status from coordinator");
            return Err(PrestoError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(RawResponse {
            status: status.as_u16(),
            body,
        })
    }
}

impl StatementTransport for HttpTransport {
    async fn post_statement(
        &self,
        uri: &str,
        headers: &HeaderMap,
        body: &str,
    ) -> Result<RawResponse> {
        debug!(uri, "submitting statement");

        let resp = self
            .http_client
            .post(uri)
            .headers(headers.clone())
            .body(body.to_string())
            .send()
            .await?;

        Self::handle_response(resp).await
    }

    async fn get_continuation(&self, uri: &str) -> Result<RawResponse> {
        trace!(uri, "following nextUri");

        // No identity headers here; the URI alone addresses the query.
        let resp = self.http_client.get(uri).send().await?;

        Self::handle_response(resp).await
    }
}
