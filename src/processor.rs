use std::time::Duration;

use tracing::{debug, trace};

use crate::collector::{Collector, ResultSet};
use crate::connection::Connection;
use crate::http::HttpTransport;
use crate::models::*;
use crate::transport::{RawResponse, StatementTransport};

/// Pause before each `nextUri` request.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Drives one statement through the protocol: submit, then follow `nextUri`
/// until the engine stops handing one out.
///
/// Holds no per-query state, so one processor may run several `execute`
/// calls at once, each with its own collector.
#[derive(Debug, Clone)]
pub struct Processor<T = HttpTransport> {
    connection: Connection,
    transport: T,
    poll_interval: Duration,
    max_polls: Option<usize>,
}

impl Processor<HttpTransport> {
    pub fn new(connection: Connection) -> Self {
        Self::with_transport(connection, HttpTransport::new())
    }
}

impl<T: StatementTransport> Processor<T> {
    pub fn with_transport(connection: Connection, transport: T) -> Self {
        Self {
            connection,
            transport,
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_polls: None,
        }
    }

    /// Fixed delay applied before every continuation request.
    pub fn poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Fail with [`PrestoError::PollLimit`] instead of following more than
    /// `max_polls` continuation links. Unbounded by default.
    pub fn max_polls(mut self, max_polls: Option<usize>) -> Self {
        self.max_polls = max_polls;
        self
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Submit `sql` and collect every row the engine returns.
    ///
    /// A FAILED round aborts the call and drops whatever was collected so far.
    pub async fn execute<C: Collector>(
        &self,
        sql: &str,
        mut collector: C,
    ) -> Result<ResultSet<C::Row>> {
        // Step 1: Submit the statement
        let response = self.send_query(sql).await?;
        let mut next_uri = self.resolve(response, &mut collector)?;

        // Step 2: Follow nextUri until the engine stops returning one
        let mut polls = 0;
        while let Some(uri) = next_uri {
            if self.max_polls.is_some_and(|max| polls >= max) {
                return Err(PrestoError::PollLimit(polls));
            }
            polls += 1;

            tokio::time::sleep(self.poll_interval).await;

            let response = self.transport.get_continuation(&uri).await?;
            next_uri = self.resolve(response, &mut collector)?;
        }

        debug!(polls, "statement finished");
        Ok(collector.get())
    }

    async fn send_query(&self, sql: &str) -> Result<RawResponse> {
        let headers = self.connection.headers()?;
        self.transport
            .post_statement(&self.connection.statement_uri(), &headers, sql)
            .await
    }

    /// Decode one round, stop on failure, feed the collector and return the
    /// next location to poll.
    fn resolve<C: Collector>(
        &self,
        response: RawResponse,
        collector: &mut C,
    ) -> Result<Option<String>> {
        let results: QueryResults = serde_json::from_str(&response.body)?;

        debug!(
            state = %results.stats.state,
            rows = results.row_count(),
            "statement round"
        );

        if results.is_failed() {
            return Err(match &results.error {
                Some(error) => PrestoError::protocol(error),
                None => PrestoError::Protocol("UNKNOWN: query failed".to_string()),
            });
        }

        let next_uri = results.next_uri().map(str::to_string);
        trace!(next_uri = ?next_uri, "continuation");

        collector.collect(results);
        Ok(next_uri)
    }
}
