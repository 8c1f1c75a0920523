use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// State reported by the engine when a query has failed.
pub const FAILED: &str = "FAILED";

/// One decoded response body of the statement protocol.
///
/// Returned by both the initial `POST /v1/statement` and every `GET nextUri`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info_uri: Option<String>,
    /// Absolute URI to poll next. Absent once the query is done.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<Column>>,
    /// Row batch for this round, each row positional.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Vec<Value>>>,
    pub stats: StatementStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<QueryError>,
}

impl QueryResults {
    /// The continuation URI, treating an empty string as "no more data".
    pub fn next_uri(&self) -> Option<&str> {
        self.next_uri.as_deref().filter(|uri| !uri.is_empty())
    }

    pub fn is_failed(&self) -> bool {
        self.stats.state == FAILED
    }

    /// Number of rows carried by this envelope.
    pub fn row_count(&self) -> usize {
        self.data.as_ref().map_or(0, Vec::len)
    }
}

/// Execution statistics. Only `state` is consumed by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementStats {
    /// Examples: "QUEUED", "PLANNING", "RUNNING", "FINISHED", "FAILED"
    pub state: String,
    #[serde(default)]
    pub scheduled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_rows: Option<u64>,
}

/// Error object attached to a FAILED envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryError {
    pub error_name: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
}

/// Column metadata announced by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub column_type: Option<String>,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: None,
        }
    }
}

/// Possible errors encountered by the Presto client
#[derive(Error, Debug)]
pub enum PrestoError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// Engine reported `FAILED`; the message is `"{errorName}: {message}"`.
    #[error("{0}")]
    Protocol(String),

    #[error("Gave up after {0} polls without the query finishing")]
    PollLimit(usize),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PrestoError {
    pub fn protocol(error: &QueryError) -> Self {
        Self::Protocol(format!("{}: {}", error.error_name, error.message))
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True for failures of the network layer rather than of the query.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::HttpStatus { .. })
    }

    pub fn category(&self) -> &'static str {
        match self {
            Self::Http(_) | Self::HttpStatus { .. } => "Transport Error",
            Self::MalformedResponse(_) => "Malformed Response",
            Self::Protocol(_) => "Query Failed",
            Self::PollLimit(_) => "Poll Limit",
            Self::Config(_) => "Configuration Error",
        }
    }
}

pub type Result<T> = std::result::Result<T, PrestoError>;
