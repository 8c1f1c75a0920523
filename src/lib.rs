//! Client for the Presto asynchronous statement protocol.
//!
//! A statement is POSTed to `/v1/statement`; the coordinator answers with a
//! partial result and a `nextUri`, which is polled until it disappears. Rows
//! from every round are gathered by a [`Collector`], either positionally
//! ([`RowCollector`]) or keyed by column name ([`AssocCollector`]).

pub mod client;
pub mod collector;
pub mod config;
pub mod connection;
pub mod http;
pub mod mock;
pub mod models;
pub mod processor;
pub mod query_builder;
pub mod transport;

pub use client::PrestoClient;
pub use collector::{AssocCollector, AssocRow, Collector, ResultSet, Row, RowCollector};
pub use config::ClientConfig;
pub use connection::Connection;
pub use http::HttpTransport;
pub use models::{PrestoError, QueryResults, Result};
pub use processor::Processor;
pub use query_builder::QueryBuilder;
pub use transport::{RawResponse, StatementTransport};
