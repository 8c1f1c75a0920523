use crate::config::ClientConfig;
use crate::connection::Connection;
use crate::http::HttpTransport;
use crate::processor::Processor;
use crate::query_builder::QueryBuilder;
use crate::transport::StatementTransport;

/// Entry point for running statements against a Presto coordinator.
///
/// ```no_run
/// # async fn run() -> presto_client::Result<()> {
/// use presto_client::{Connection, PrestoClient};
///
/// let client = PrestoClient::new(Connection::new(
///     "http://coordinator:8080",
///     "alice",
///     "default",
///     "hive",
/// ));
/// let rows = client.query().raw("SELECT 1 AS one").get_assoc().await?;
/// for row in &rows {
///     println!("{}", row["one"]);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PrestoClient<T = HttpTransport> {
    processor: Processor<T>,
}

impl PrestoClient<HttpTransport> {
    pub fn new(connection: Connection) -> Self {
        Self {
            processor: Processor::new(connection),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::with_processor(
            Processor::new(config.connection.clone())
                .poll_interval(config.poll_interval())
                .max_polls(config.max_polls),
        )
    }
}

impl<T: StatementTransport> PrestoClient<T> {
    pub fn with_transport(connection: Connection, transport: T) -> Self {
        Self::with_processor(Processor::with_transport(connection, transport))
    }

    pub fn with_processor(processor: Processor<T>) -> Self {
        Self { processor }
    }

    /// Start a new query. Each builder runs independently.
    pub fn query(&self) -> QueryBuilder<'_, T> {
        QueryBuilder::new(&self.processor)
    }

    pub fn processor(&self) -> &Processor<T> {
        &self.processor
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::mock::ScriptedTransport;
    use crate::models::PrestoError;

    #[tokio::test]
    async fn test_query_through_client() {
        let transport = ScriptedTransport::new()
            .with_body(json!({"stats": {"state": "QUEUED"}, "nextUri": "http://h/v1/statement/q/1"}))
            .with_body(json!({
                "stats": {"state": "FINISHED"},
                "columns": [{"name": "one"}],
                "data": [[1]]
            }));
        let client = PrestoClient::with_processor(
            Processor::with_transport(Connection::new("http://h", "u", "s", "c"), transport)
                .poll_interval(Duration::ZERO),
        );

        let rows = client.query().raw("SELECT 1 AS one").get_assoc().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows.rows()[0]["one"], json!(1));
        assert_eq!(client.processor().transport().remaining(), 0);
    }

    #[tokio::test]
    async fn test_failed_query_through_client() {
        let transport = ScriptedTransport::new().with_body(json!({
            "stats": {"state": "FAILED"},
            "error": {"errorName": "TABLE_NOT_FOUND", "message": "Table hive.s.missing does not exist"}
        }));
        let client = PrestoClient::with_transport(Connection::new("http://h", "u", "s", "c"), transport);

        let err = client.query().raw("SELECT * FROM missing").get().await.unwrap_err();
        assert!(matches!(err, PrestoError::Protocol(_)));
        assert_eq!(
            err.to_string(),
            "TABLE_NOT_FOUND: Table hive.s.missing does not exist"
        );
    }

    #[test]
    fn test_from_config() {
        let mut config = ClientConfig::new(Connection::new("http://h:8080/", "u", "s", "c"));
        config.max_polls = Some(5);

        let client = PrestoClient::from_config(&config);
        assert_eq!(
            client.processor().connection().statement_uri(),
            "http://h:8080/v1/statement"
        );
    }

    /// Runs against a live coordinator named by `PRESTO_HOST` and friends.
    #[tokio::test]
    #[ignore]
    async fn test_execute_live() -> Result<(), Box<dyn std::error::Error>> {
        let config = ClientConfig::from_env()?;
        let client = PrestoClient::from_config(&config);

        let rows = client.query().raw("SELECT 1 AS one").get_assoc().await?;
        assert_eq!(rows.len(), 1);
        println!("Rows: {:?}", rows.rows());

        Ok(())
    }
}
