use crate::collector::{AssocCollector, AssocRow, ResultSet, Row, RowCollector};
use crate::models::Result;
use crate::processor::Processor;
use crate::transport::StatementTransport;

/// Collects a raw SQL statement and runs it through a [`Processor`].
#[derive(Debug)]
pub struct QueryBuilder<'a, T> {
    processor: &'a Processor<T>,
    raw: String,
}

impl<'a, T: StatementTransport> QueryBuilder<'a, T> {
    pub fn new(processor: &'a Processor<T>) -> Self {
        Self {
            processor,
            raw: String::new(),
        }
    }

    pub fn raw(mut self, query: impl Into<String>) -> Self {
        self.raw = query.into();
        self
    }

    pub fn to_sql(&self) -> &str {
        &self.raw
    }

    /// Execute and return positional rows.
    pub async fn get(&self) -> Result<ResultSet<Row>> {
        self.processor.execute(self.to_sql(), RowCollector::new()).await
    }

    /// Execute and return rows keyed by column name.
    pub async fn get_assoc(&self) -> Result<ResultSet<AssocRow>> {
        self.processor
            .execute(self.to_sql(), AssocCollector::new())
            .await
    }
}
