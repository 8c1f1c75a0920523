//! Accumulators that turn successive protocol rounds into one result set.
//!
//! A collector is owned by a single `execute` call. [`Collector::get`] consumes
//! it, so it can never leak rows into another query.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::models::{Column, QueryResults};

/// A row addressed by position.
pub type Row = Vec<Value>;

/// A row addressed by column name, iterating in column order.
pub type AssocRow = IndexMap<String, Value>;

pub trait Collector {
    type Row;

    /// Absorb one envelope's `columns` and `data`.
    fn collect(&mut self, results: QueryResults);

    /// Final snapshot. Never fails, even if nothing was collected.
    fn get(self) -> ResultSet<Self::Row>;
}

/// Ordered rows of a finished query plus the columns the engine announced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSet<R> {
    columns: Vec<Column>,
    rows: Vec<R>,
}

impl<R> Default for ResultSet<R> {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }
}

impl<R> ResultSet<R> {
    pub fn new(columns: Vec<Column>, rows: Vec<R>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first(&self) -> Option<&R> {
        self.rows.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.rows.iter()
    }

    pub fn into_rows(self) -> Vec<R> {
        self.rows
    }

    /// Transform every row, keeping the column metadata.
    pub fn map<U>(self, f: impl FnMut(R) -> U) -> ResultSet<U> {
        ResultSet {
            columns: self.columns,
            rows: self.rows.into_iter().map(f).collect(),
        }
    }
}

impl<R> IntoIterator for ResultSet<R> {
    type Item = R;
    type IntoIter = std::vec::IntoIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a, R> IntoIterator for &'a ResultSet<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Positional rows, concatenated in arrival order.
#[derive(Debug, Default)]
pub struct RowCollector {
    columns: Option<Vec<Column>>,
    rows: Vec<Row>,
}

impl RowCollector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Collector for RowCollector {
    type Row = Row;

    fn collect(&mut self, results: QueryResults) {
        if self.columns.is_none() {
            self.columns = results.columns;
        }
        if let Some(data) = results.data {
            self.rows.extend(data);
        }
    }

    fn get(self) -> ResultSet<Row> {
        ResultSet::new(self.columns.unwrap_or_default(), self.rows)
    }
}

/// Rows keyed by column name.
///
/// The first envelope carrying `columns` fixes the row shape for the rest of
/// the query; later batches usually arrive with `data` only.
#[derive(Debug, Default)]
pub struct AssocCollector {
    columns: Option<Vec<Column>>,
    rows: Vec<AssocRow>,
}

impl AssocCollector {
    pub fn new() -> Self {
        Self::default()
    }

    fn key_for(&self, index: usize) -> String {
        self.columns
            .as_ref()
            .and_then(|columns| columns.get(index))
            .map_or_else(|| index.to_string(), |column| column.name.clone())
    }

    fn zip(&self, row: Row) -> AssocRow {
        let width = self.columns.as_ref().map_or(0, Vec::len);
        let mut assoc = IndexMap::with_capacity(width.max(row.len()));

        let mut values = row.into_iter();
        for index in 0..width {
            assoc.insert(self.key_for(index), values.next().unwrap_or(Value::Null));
        }
        // Values past the announced width keep their position as key.
        for (offset, value) in values.enumerate() {
            assoc.insert((width + offset).to_string(), value);
        }
        assoc
    }
}

impl Collector for AssocCollector {
    type Row = AssocRow;

    fn collect(&mut self, results: QueryResults) {
        if self.columns.is_none() {
            self.columns = results.columns;
        }
        if let Some(data) = results.data {
            self.rows.reserve(data.len());
            for row in data {
                let assoc = self.zip(row);
                self.rows.push(assoc);
            }
        }
    }

    fn get(self) -> ResultSet<AssocRow> {
        ResultSet::new(self.columns.unwrap_or_default(), self.rows)
    }
}
