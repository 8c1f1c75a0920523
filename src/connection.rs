//! Engine coordinates used to build the initial statement request.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};

use crate::models::{PrestoError, Result};

pub const STATEMENT_PATH: &str = "/v1/statement";

pub const PRESTO_USER: &str = "x-presto-user";
pub const PRESTO_SCHEMA: &str = "x-presto-schema";
pub const PRESTO_CATALOG: &str = "x-presto-catalog";

/// Immutable description of where and as whom statements are submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    host: String,
    user: String,
    schema: String,
    catalog: String,
}

impl Connection {
    /// Example host: `http://coordinator:8080`
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        schema: impl Into<String>,
        catalog: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into().trim_end_matches('/').to_string(),
            user: user.into(),
            schema: schema.into(),
            catalog: catalog.into(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn catalog(&self) -> &str {
        &self.catalog
    }

    /// POST target for new statements.
    pub fn statement_uri(&self) -> String {
        format!("{}{}", self.host.trim_end_matches('/'), STATEMENT_PATH)
    }

    /// Identity headers attached to the initial POST only.
    pub fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::with_capacity(3);
        for (name, value) in [
            (PRESTO_USER, &self.user),
            (PRESTO_SCHEMA, &self.schema),
            (PRESTO_CATALOG, &self.catalog),
        ] {
            let value = HeaderValue::from_str(value)
                .map_err(|e| PrestoError::config(format!("invalid value for {name}: {e}")))?;
            headers.insert(HeaderName::from_static(name), value);
        }
        Ok(headers)
    }
}
