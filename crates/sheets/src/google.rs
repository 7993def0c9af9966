//! Google Sheets v4 `spreadsheets.values.get` client.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use quota_common::error::AppError;
use quota_common::types::{Row, SourceRef, Table};

use crate::TabularDataSource;

/// Response body of `GET /spreadsheets/{id}/values/{range}`.
///
/// `values` is omitted entirely when the range is empty.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Option<Vec<Option<Row>>>,
}

/// Reads named ranges from Google spreadsheets with an API credential.
pub struct GoogleSheetsSource {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GoogleSheetsSource {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Build the request URL for a range, percent-encoding the path segments.
    fn values_url(&self, source: &SourceRef) -> Result<Url, AppError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| AppError::Config(format!("invalid Sheets API URL: {e}")))?;

        url.path_segments_mut()
            .map_err(|_| AppError::Config(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .push("spreadsheets")
            .push(&source.spreadsheet_id)
            .push("values")
            .push(&source.range);

        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    /// Turn a `values.get` response body into a table.
    fn parse_body(body: &str) -> Result<Table, AppError> {
        let range: ValueRange = serde_json::from_str(body)
            .map_err(|e| AppError::Source(format!("invalid values response: {e}")))?;
        Ok(Table::new(range.values.unwrap_or_default()))
    }
}

#[async_trait]
impl TabularDataSource for GoogleSheetsSource {
    async fn fetch(&self, source: &SourceRef) -> Result<Table, AppError> {
        let url = self.values_url(source)?;

        tracing::debug!(source = %source, "Fetching spreadsheet range");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AppError::Source(format!(
                "spreadsheet '{}' answered {}: {}",
                source.spreadsheet_id,
                status,
                body.trim()
            )));
        }

        let table = Self::parse_body(&body)?;
        tracing::debug!(source = %source, rows = table.len(), "Fetched spreadsheet range");
        Ok(table)
    }

    fn name(&self) -> &'static str {
        "Google Sheets"
    }
}
