pub mod google;

use async_trait::async_trait;

use quota_common::error::AppError;
use quota_common::types::{SourceRef, Table};

pub use google::GoogleSheetsSource;

/// A provider of tables of string cells, addressed by spreadsheet and named range.
#[async_trait]
pub trait TabularDataSource: Send + Sync {
    /// Fetch every row of `source`. An absent table comes back empty.
    async fn fetch(&self, source: &SourceRef) -> Result<Table, AppError>;

    /// Human-readable name for this provider (e.g., "Google Sheets").
    fn name(&self) -> &'static str;
}
