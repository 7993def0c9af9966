//! Quota extractor: finds the latest valid quota observation in a fund's table.
//!
//! The table is maintained by hand and new observations are appended at the
//! bottom, so it is scanned from the last row upwards:
//! 1. Read the value cell (column 4) in pt-BR format (`1.234,56`)
//! 2. Skip absent rows and cells that are missing, non-string or non-numeric
//! 3. The first row that parses wins; its date (column 1) is taken verbatim

use quota_common::error::AppError;
use quota_common::parse::leading_float;
use quota_common::types::{QuotaObservation, SourceRef, Table};

/// Zero-based column holding the observation date.
pub const DATE_COLUMN: usize = 1;

/// Zero-based column holding the quota value.
pub const VALUE_COLUMN: usize = 4;

pub struct QuotaRecordExtractor;

impl QuotaRecordExtractor {
    /// Extract the most recent parsable quota observation of `asset`.
    pub fn extract_latest_quota(
        asset: &str,
        source: &SourceRef,
        table: &Table,
    ) -> Result<QuotaObservation, AppError> {
        if table.is_empty() {
            return Err(AppError::NoData {
                source_id: source.spreadsheet_id.clone(),
            });
        }

        let found = (0..table.len()).rev().find_map(|row| {
            let value = parse_quota_value(table.cell_str(row, VALUE_COLUMN)?)?;
            Some((row, value))
        });

        let Some((row, value)) = found else {
            return Err(AppError::NoValidQuota {
                asset: asset.to_string(),
            });
        };

        // The newest parsable row is authoritative even when its date is blank
        let date = match table.cell_str(row, DATE_COLUMN) {
            Some(date) if !date.is_empty() => date.to_string(),
            _ => {
                tracing::warn!(asset, row, "Latest quota row has no date");
                return Err(AppError::NoValidQuota {
                    asset: asset.to_string(),
                });
            }
        };

        tracing::debug!(asset, row, value, date = %date, "Found latest quota");
        Ok(QuotaObservation { date, value })
    }
}

/// Parse a pt-BR formatted number: drop `.` thousands separators, then read
/// `,` as the decimal point. The leading number counts, trailing text such as
/// a footnote marker is ignored. Only finite results count.
pub fn parse_quota_value(raw: &str) -> Option<f64> {
    leading_float(&raw.replace('.', "").replace(',', "."))
}
