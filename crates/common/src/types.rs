use serde::{Deserialize, Serialize};

/// Location of a table: a spreadsheet plus a named range inside it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceRef {
    pub spreadsheet_id: String,
    pub range: String,
}

impl SourceRef {
    pub fn new(spreadsheet_id: impl Into<String>, range: impl Into<String>) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            range: range.into(),
        }
    }
}

impl std::fmt::Display for SourceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}!{}", self.spreadsheet_id, self.range)
    }
}

/// A tracked asset. Static for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetDefinition {
    /// Short unique code (e.g., "CDII11")
    pub name: String,
    /// Alert threshold as a fraction (0.02 = 2%). Any real number is legal.
    pub target_ratio: f64,
    /// Where this asset's quota table lives
    pub quota_source: SourceRef,
}

/// A single row of cells as returned by the tabular provider.
///
/// Cells stay JSON values so that "the cell is a string" is a checkable fact.
pub type Row = Vec<serde_json::Value>;

/// An ordered table of rows. `None` marks a row the provider left absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub rows: Vec<Option<Row>>,
}

impl Table {
    pub fn new(rows: Vec<Option<Row>>) -> Self {
        Self { rows }
    }

    /// Build a table where every row is present and every cell is a string.
    pub fn from_strings<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| {
                    Some(
                        row.into_iter()
                            .map(|cell| serde_json::Value::String(cell.into()))
                            .collect(),
                    )
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// The string content of a cell, if the row exists and the cell is a string.
    pub fn cell_str(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)?
            .as_ref()?
            .get(column)?
            .as_str()
    }
}

/// Current market price of one asset, fetched fresh every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub name: String,
    pub market_value: f64,
}

/// The latest valid quota (NAV) observation of one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotaObservation {
    /// Observation date, verbatim from the source (conventionally yyyy-MM-dd)
    pub date: String,
    pub value: f64,
}

/// Outcome of comparing market value against quota value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// `(market - quota) / quota`
    pub ratio: f64,
    /// `ratio < target`
    pub should_notify: bool,
}

/// The facts handed to a notification channel when an asset trades too
/// close to (or below) its quota.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioAlert {
    pub asset: String,
    pub quota_date: String,
    pub quota_value: f64,
    pub market_value: f64,
    pub ratio: f64,
    pub target_ratio: f64,
}
