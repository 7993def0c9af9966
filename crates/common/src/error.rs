use thiserror::Error;

/// Common error types used across the crawler.
///
/// Every variant is terminal for the current run: nothing is retried and
/// nothing is downgraded to a warning.
#[derive(Debug, Error)]
pub enum AppError {
    /// A tabular source returned an empty or absent table.
    #[error("the source '{source_id}' returned no data")]
    NoData { source_id: String },

    /// No row of a quota table holds a parsable quota value.
    #[error(
        "couldn't get the last updated quota value for {asset}: no value cell can be converted to a number"
    )]
    NoValidQuota { asset: String },

    /// A market table row whose name or value cell is not a string.
    #[error("unexpected market row {row}: '{name}', '{value}'")]
    MalformedRow {
        row: usize,
        name: String,
        value: String,
    },

    /// A market value cell that does not parse to a finite number.
    #[error("unexpected market value in row {row}: '{value}'")]
    UnparsableValue { row: usize, value: String },

    /// The market table yielded no asset at all.
    #[error("the source '{source_id}' has no asset information")]
    EmptyResult { source_id: String },

    /// A configured asset is missing from the market snapshot.
    #[error("couldn't find market info for {asset}")]
    AssetNotFound { asset: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Source error: {0}")]
    Source(String),

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
