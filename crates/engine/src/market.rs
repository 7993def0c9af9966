//! Market value table: parses the shared `| asset code | market value |` table.
//!
//! Row 0 is a header. Values are currency strings such as `R$ 1,234`: the
//! `R$` marker and every `,` are stripped before parsing, which assumes the
//! sheet renders prices with `,` as the thousands separator. A price rendered
//! with a decimal comma (`R$ 98,50`) would be read as `9850`.

use std::collections::HashMap;

use quota_common::error::AppError;
use quota_common::parse::leading_float;
use quota_common::types::{MarketSnapshot, SourceRef, Table};

/// Currency marker stripped from market values.
const CURRENCY_PREFIX: &str = "R$";

/// Current market value of every asset listed in the shared table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketValues {
    values: HashMap<String, f64>,
}

impl MarketValues {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Snapshot for a configured asset, or `AssetNotFound`.
    pub fn snapshot(&self, name: &str) -> Result<MarketSnapshot, AppError> {
        self.get(name)
            .map(|market_value| MarketSnapshot {
                name: name.to_string(),
                market_value,
            })
            .ok_or_else(|| AppError::AssetNotFound {
                asset: name.to_string(),
            })
    }
}

pub struct MarketValueTable;

impl MarketValueTable {
    /// Parse every data row of the market table into a name → value map.
    ///
    /// Fails on the first row that breaks the schema. When a name repeats,
    /// the last row wins.
    pub fn build_market_value_map(
        source: &SourceRef,
        table: &Table,
    ) -> Result<MarketValues, AppError> {
        if table.is_empty() {
            return Err(AppError::NoData {
                source_id: source.spreadsheet_id.clone(),
            });
        }

        let mut values = HashMap::new();

        for (index, row) in table.rows.iter().enumerate().skip(1) {
            let Some(row) = row else {
                continue;
            };

            let (name, raw_value) = match (
                row.first().and_then(|c| c.as_str()),
                row.get(1).and_then(|c| c.as_str()),
            ) {
                (Some(name), Some(value)) => (name, value),
                _ => {
                    return Err(AppError::MalformedRow {
                        row: index,
                        name: describe_cell(row.first()),
                        value: describe_cell(row.get(1)),
                    });
                }
            };

            let market_value =
                parse_market_value(raw_value).ok_or_else(|| AppError::UnparsableValue {
                    row: index,
                    value: raw_value.to_string(),
                })?;

            if let Some(previous) = values.insert(name.to_string(), market_value) {
                tracing::warn!(
                    asset = name,
                    previous,
                    market_value,
                    "Asset listed twice in market table, keeping the later row"
                );
            }
        }

        if values.is_empty() {
            return Err(AppError::EmptyResult {
                source_id: source.spreadsheet_id.clone(),
            });
        }

        Ok(MarketValues { values })
    }
}

/// Strip the currency marker and `,` thousands separators, then read the
/// leading number. Trailing text is ignored; only finite results count.
pub fn parse_market_value(raw: &str) -> Option<f64> {
    leading_float(&raw.replace(CURRENCY_PREFIX, "").replace(',', ""))
}

fn describe_cell(cell: Option<&serde_json::Value>) -> String {
    match cell {
        None => "<missing>".to_string(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn source() -> SourceRef {
        SourceRef::new("market-sheet", "AssetsPrice")
    }

    #[test]
    fn test_parse_market_value() {
        assert_eq!(parse_market_value("R$ 1,234"), Some(1234.0));
        assert_eq!(parse_market_value("R$98.50"), Some(98.5));
        assert_eq!(parse_market_value("R$ 1,234.50"), Some(1234.5));
        assert_eq!(parse_market_value("R$ 1,234,567"), Some(1_234_567.0));
        assert_eq!(parse_market_value("R$ -"), None);
        assert_eq!(parse_market_value(""), None);
        assert_eq!(parse_market_value("R$ inf"), None);
    }

    #[test]
    fn test_parse_market_value_ignores_trailing_text() {
        assert_eq!(parse_market_value("R$ 100.50 *"), Some(100.5));
        assert_eq!(parse_market_value("R$ 1,234 (D-1)"), Some(1234.0));
    }

    #[test]
    fn test_annotated_value_does_not_abort() {
        let table = Table::from_strings(vec![vec!["Ativo", "Preço"], vec!["CDII11", "R$ 100.50 *"]]);
        let values = MarketValueTable::build_market_value_map(&source(), &table).unwrap();
        assert_eq!(values.get("CDII11"), Some(100.5));
    }

    #[test]
    fn test_header_is_skipped() {
        let table = Table::from_strings(vec![
            vec!["Ativo", "Preço"],
            vec!["CDII11", "R$ 101"],
            vec!["JURO11", "R$ 1,050"],
        ]);
        let values = MarketValueTable::build_market_value_map(&source(), &table).unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values.get("Ativo"), None);
        assert_eq!(values.get("CDII11"), Some(101.0));
        assert_eq!(values.get("JURO11"), Some(1050.0));
    }

    #[test]
    fn test_header_is_never_parsed() {
        // A numeric-looking header still is not data
        let table = Table::from_strings(vec![vec!["XPTO11", "R$ 10"], vec!["CDII11", "R$ 101"]]);
        let values = MarketValueTable::build_market_value_map(&source(), &table).unwrap();
        assert_eq!(values.get("XPTO11"), None);
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn test_absent_rows_are_skipped() {
        let table = Table::new(vec![
            Some(vec![json!("Ativo"), json!("Preço")]),
            None,
            Some(vec![json!("CDII11"), json!("R$ 99")]),
        ]);
        let values = MarketValueTable::build_market_value_map(&source(), &table).unwrap();
        assert_eq!(values.get("CDII11"), Some(99.0));
    }

    #[test]
    fn test_duplicate_name_last_wins() {
        let table = Table::from_strings(vec![
            vec!["Ativo", "Preço"],
            vec!["CDII11", "R$ 99"],
            vec!["CDII11", "R$ 97"],
        ]);
        let values = MarketValueTable::build_market_value_map(&source(), &table).unwrap();
        assert_eq!(values.len(), 1);
        assert_eq!(values.get("CDII11"), Some(97.0));
    }

    #[test]
    fn test_empty_table_is_no_data() {
        let err =
            MarketValueTable::build_market_value_map(&source(), &Table::default()).unwrap_err();
        assert!(matches!(err, AppError::NoData { .. }));
    }

    #[test]
    fn test_header_only_is_empty_result() {
        let table = Table::from_strings(vec![vec!["Ativo", "Preço"]]);
        let err = MarketValueTable::build_market_value_map(&source(), &table).unwrap_err();
        assert!(matches!(err, AppError::EmptyResult { ref source_id } if source_id == "market-sheet"));
    }

    #[test]
    fn test_non_string_cell_is_malformed() {
        let table = Table::new(vec![
            Some(vec![json!("Ativo"), json!("Preço")]),
            Some(vec![json!("CDII11"), json!(101.0)]),
        ]);
        let err = MarketValueTable::build_market_value_map(&source(), &table).unwrap_err();
        match err {
            AppError::MalformedRow { row, name, value } => {
                assert_eq!(row, 1);
                assert_eq!(name, "CDII11");
                assert_eq!(value, "101.0");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_value_cell_is_malformed() {
        let table = Table::new(vec![
            Some(vec![json!("Ativo"), json!("Preço")]),
            Some(vec![json!("CDII11")]),
        ]);
        let err = MarketValueTable::build_market_value_map(&source(), &table).unwrap_err();
        assert!(matches!(err, AppError::MalformedRow { ref value, .. } if value == "<missing>"));
    }

    #[test]
    fn test_unparsable_value() {
        let table = Table::from_strings(vec![
            vec!["Ativo", "Preço"],
            vec!["CDII11", "R$ 101"],
            vec!["JURO11", "#N/A"],
        ]);
        let err = MarketValueTable::build_market_value_map(&source(), &table).unwrap_err();
        assert!(matches!(err, AppError::UnparsableValue { row: 2, ref value } if value == "#N/A"));
    }

    #[test]
    fn test_snapshot_lookup() {
        let table = Table::from_strings(vec![vec!["Ativo", "Preço"], vec!["CDII11", "R$ 101"]]);
        let values = MarketValueTable::build_market_value_map(&source(), &table).unwrap();

        let snapshot = values.snapshot("CDII11").unwrap();
        assert_eq!(snapshot.market_value, 101.0);

        let err = values.snapshot("JURO11").unwrap_err();
        assert!(matches!(err, AppError::AssetNotFound { ref asset } if asset == "JURO11"));
    }
}
