//! Static definitions of the tracked assets.
//!
//! Both funds keep their quota history in a spreadsheet of their own, under the
//! named range [`QUOTA_RANGE`]. Market prices for all of them live in one shared
//! spreadsheet, see [`MARKET_SPREADSHEET_ID`].

use crate::types::{AssetDefinition, SourceRef};

/// Named range holding a fund's quota history.
pub const QUOTA_RANGE: &str = "Cota";

/// Named range holding `| asset code | market value |` rows, header on row 0.
pub const MARKET_RANGE: &str = "AssetsPrice";

/// Spreadsheet with the current market value of every tracked asset.
pub const MARKET_SPREADSHEET_ID: &str = "12BhxOJb6QTRS1EqLk9PppEg2T6g7yRg-3MQNjDvc4xc";

/// Sparta Infra CDI FICFI Infra Renda Fixa CP
const CDII11_SPREADSHEET_ID: &str = "10ZliBLFqo6GrUEAiEnxWK4qQGRSrpwA4WasFNh5q8og";

/// Sparta Infra FICF Inc de Inv Infra Renda Fixa CP
const JURO11_SPREADSHEET_ID: &str = "1Mw8ZeD2R2Y4j5t9sxJ-jH2vINRh_ZAx2zQpouM06x1o";

/// The assets evaluated on every run, in evaluation order.
pub fn default_assets() -> Vec<AssetDefinition> {
    vec![
        AssetDefinition {
            name: "JURO11".to_string(),
            target_ratio: 0.02,
            quota_source: SourceRef::new(JURO11_SPREADSHEET_ID, QUOTA_RANGE),
        },
        AssetDefinition {
            name: "CDII11".to_string(),
            target_ratio: 0.02,
            quota_source: SourceRef::new(CDII11_SPREADSHEET_ID, QUOTA_RANGE),
        },
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_asset_names_are_unique() {
        let assets = default_assets();
        let names: HashSet<&str> = assets.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names.len(), assets.len());
    }

    #[test]
    fn test_assets_read_the_quota_range() {
        for asset in default_assets() {
            assert_eq!(asset.quota_source.range, QUOTA_RANGE);
            assert!(asset.target_ratio.is_finite());
        }
    }
}
