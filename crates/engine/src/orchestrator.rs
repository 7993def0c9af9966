//! Run orchestration.
//!
//! One run:
//! 1. Fetches the shared market table once and parses it (`MarketValueTable`)
//! 2. For each configured asset, in order: fetches its quota table
//!    (`QuotaRecordExtractor`), looks up its market value, evaluates the
//!    ratio (`RatioEvaluator`) and notifies when the ratio is below target
//!
//! Everything is sequential. The first failure aborts the run; alerts already
//! sent for earlier assets stay sent.

use std::sync::Arc;

use serde::Serialize;

use quota_common::error::AppError;
use quota_common::format::{display_decimal, display_percent};
use quota_common::types::{
    AssetDefinition, EvaluationResult, QuotaObservation, RatioAlert, SourceRef,
};
use quota_notifier::Notifier;
use quota_sheets::TabularDataSource;

use crate::evaluator::RatioEvaluator;
use crate::extractor::QuotaRecordExtractor;
use crate::market::{MarketValueTable, MarketValues};

/// What happened to one asset during a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetReport {
    pub asset: String,
    pub quota: QuotaObservation,
    pub market_value: f64,
    pub evaluation: EvaluationResult,
    pub notified: bool,
}

/// Outcome of a completed run, one report per asset in evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub reports: Vec<AssetReport>,
}

impl RunSummary {
    pub fn evaluated(&self) -> usize {
        self.reports.len()
    }

    pub fn notified(&self) -> usize {
        self.reports.iter().filter(|r| r.notified).count()
    }
}

/// Drives the ratio pipeline over the configured assets.
pub struct Orchestrator {
    source: Arc<dyn TabularDataSource>,
    notifier: Arc<dyn Notifier>,
    market_source: SourceRef,
    assets: Vec<AssetDefinition>,
}

impl Orchestrator {
    pub fn new(
        source: Arc<dyn TabularDataSource>,
        notifier: Arc<dyn Notifier>,
        market_source: SourceRef,
        assets: Vec<AssetDefinition>,
    ) -> Self {
        Self {
            source,
            notifier,
            market_source,
            assets,
        }
    }

    /// Run the whole pipeline once.
    pub async fn run(&self) -> Result<RunSummary, AppError> {
        tracing::info!(
            source = self.source.name(),
            market_source = %self.market_source,
            "💰 Getting the current market values"
        );
        let market_values = self.fetch_market_values().await?;
        tracing::info!(assets = market_values.len(), "Market values loaded");

        tracing::info!(assets = self.assets.len(), "🏊 Crawling for equity quota value");
        let mut summary = RunSummary::default();
        for asset in &self.assets {
            let report = self.evaluate_asset(asset, &market_values).await?;
            summary.reports.push(report);
        }

        Ok(summary)
    }

    async fn fetch_market_values(&self) -> Result<MarketValues, AppError> {
        let table = self.source.fetch(&self.market_source).await?;
        MarketValueTable::build_market_value_map(&self.market_source, &table)
    }

    /// Evaluate one asset and notify when its ratio is below target.
    async fn evaluate_asset(
        &self,
        asset: &AssetDefinition,
        market_values: &MarketValues,
    ) -> Result<AssetReport, AppError> {
        let table = self.source.fetch(&asset.quota_source).await?;
        let quota =
            QuotaRecordExtractor::extract_latest_quota(&asset.name, &asset.quota_source, &table)?;
        tracing::info!(
            asset = %asset.name,
            date = %quota.date,
            "🏦 Equity quota value: R$ {}",
            display_decimal(quota.value)
        );

        let market = market_values.snapshot(&asset.name)?;
        tracing::info!(
            asset = %asset.name,
            "💰 Market value: R$ {}",
            display_decimal(market.market_value)
        );

        let evaluation =
            RatioEvaluator::evaluate(quota.value, market.market_value, asset.target_ratio);

        if evaluation.should_notify {
            tracing::info!(
                asset = %asset.name,
                notifier = self.notifier.name(),
                "📈 Market/equity quota ratio less than {}% ({}%). Sending notification",
                display_percent(asset.target_ratio),
                display_percent(evaluation.ratio)
            );
            let alert = RatioAlert {
                asset: asset.name.clone(),
                quota_date: quota.date.clone(),
                quota_value: quota.value,
                market_value: market.market_value,
                ratio: evaluation.ratio,
                target_ratio: asset.target_ratio,
            };
            self.notifier.send(&alert).await?;
        } else {
            tracing::info!(
                asset = %asset.name,
                "📈 Market/equity quota ratio not less than {}% ({}%)",
                display_percent(asset.target_ratio),
                display_percent(evaluation.ratio)
            );
        }

        Ok(AssetReport {
            asset: asset.name.clone(),
            quota,
            market_value: market.market_value,
            evaluation,
            notified: evaluation.should_notify,
        })
    }
}
