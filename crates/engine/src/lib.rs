pub mod evaluator;
pub mod extractor;
pub mod market;
pub mod orchestrator;

pub use orchestrator::{AssetReport, Orchestrator, RunSummary};
