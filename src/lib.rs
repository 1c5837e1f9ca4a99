pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod report;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::LocalStorage;
pub use app::pipelines::HarvestPipeline;
pub use config::toml_config::HarvestSettings;
pub use crate::core::{EstimatorEngine, HarvestCalculator, RainfallResolver, RunSummary};
pub use utils::error::{HarvestError, Result};
