pub mod calculator;
pub mod engine;
pub mod rainfall;

pub use crate::domain::model::{
    AnnualRainfall, DailyPrecipitationSeries, GeoCoordinate, GeoMatch, HarvestParameters,
    HarvestReport, HarvestResult, RainfallQuery, RainfallSource, YearlySavings,
};
pub use crate::domain::ports::{
    ConfigProvider, GeoResolver, Pipeline, PrecipitationArchive, Storage,
};
pub use crate::utils::error::Result;
pub use calculator::HarvestCalculator;
pub use engine::{EstimatorEngine, RunSummary};
pub use rainfall::RainfallResolver;
