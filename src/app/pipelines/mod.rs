pub mod harvest_pipeline;

pub use harvest_pipeline::{HarvestPipeline, HttpHarvestPipeline};
