use crate::core::{HarvestReport, Pipeline};
use crate::utils::error::Result;

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub report: HarvestReport,
    pub output_path: String,
}

/// 執行一次估算：取得雨量、計算、匯出
/// 每個步驟只跑一次，任何一步失敗就結束
pub struct EstimatorEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EstimatorEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("🚀 Starting rainwater harvesting estimate");

        // Extract
        tracing::info!("🌧️ Resolving annual rainfall...");
        let rainfall = self.pipeline.extract().await?;
        tracing::info!("Annual rainfall: {:.2} mm", rainfall.millimetres);

        // Transform
        tracing::info!("🧮 Calculating harvest economics...");
        let report = self.pipeline.transform(rainfall).await?;
        tracing::info!(
            "Harvest: {:.2} litres/year, savings {:.2}/year",
            report.result.annual_harvest_litres,
            report.result.annual_savings
        );

        // Load
        tracing::info!("💾 Writing report...");
        let output_path = self.pipeline.load(&report).await?;
        tracing::info!("📁 Output saved to: {}", output_path);

        Ok(RunSummary {
            report,
            output_path,
        })
    }
}
