//! 估算結果 [`HarvestReport`] 的呈現與匯出
//!
//! 計算器只回傳數字；貨幣符號、千分位與「回本太久」的判斷都在這一層

pub mod chart;
pub mod export;
pub mod summary;

pub use summary::{render_summary, PaybackDisplay, PAYBACK_TOO_LONG_YEARS};

use crate::core::{HarvestReport, Storage};
use crate::utils::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    pub output_path: String,
    pub currency: String,
    pub payback_threshold_years: f64,
    pub bundle: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            output_path: "./output".to_string(),
            currency: "Rs".to_string(),
            payback_threshold_years: PAYBACK_TOO_LONG_YEARS,
            bundle: false,
        }
    }
}

/// 透過 `storage` 寫出 CSV、圖表與 JSON 摘要，回傳主要產出的路徑
/// （一般是 CSV，打包模式則是 ZIP）
pub async fn publish<S: Storage>(
    storage: &S,
    report: &HarvestReport,
    options: &ReportOptions,
) -> Result<String> {
    let files = vec![
        (
            export::SAVINGS_CSV,
            export::write_savings_csv(&report.result.cumulative_savings)?,
        ),
        (
            export::SAVINGS_CHART,
            chart::render_svg(&report.result.cumulative_savings, &options.currency).into_bytes(),
        ),
        (export::SUMMARY_JSON, export::write_summary_json(report)?),
    ];

    if options.bundle {
        tracing::debug!("Creating report bundle with {} files", files.len());
        let zip_data = export::bundle_zip(&files)?;
        tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
        storage.write_file(export::REPORT_BUNDLE, &zip_data).await?;
        return Ok(format!("{}/{}", options.output_path, export::REPORT_BUNDLE));
    }

    for (name, data) in &files {
        tracing::debug!("Writing {} ({} bytes)", name, data.len());
        storage.write_file(name, data).await?;
    }
    Ok(format!("{}/{}", options.output_path, export::SAVINGS_CSV))
}
