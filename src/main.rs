use anyhow::Context;
use clap::Parser;
use rain_harvest::app::pipelines::HttpHarvestPipeline;
use rain_harvest::core::ConfigProvider;
use rain_harvest::report::render_summary;
use rain_harvest::utils::error::{ErrorSeverity, HarvestError};
use rain_harvest::utils::{logger, validation::Validate};
use rain_harvest::{CliConfig, EstimatorEngine, LocalStorage};

fn exit_code(e: &HarvestError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,      // 警告，但成功
        ErrorSeverity::Medium => 2,   // 外部服務暫時失敗
        ErrorSeverity::High => 1,     // 輸入或資料錯誤
        ErrorSeverity::Critical => 3, // 系統錯誤
    }
}

fn fail(stage: &str, e: &HarvestError) -> ! {
    tracing::error!(
        "❌ {} failed: {} (Category: {:?}, Severity: {:?})",
        stage,
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(exit_code(e));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting rain-harvest CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 載入並驗證配置（在任何網路請求之前）
    let settings = match cli.load_settings() {
        Ok(settings) => settings,
        Err(e) => fail("Configuration loading", &e),
    };
    if let Err(e) = settings.validate() {
        fail("Configuration validation", &e);
    }

    let query = match cli.rainfall_query().await {
        Ok(query) => query,
        Err(e) => fail("Reading rainfall input", &e),
    };

    let currency = settings.currency().to_string();
    let threshold = settings.payback_threshold_years();

    let storage = LocalStorage::new(settings.output_path().to_string());
    let pipeline = HttpHarvestPipeline::from_config(storage, settings, query)
        .context("failed to set up the HTTP client")?;
    let engine = EstimatorEngine::new(pipeline);

    match engine.run().await {
        Ok(summary) => {
            println!("Results");
            for line in render_summary(&summary.report, &currency, threshold) {
                println!("  {}", line);
            }
            println!("📁 Savings report saved to: {}", summary.output_path);
        }
        Err(e) => fail("Estimate", &e),
    }

    Ok(())
}
