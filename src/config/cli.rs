use crate::config::toml_config::HarvestSettings;
use crate::core::RainfallQuery;
use crate::utils::error::{HarvestError, Result};
use crate::utils::validation::validate_non_empty_string;
use clap::{ArgGroup, Parser};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "rain-harvest")]
#[command(about = "Estimate rooftop rainwater harvesting yield, savings and payback")]
#[command(group(
    ArgGroup::new("rainfall_input")
        .required(true)
        .args(["location", "upload"])
))]
pub struct CliConfig {
    /// City or village name to look up annual rainfall for
    #[arg(long)]
    pub location: Option<String>,

    /// CSV file with the total annual rainfall (mm) in its first cell
    #[arg(long)]
    pub upload: Option<PathBuf>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Rooftop area in m²
    #[arg(long)]
    pub roof_area: Option<f64>,

    /// Collection efficiency in percent (50-100)
    #[arg(long)]
    pub efficiency: Option<f64>,

    /// Water cost per litre
    #[arg(long)]
    pub water_cost: Option<f64>,

    /// Storage system cost
    #[arg(long)]
    pub storage_cost: Option<f64>,

    /// Annual maintenance cost
    #[arg(long)]
    pub maintenance_cost: Option<f64>,

    /// System lifespan in years
    #[arg(long)]
    pub lifespan: Option<u32>,

    /// Calendar year of rainfall to fetch for a location
    #[arg(long)]
    pub year: Option<i32>,

    /// Upstream reanalysis model for the weather archive
    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub output_path: Option<String>,

    /// Currency label used in the summary and chart
    #[arg(long)]
    pub currency: Option<String>,

    /// Pack the report files into a single ZIP archive
    #[arg(long)]
    pub bundle: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 載入 TOML（若有指定）後套用命令列覆蓋設定
    pub fn load_settings(&self) -> Result<HarvestSettings> {
        let mut settings = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                HarvestSettings::from_file(path)?
            }
            None => HarvestSettings::default(),
        };
        self.apply_overrides(&mut settings);
        Ok(settings)
    }

    pub fn apply_overrides(&self, settings: &mut HarvestSettings) {
        let params = &mut settings.parameters;
        if let Some(value) = self.roof_area {
            params.roof_area_m2 = value;
        }
        if let Some(value) = self.efficiency {
            params.collection_efficiency_pct = value;
        }
        if let Some(value) = self.water_cost {
            params.water_cost_per_litre = value;
        }
        if let Some(value) = self.storage_cost {
            params.storage_system_cost = value;
        }
        if let Some(value) = self.maintenance_cost {
            params.annual_maintenance_cost = value;
        }
        if let Some(value) = self.lifespan {
            params.system_lifespan_years = value;
        }

        if let Some(year) = self.year {
            settings.source.reference_year = year;
        }
        if let Some(model) = &self.model {
            settings.source.model = model.clone();
        }

        if let Some(path) = &self.output_path {
            settings.report.output_path = path.clone();
        }
        if let Some(currency) = &self.currency {
            settings.report.currency = currency.clone();
        }
        // 旗標只能開啟，不能關掉設定檔裡的 bundle
        if self.bundle {
            settings.report.bundle = true;
        }
    }

    pub async fn rainfall_query(&self) -> Result<RainfallQuery> {
        match (&self.location, &self.upload) {
            (Some(location), _) => {
                validate_non_empty_string("location", location)?;
                Ok(RainfallQuery::ByLocation {
                    location_name: location.trim().to_string(),
                })
            }
            (None, Some(path)) => {
                tracing::debug!("Reading rainfall upload from {}", path.display());
                let raw_table = tokio::fs::read(path).await?;
                Ok(RainfallQuery::ByUpload { raw_table })
            }
            (None, None) => Err(HarvestError::MissingConfigError {
                field: "--location or --upload".to_string(),
            }),
        }
    }
}
