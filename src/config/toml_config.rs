use crate::adapters::http::{nominatim, open_meteo};
use crate::core::{ConfigProvider, HarvestParameters};
use crate::report::{ReportOptions, PAYBACK_TOO_LONG_YEARS};
use crate::utils::error::{HarvestError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_non_negative, validate_path, validate_positive_number,
    validate_range, validate_url, Validate,
};
use chrono::Datelike;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// ERA5 再分析資料最早的年份
pub const EARLIEST_REFERENCE_YEAR: i32 = 1940;

/// 每一年都會產生一筆累計節省資料，壽命需要上限
pub const MAX_SYSTEM_LIFESPAN_YEARS: u32 = 1000;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvestSettings {
    pub source: SourceConfig,
    pub parameters: ParametersConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub geocoder_endpoint: String,
    pub archive_endpoint: String,
    pub user_agent: String,
    pub reference_year: i32,
    pub model: String,
    pub timezone: String,
    pub timeout_seconds: Option<u64>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            geocoder_endpoint: nominatim::DEFAULT_ENDPOINT.to_string(),
            archive_endpoint: open_meteo::DEFAULT_ENDPOINT.to_string(),
            user_agent: concat!("rain-harvest/", env!("CARGO_PKG_VERSION")).to_string(),
            reference_year: open_meteo::DEFAULT_REFERENCE_YEAR,
            model: open_meteo::DEFAULT_MODEL.to_string(),
            timezone: open_meteo::DEFAULT_TIMEZONE.to_string(),
            timeout_seconds: None,
        }
    }
}

/// 計算參數，預設值與互動表單相同
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParametersConfig {
    pub roof_area_m2: f64,
    pub collection_efficiency_pct: f64,
    pub water_cost_per_litre: f64,
    pub storage_system_cost: f64,
    pub annual_maintenance_cost: f64,
    pub system_lifespan_years: u32,
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            roof_area_m2: 100.0,
            collection_efficiency_pct: 85.0,
            water_cost_per_litre: 0.005,
            storage_system_cost: 20000.0,
            annual_maintenance_cost: 500.0,
            system_lifespan_years: 10,
        }
    }
}

impl From<&ParametersConfig> for HarvestParameters {
    fn from(config: &ParametersConfig) -> Self {
        Self {
            roof_area_m2: config.roof_area_m2,
            collection_efficiency_pct: config.collection_efficiency_pct,
            water_cost_per_litre: config.water_cost_per_litre,
            storage_system_cost: config.storage_system_cost,
            annual_maintenance_cost: config.annual_maintenance_cost,
            system_lifespan_years: config.system_lifespan_years,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub output_path: String,
    pub currency: String,
    pub payback_threshold_years: f64,
    pub bundle: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        let defaults = ReportOptions::default();
        Self {
            output_path: defaults.output_path,
            currency: defaults.currency,
            payback_threshold_years: PAYBACK_TOO_LONG_YEARS,
            bundle: defaults.bundle,
        }
    }
}

impl HarvestSettings {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(HarvestError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置，未填的欄位使用預設值
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| HarvestError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${NOMINATIM_URL})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| HarvestError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_url("source.geocoder_endpoint", &self.source.geocoder_endpoint)?;
        validate_url("source.archive_endpoint", &self.source.archive_endpoint)?;
        validate_non_empty_string("source.user_agent", &self.source.user_agent)?;
        validate_non_empty_string("source.model", &self.source.model)?;
        validate_non_empty_string("source.timezone", &self.source.timezone)?;
        validate_range(
            "source.reference_year",
            self.source.reference_year,
            EARLIEST_REFERENCE_YEAR,
            chrono::Utc::now().year(),
        )?;
        if let Some(seconds) = self.source.timeout_seconds {
            validate_positive_number("source.timeout_seconds", seconds, 1)?;
        }

        let params = &self.parameters;
        validate_non_negative("parameters.roof_area_m2", params.roof_area_m2)?;
        validate_range(
            "parameters.collection_efficiency_pct",
            params.collection_efficiency_pct,
            50.0,
            100.0,
        )?;
        validate_non_negative("parameters.water_cost_per_litre", params.water_cost_per_litre)?;
        validate_non_negative("parameters.storage_system_cost", params.storage_system_cost)?;
        validate_non_negative(
            "parameters.annual_maintenance_cost",
            params.annual_maintenance_cost,
        )?;
        validate_range(
            "parameters.system_lifespan_years",
            params.system_lifespan_years,
            1,
            MAX_SYSTEM_LIFESPAN_YEARS,
        )?;

        validate_path("report.output_path", &self.report.output_path)?;
        validate_non_empty_string("report.currency", &self.report.currency)?;
        validate_non_negative(
            "report.payback_threshold_years",
            self.report.payback_threshold_years,
        )?;

        Ok(())
    }
}

impl ConfigProvider for HarvestSettings {
    fn geocoder_endpoint(&self) -> &str {
        &self.source.geocoder_endpoint
    }

    fn archive_endpoint(&self) -> &str {
        &self.source.archive_endpoint
    }

    fn user_agent(&self) -> &str {
        &self.source.user_agent
    }

    fn reference_year(&self) -> i32 {
        self.source.reference_year
    }

    fn archive_model(&self) -> &str {
        &self.source.model
    }

    fn timezone(&self) -> &str {
        &self.source.timezone
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.source.timeout_seconds.map(Duration::from_secs)
    }

    fn harvest_parameters(&self) -> HarvestParameters {
        HarvestParameters::from(&self.parameters)
    }

    fn output_path(&self) -> &str {
        &self.report.output_path
    }

    fn currency(&self) -> &str {
        &self.report.currency
    }

    fn payback_threshold_years(&self) -> f64 {
        self.report.payback_threshold_years
    }

    fn bundle_enabled(&self) -> bool {
        self.report.bundle
    }
}

impl Validate for HarvestSettings {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = HarvestSettings::from_toml_str("").unwrap();

        assert_eq!(config, HarvestSettings::default());
        assert_eq!(config.source.reference_year, 2023);
        assert_eq!(config.source.model, "era5");
        assert_eq!(config.parameters.collection_efficiency_pct, 85.0);
        assert_eq!(config.parameters.system_lifespan_years, 10);
        assert_eq!(config.report.payback_threshold_years, 50.0);
        assert!(config.request_timeout().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_sections() {
        let toml_content = r#"
[source]
reference_year = 2019
timeout_seconds = 30

[parameters]
roof_area_m2 = 250.0
system_lifespan_years = 25

[report]
currency = "USD"
bundle = true
"#;

        let config = HarvestSettings::from_toml_str(toml_content).unwrap();

        assert_eq!(config.reference_year(), 2019);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.archive_endpoint(), open_meteo::DEFAULT_ENDPOINT);

        let params = config.harvest_parameters();
        assert_eq!(params.roof_area_m2, 250.0);
        assert_eq!(params.system_lifespan_years, 25);
        assert_eq!(params.water_cost_per_litre, 0.005);

        assert_eq!(config.currency(), "USD");
        assert!(config.bundle_enabled());
        assert_eq!(config.output_path(), "./output");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("RAIN_HARVEST_TEST_GEOCODER", "https://geo.example.com/search");

        let toml_content = r#"
[source]
geocoder_endpoint = "${RAIN_HARVEST_TEST_GEOCODER}"
archive_endpoint = "${RAIN_HARVEST_TEST_UNSET_VAR}"
"#;

        let config = HarvestSettings::from_toml_str(toml_content).unwrap();
        assert_eq!(config.geocoder_endpoint(), "https://geo.example.com/search");
        assert_eq!(config.archive_endpoint(), "${RAIN_HARVEST_TEST_UNSET_VAR}");
        assert!(config.validate().is_err());

        std::env::remove_var("RAIN_HARVEST_TEST_GEOCODER");
    }

    #[test]
    fn test_config_validation() {
        let mut config = HarvestSettings::default();
        config.parameters.collection_efficiency_pct = 45.0;
        assert!(matches!(
            config.validate(),
            Err(HarvestError::InvalidConfigValueError { ref field, .. })
                if field == "parameters.collection_efficiency_pct"
        ));

        let mut config = HarvestSettings::default();
        config.parameters.system_lifespan_years = 0;
        assert!(config.validate().is_err());

        let mut config = HarvestSettings::default();
        config.parameters.system_lifespan_years = MAX_SYSTEM_LIFESPAN_YEARS;
        assert!(config.validate().is_ok());
        config.parameters.system_lifespan_years = 4_000_000_000;
        assert!(matches!(
            config.validate(),
            Err(HarvestError::InvalidConfigValueError { ref field, .. })
                if field == "parameters.system_lifespan_years"
        ));

        let mut config = HarvestSettings::default();
        config.parameters.annual_maintenance_cost = -1.0;
        assert!(config.validate().is_err());

        let mut config = HarvestSettings::default();
        config.source.reference_year = 1900;
        assert!(config.validate().is_err());

        let mut config = HarvestSettings::default();
        config.source.geocoder_endpoint = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let config = HarvestSettings::from_toml_str("[source]\ntimeout_seconds = 0\n").unwrap();

        assert!(matches!(
            config.validate(),
            Err(HarvestError::InvalidConfigValueError { ref field, .. })
                if field == "source.timeout_seconds"
        ));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            HarvestSettings::from_toml_str("[parameters]\nroof_area_m2 = \"big\""),
            Err(HarvestError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[report]\noutput_path = \"./reports\"\n")
            .unwrap();

        let config = HarvestSettings::from_file(temp_file.path()).unwrap();
        assert_eq!(config.output_path(), "./reports");
    }
}
