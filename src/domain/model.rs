use serde::{Deserialize, Serialize};

/// 雨量資料的來源：依地名查詢或使用者上傳的表格
#[derive(Debug, Clone, PartialEq)]
pub enum RainfallQuery {
    ByLocation { location_name: String },
    ByUpload { raw_table: Vec<u8> },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// 地理編碼候選結果，依相關度排序
#[derive(Debug, Clone, PartialEq)]
pub struct GeoMatch {
    pub coordinate: GeoCoordinate,
    pub display_name: Option<String>,
}

/// 一整年的每日降雨量 (mm)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyPrecipitationSeries {
    pub values: Vec<f64>,
}

impl DailyPrecipitationSeries {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 全年合計；空序列回傳 `None`，與「整年無雨」的 0 區分
    pub fn annual_total(&self) -> Option<f64> {
        if self.is_empty() {
            None
        } else {
            Some(self.values.iter().sum())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RainfallSource {
    Location {
        name: String,
        coordinate: GeoCoordinate,
        display_name: Option<String>,
    },
    Upload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualRainfall {
    pub millimetres: f64,
    pub source: RainfallSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestParameters {
    pub roof_area_m2: f64,
    pub collection_efficiency_pct: f64,
    pub water_cost_per_litre: f64,
    pub storage_system_cost: f64,
    pub annual_maintenance_cost: f64,
    pub system_lifespan_years: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlySavings {
    #[serde(rename = "Year")]
    pub year: u32,
    #[serde(rename = "Cumulative Savings")]
    pub cumulative_savings: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestResult {
    pub annual_harvest_litres: f64,
    pub annual_savings: f64,
    /// 沒有正的節省金額時為 `f64::INFINITY`
    pub payback_years: f64,
    pub total_savings: f64,
    pub roi_percent: f64,
    pub cumulative_savings: Vec<YearlySavings>,
}

impl HarvestResult {
    pub fn has_payback(&self) -> bool {
        self.payback_years.is_finite()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestReport {
    pub rainfall: AnnualRainfall,
    pub parameters: HarvestParameters,
    pub result: HarvestResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annual_total_distinguishes_no_data_from_dry_year() {
        let empty = DailyPrecipitationSeries::default();
        assert!(empty.is_empty());
        assert_eq!(empty.annual_total(), None);

        let dry = DailyPrecipitationSeries::new(vec![0.0; 365]);
        assert!(!dry.is_empty());
        assert_eq!(dry.annual_total(), Some(0.0));

        let wet = DailyPrecipitationSeries::new(vec![1.5, 0.0, 2.5]);
        assert_eq!(wet.len(), 3);
        assert_eq!(wet.annual_total(), Some(4.0));
    }
}
