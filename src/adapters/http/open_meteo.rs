//! Open-Meteo 歷史天氣資料庫，每日降雨量
//!
//! 參考 <https://open-meteo.com/en/docs/historical-weather-api>

use super::read_success_body;
use crate::core::{DailyPrecipitationSeries, GeoCoordinate, PrecipitationArchive};
use crate::utils::error::{HarvestError, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;

const SERVICE: &str = "weather archive";

pub const DEFAULT_ENDPOINT: &str = "https://archive-api.open-meteo.com/v1/archive";
pub const DEFAULT_REFERENCE_YEAR: i32 = 2023;
pub const DEFAULT_MODEL: &str = "era5";
pub const DEFAULT_TIMEZONE: &str = "auto";

#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    #[serde(default)]
    daily: Option<DailyBlock>,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    #[serde(default)]
    precipitation_sum: Option<Vec<Option<f64>>>,
}

/// 每次查詢固定使用的年份區間與上游模型
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveRequest {
    pub reference_year: i32,
    pub model: String,
    pub timezone: String,
}

impl Default for ArchiveRequest {
    fn default() -> Self {
        Self {
            reference_year: DEFAULT_REFERENCE_YEAR,
            model: DEFAULT_MODEL.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

impl ArchiveRequest {
    /// 參考年份的 1/1 與 12/31，已格式化為查詢參數
    pub fn date_range(&self) -> Result<(String, String)> {
        let start = NaiveDate::from_ymd_opt(self.reference_year, 1, 1);
        let end = NaiveDate::from_ymd_opt(self.reference_year, 12, 31);
        match (start, end) {
            (Some(start), Some(end)) => Ok((
                start.format("%Y-%m-%d").to_string(),
                end.format("%Y-%m-%d").to_string(),
            )),
            _ => Err(HarvestError::InvalidConfigValueError {
                field: "source.reference_year".to_string(),
                value: self.reference_year.to_string(),
                reason: "Not a representable calendar year".to_string(),
            }),
        }
    }
}

pub struct OpenMeteoArchive {
    client: Client,
    endpoint: String,
    request: ArchiveRequest,
}

impl OpenMeteoArchive {
    pub fn new(client: Client, endpoint: impl Into<String>, request: ArchiveRequest) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            request,
        }
    }
}

#[async_trait]
impl PrecipitationArchive for OpenMeteoArchive {
    async fn daily_precipitation(
        &self,
        coordinate: &GeoCoordinate,
    ) -> Result<DailyPrecipitationSeries> {
        let (start_date, end_date) = self.request.date_range()?;
        let latitude = coordinate.latitude.to_string();
        let longitude = coordinate.longitude.to_string();

        tracing::debug!(
            "Making archive request to: {} ({}, {}) {}..{} model={}",
            self.endpoint,
            latitude,
            longitude,
            start_date,
            end_date,
            self.request.model
        );

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("start_date", start_date.as_str()),
                ("end_date", end_date.as_str()),
                ("daily", "precipitation_sum"),
                ("models", self.request.model.as_str()),
                ("timezone", self.request.timezone.as_str()),
            ])
            .send()
            .await
            .map_err(|e| HarvestError::lookup_unavailable(SERVICE, e.to_string()))?;

        let body = read_success_body(SERVICE, response).await?;
        tracing::debug!("Raw archive response: {}", body);
        parse_response(&body)
    }
}

fn parse_response(body: &str) -> Result<DailyPrecipitationSeries> {
    let parsed: ArchiveResponse = serde_json::from_str(body).map_err(|e| {
        HarvestError::lookup_unavailable(SERVICE, format!("could not decode response: {}", e))
    })?;

    let days = parsed
        .daily
        .and_then(|daily| daily.precipitation_sum)
        .ok_or_else(|| HarvestError::NoRainfallData {
            message: "response has no daily.precipitation_sum field".to_string(),
        })?;

    let reported = days.len();
    // null 代表該日沒有資料，略過而不是當成 0
    let values: Vec<f64> = days.into_iter().flatten().collect();
    if values.len() < reported {
        tracing::warn!(
            "⚠️ {} of {} days have no precipitation value and were skipped",
            reported - values.len(),
            reported
        );
    }

    if values.is_empty() {
        return Err(HarvestError::NoRainfallData {
            message: format!("precipitation series has no values ({} days reported)", reported),
        });
    }

    Ok(DailyPrecipitationSeries::new(values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn test_date_range_covers_calendar_year() {
        let request = ArchiveRequest {
            reference_year: 2020,
            ..ArchiveRequest::default()
        };
        assert_eq!(
            request.date_range().unwrap(),
            ("2020-01-01".to_string(), "2020-12-31".to_string())
        );
    }

    #[test]
    fn test_missing_field_is_no_rainfall_data() {
        for body in [r#"{}"#, r#"{"daily": {}}"#, r#"{"daily": {"time": []}}"#] {
            assert!(
                matches!(
                    parse_response(body),
                    Err(HarvestError::NoRainfallData { .. })
                ),
                "body {:?} should be rejected",
                body
            );
        }
    }

    #[test]
    fn test_empty_series_is_no_rainfall_data() {
        let body = r#"{"daily": {"precipitation_sum": []}}"#;
        assert!(matches!(
            parse_response(body),
            Err(HarvestError::NoRainfallData { .. })
        ));

        let all_null = r#"{"daily": {"precipitation_sum": [null, null]}}"#;
        assert!(matches!(
            parse_response(all_null),
            Err(HarvestError::NoRainfallData { .. })
        ));
    }

    #[test]
    fn test_zero_series_is_valid() {
        let body = serde_json::json!({"daily": {"precipitation_sum": vec![0.0; 365]}}).to_string();
        let series = parse_response(&body).unwrap();
        assert_eq!(series.len(), 365);
        assert_eq!(series.annual_total(), Some(0.0));
    }

    #[test]
    fn test_null_days_are_skipped() {
        let body = r#"{"daily": {"precipitation_sum": [1.5, null, 2.5]}}"#;
        let series = parse_response(body).unwrap();
        assert_eq!(series.values, vec![1.5, 2.5]);
    }

    #[test]
    fn test_garbage_body_is_lookup_unavailable() {
        assert!(matches!(
            parse_response("not json"),
            Err(HarvestError::LookupUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_request_parameters() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v1/archive")
                .query_param("latitude", "13.08")
                .query_param("longitude", "80.27")
                .query_param("start_date", "2023-01-01")
                .query_param("end_date", "2023-12-31")
                .query_param("daily", "precipitation_sum")
                .query_param("models", "era5")
                .query_param("timezone", "auto");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "daily": {
                        "time": ["2023-01-01", "2023-01-02", "2023-01-03"],
                        "precipitation_sum": [0.0, 12.5, 3.25]
                    }
                }));
        });

        let archive = OpenMeteoArchive::new(
            Client::new(),
            server.url("/v1/archive"),
            ArchiveRequest::default(),
        );
        let series = archive
            .daily_precipitation(&GeoCoordinate {
                latitude: 13.08,
                longitude: 80.27,
            })
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(series.annual_total(), Some(15.75));
    }

    #[tokio::test]
    async fn test_error_status_is_lookup_unavailable() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/v1/archive");
            then.status(429).body("rate limited");
        });

        let archive = OpenMeteoArchive::new(
            Client::new(),
            server.url("/v1/archive"),
            ArchiveRequest::default(),
        );
        let result = archive
            .daily_precipitation(&GeoCoordinate {
                latitude: 1.0,
                longitude: 2.0,
            })
            .await;

        api_mock.assert();
        assert!(matches!(
            result,
            Err(HarvestError::LookupUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_connection_refused_is_lookup_unavailable() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let archive = OpenMeteoArchive::new(
            Client::new(),
            format!("http://{}/v1/archive", addr),
            ArchiveRequest::default(),
        );
        let result = archive
            .daily_precipitation(&GeoCoordinate {
                latitude: 1.0,
                longitude: 2.0,
            })
            .await;

        assert!(matches!(
            result,
            Err(HarvestError::LookupUnavailable { .. })
        ));
    }
}
