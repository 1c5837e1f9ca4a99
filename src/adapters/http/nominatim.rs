//! Nominatim / OpenStreetMap 地名查詢
//!
//! 參考 <https://nominatim.org/release-docs/develop/api/Search/>

use super::read_success_body;
use crate::core::{GeoCoordinate, GeoMatch, GeoResolver};
use crate::utils::error::{HarvestError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

const SERVICE: &str = "geocoding";

pub const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

pub struct NominatimResolver {
    client: Client,
    endpoint: String,
}

impl NominatimResolver {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl GeoResolver for NominatimResolver {
    async fn lookup(&self, location: &str) -> Result<Vec<GeoMatch>> {
        tracing::debug!("Making geocoding request to: {} (q={})", self.endpoint, location);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("format", "json"), ("q", location)])
            .send()
            .await
            .map_err(|e| HarvestError::lookup_unavailable(SERVICE, e.to_string()))?;

        let body = read_success_body(SERVICE, response).await?;
        parse_response(&body)
    }
}

fn parse_response(body: &str) -> Result<Vec<GeoMatch>> {
    if body.trim().is_empty() {
        return Err(HarvestError::lookup_unavailable(
            SERVICE,
            "empty response body",
        ));
    }

    let places: Vec<NominatimPlace> = serde_json::from_str(body).map_err(|e| {
        HarvestError::lookup_unavailable(SERVICE, format!("could not decode response: {}", e))
    })?;

    places
        .into_iter()
        .map(|place| {
            let latitude = parse_degrees("lat", &place.lat)?;
            let longitude = parse_degrees("lon", &place.lon)?;
            Ok(GeoMatch {
                coordinate: GeoCoordinate {
                    latitude,
                    longitude,
                },
                display_name: place.display_name,
            })
        })
        .collect()
}

fn parse_degrees(field: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| {
            HarvestError::lookup_unavailable(SERVICE, format!("invalid {} value '{}'", field, raw))
        })
}
