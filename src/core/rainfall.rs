use crate::adapters::upload::parse_upload;
use crate::core::{
    AnnualRainfall, GeoResolver, PrecipitationArchive, RainfallQuery, RainfallSource,
};
use crate::utils::error::{HarvestError, Result};

/// 把 [`RainfallQuery`] 轉成一個年雨量數字
///
/// 地名查詢會依序呼叫兩個服務（地名 → 座標，座標 → 每日序列），不快取也不重試
pub struct RainfallResolver<G: GeoResolver, A: PrecipitationArchive> {
    geo: G,
    archive: A,
}

impl<G: GeoResolver, A: PrecipitationArchive> RainfallResolver<G, A> {
    pub fn new(geo: G, archive: A) -> Self {
        Self { geo, archive }
    }

    pub async fn resolve(&self, query: &RainfallQuery) -> Result<AnnualRainfall> {
        match query {
            RainfallQuery::ByLocation { location_name } => {
                self.resolve_location(location_name).await
            }
            RainfallQuery::ByUpload { raw_table } => {
                let millimetres = parse_upload(raw_table)?;
                tracing::info!("✅ Annual rainfall value loaded: {:.2} mm", millimetres);
                Ok(AnnualRainfall {
                    millimetres,
                    source: RainfallSource::Upload,
                })
            }
        }
    }

    async fn resolve_location(&self, location_name: &str) -> Result<AnnualRainfall> {
        let candidates = self.geo.lookup(location_name).await?;
        tracing::debug!("Geocoder returned {} candidates", candidates.len());

        // 只採用第一個（最相關的）候選結果
        let best = candidates
            .into_iter()
            .next()
            .ok_or_else(|| HarvestError::LocationNotFound {
                location: location_name.to_string(),
            })?;

        tracing::info!(
            "📍 Coordinates found: {}, {}",
            best.coordinate.latitude,
            best.coordinate.longitude
        );

        let series = self.archive.daily_precipitation(&best.coordinate).await?;
        let millimetres = series
            .annual_total()
            .ok_or_else(|| HarvestError::NoRainfallData {
                message: format!("empty precipitation series for '{}'", location_name),
            })?;

        tracing::info!(
            "🌧️ Estimated annual rainfall: {:.2} mm ({} days)",
            millimetres,
            series.len()
        );

        Ok(AnnualRainfall {
            millimetres,
            source: RainfallSource::Location {
                name: location_name.to_string(),
                coordinate: best.coordinate,
                display_name: best.display_name,
            },
        })
    }
}
