use crate::domain::model::{
    AnnualRainfall, DailyPrecipitationSeries, GeoCoordinate, GeoMatch, HarvestParameters,
    HarvestReport,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// 報表檔案的寫入端；檔名相對於實作自己的輸出位置
pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        name: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn geocoder_endpoint(&self) -> &str;
    fn archive_endpoint(&self) -> &str;
    fn user_agent(&self) -> &str;
    fn reference_year(&self) -> i32;
    fn archive_model(&self) -> &str;
    fn timezone(&self) -> &str;
    fn request_timeout(&self) -> Option<Duration>;
    fn harvest_parameters(&self) -> HarvestParameters;
    fn output_path(&self) -> &str;
    fn currency(&self) -> &str;
    fn payback_threshold_years(&self) -> f64;
    fn bundle_enabled(&self) -> bool;
}

/// 地名 → 座標候選，最相關的排第一
#[async_trait]
pub trait GeoResolver: Send + Sync {
    async fn lookup(&self, location: &str) -> Result<Vec<GeoMatch>>;
}

/// 指定座標在參考年份的每日降雨量
#[async_trait]
pub trait PrecipitationArchive: Send + Sync {
    async fn daily_precipitation(&self, coordinate: &GeoCoordinate)
        -> Result<DailyPrecipitationSeries>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<AnnualRainfall>;
    async fn transform(&self, rainfall: AnnualRainfall) -> Result<HarvestReport>;
    async fn load(&self, report: &HarvestReport) -> Result<String>;
}
