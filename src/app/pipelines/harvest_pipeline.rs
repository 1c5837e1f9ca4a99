use crate::adapters::http::{build_client, open_meteo::ArchiveRequest};
use crate::adapters::{NominatimResolver, OpenMeteoArchive};
use crate::core::{
    AnnualRainfall, ConfigProvider, GeoResolver, HarvestCalculator, HarvestReport, Pipeline,
    PrecipitationArchive, RainfallQuery, RainfallResolver, Storage,
};
use crate::report::{publish, ReportOptions};
use crate::utils::error::Result;

/// 單次估算：查雨量 → 計算收集效益 → 匯出報表
pub struct HarvestPipeline<S, C, G, A>
where
    S: Storage,
    C: ConfigProvider,
    G: GeoResolver,
    A: PrecipitationArchive,
{
    pub(crate) storage: S,
    pub(crate) config: C,
    pub(crate) resolver: RainfallResolver<G, A>,
    pub(crate) query: RainfallQuery,
}

/// 使用公開 Nominatim 與 Open-Meteo 服務的 Pipeline
pub type HttpHarvestPipeline<S, C> = HarvestPipeline<S, C, NominatimResolver, OpenMeteoArchive>;

impl<S, C, G, A> HarvestPipeline<S, C, G, A>
where
    S: Storage,
    C: ConfigProvider,
    G: GeoResolver,
    A: PrecipitationArchive,
{
    pub fn new(storage: S, config: C, resolver: RainfallResolver<G, A>, query: RainfallQuery) -> Self {
        Self {
            storage,
            config,
            resolver,
            query,
        }
    }

    fn report_options(&self) -> ReportOptions {
        ReportOptions {
            output_path: self.config.output_path().to_string(),
            currency: self.config.currency().to_string(),
            payback_threshold_years: self.config.payback_threshold_years(),
            bundle: self.config.bundle_enabled(),
        }
    }
}

impl<S: Storage, C: ConfigProvider> HttpHarvestPipeline<S, C> {
    /// 依設定建立 HTTP client 與兩個外部服務的 adapter
    pub fn from_config(storage: S, config: C, query: RainfallQuery) -> Result<Self> {
        let client = build_client(&config)?;
        let geo = NominatimResolver::new(client.clone(), config.geocoder_endpoint());
        let archive = OpenMeteoArchive::new(
            client,
            config.archive_endpoint(),
            ArchiveRequest {
                reference_year: config.reference_year(),
                model: config.archive_model().to_string(),
                timezone: config.timezone().to_string(),
            },
        );
        Ok(Self::new(
            storage,
            config,
            RainfallResolver::new(geo, archive),
            query,
        ))
    }
}

#[async_trait::async_trait]
impl<S, C, G, A> Pipeline for HarvestPipeline<S, C, G, A>
where
    S: Storage,
    C: ConfigProvider,
    G: GeoResolver,
    A: PrecipitationArchive,
{
    async fn extract(&self) -> Result<AnnualRainfall> {
        match &self.query {
            RainfallQuery::ByLocation { location_name } => {
                tracing::info!("📍 Looking up rainfall for: {}", location_name)
            }
            RainfallQuery::ByUpload { raw_table } => {
                tracing::info!("📄 Reading uploaded rainfall table ({} bytes)", raw_table.len())
            }
        }
        self.resolver.resolve(&self.query).await
    }

    async fn transform(&self, rainfall: AnnualRainfall) -> Result<HarvestReport> {
        let parameters = self.config.harvest_parameters();
        tracing::debug!("Calculation parameters: {:?}", parameters);

        let result = HarvestCalculator::calculate(rainfall.millimetres, &parameters);
        if !result.has_payback() {
            tracing::warn!("⚠️ No positive water bill savings, payback period is undefined");
        }

        Ok(HarvestReport {
            rainfall,
            parameters,
            result,
        })
    }

    async fn load(&self, report: &HarvestReport) -> Result<String> {
        publish(&self.storage, report, &self.report_options()).await
    }
}
