pub mod nominatim;
pub mod open_meteo;

pub use nominatim::NominatimResolver;
pub use open_meteo::OpenMeteoArchive;

use crate::core::ConfigProvider;
use crate::utils::error::{HarvestError, Result};
use reqwest::{Client, Response};

/// 兩個外部服務共用同一個 HTTP client（User-Agent、可選逾時）
pub fn build_client<C: ConfigProvider>(config: &C) -> Result<Client> {
    let mut builder = Client::builder().user_agent(config.user_agent().to_string());
    if let Some(timeout) = config.request_timeout() {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// 讀取成功回應的內容；連線失敗與非 2xx 狀態都轉成該服務的 `LookupUnavailable`
pub(crate) async fn read_success_body(service: &str, response: Response) -> Result<String> {
    let status = response.status();
    tracing::debug!("{} response status: {}", service, status);

    if !status.is_success() {
        return Err(HarvestError::lookup_unavailable(
            service,
            format!("service returned status {}", status),
        ));
    }

    response
        .text()
        .await
        .map_err(|e| HarvestError::lookup_unavailable(service, e.to_string()))
}
