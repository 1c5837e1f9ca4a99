use crate::domain::model::{HarvestParameters, HarvestResult, YearlySavings};

/// 收集效率的換算除數，固定為 1000 以符合既有的參考數字
pub const EFFICIENCY_DIVISOR: f64 = 1000.0;

/// 屋頂集雨的經濟效益計算，無狀態
/// 沒有節省、系統成本為零這兩種邊界情況回傳哨兵值，不回傳錯誤
pub struct HarvestCalculator;

impl HarvestCalculator {
    pub fn calculate(annual_rainfall_mm: f64, params: &HarvestParameters) -> HarvestResult {
        let annual_harvest_litres = params.roof_area_m2
            * annual_rainfall_mm
            * (params.collection_efficiency_pct / EFFICIENCY_DIVISOR);
        let annual_savings = annual_harvest_litres * params.water_cost_per_litre;

        let payback_years = if annual_savings > 0.0 {
            params.storage_system_cost / annual_savings
        } else {
            f64::INFINITY
        };

        let net_annual = annual_savings - params.annual_maintenance_cost;
        let total_savings = net_annual * f64::from(params.system_lifespan_years);

        let roi_percent = if params.storage_system_cost > 0.0 {
            (total_savings - params.storage_system_cost) / params.storage_system_cost * 100.0
        } else {
            0.0
        };

        let cumulative_savings = (1..=params.system_lifespan_years)
            .map(|year| YearlySavings {
                year,
                cumulative_savings: net_annual * f64::from(year),
            })
            .collect();

        HarvestResult {
            annual_harvest_litres,
            annual_savings,
            payback_years,
            total_savings,
            roi_percent,
            cumulative_savings,
        }
    }
}
