use crate::core::{HarvestReport, RainfallSource};

/// 回本年數達到此值(含)以上時顯示「too long」
pub const PAYBACK_TOO_LONG_YEARS: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaybackDisplay {
    Years(f64),
    TooLong,
    /// 沒有正的節省金額，永遠無法回本
    Undefined,
}

impl PaybackDisplay {
    pub fn classify(payback_years: f64, threshold_years: f64) -> Self {
        if !payback_years.is_finite() {
            Self::Undefined
        } else if payback_years >= threshold_years {
            Self::TooLong
        } else {
            Self::Years(payback_years)
        }
    }
}

impl std::fmt::Display for PaybackDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Years(years) => write!(f, "📆 Payback Period: {:.1} years", years),
            Self::TooLong => write!(f, "📆 Payback period too long"),
            Self::Undefined => write!(f, "📆 Payback period undefined (no water bill savings)"),
        }
    }
}

/// 千分位格式：`1234567.891` → `"1,234,567.89"`（兩位小數）
pub fn format_thousands(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let formatted = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = match formatted.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(formatted.len() + integer.len() / 3 + 1);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }

    // 四捨五入後為零時不顯示負號
    let is_zero = formatted.chars().all(|c| c == '0' || c == '.');
    if value.is_sign_negative() && !is_zero {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

pub fn format_money(currency: &str, value: f64) -> String {
    format!("{} {}", currency, format_thousands(value, 2))
}

fn describe_source(source: &RainfallSource) -> String {
    match source {
        RainfallSource::Location {
            name,
            coordinate,
            display_name,
        } => format!(
            "{} ({}, {})",
            display_name.as_deref().unwrap_or(name),
            coordinate.latitude,
            coordinate.longitude
        ),
        RainfallSource::Upload => "uploaded CSV".to_string(),
    }
}

/// 終端機摘要，每行一個指標
pub fn render_summary(report: &HarvestReport, currency: &str, threshold_years: f64) -> Vec<String> {
    let result = &report.result;
    vec![
        format!(
            "🌧️ Annual Rainfall: {} mm from {}",
            format_thousands(report.rainfall.millimetres, 2),
            describe_source(&report.rainfall.source)
        ),
        format!(
            "💧 Total Annual Harvest: {} litres",
            format_thousands(result.annual_harvest_litres, 2)
        ),
        format!(
            "💰 Annual Water Bill Savings: {}",
            format_money(currency, result.annual_savings)
        ),
        PaybackDisplay::classify(result.payback_years, threshold_years).to_string(),
        format!(
            "📈 Total Savings Over {} Years: {}",
            report.parameters.system_lifespan_years,
            format_money(currency, result.total_savings)
        ),
        format!("📊 ROI: {:.1}%", result.roi_percent),
    ]
}
