use crate::utils::error::{HarvestError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(HarvestError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(HarvestError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(HarvestError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(HarvestError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(HarvestError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number<T: PartialOrd + std::fmt::Display>(
    field_name: &str,
    value: T,
    min_value: T,
) -> Result<()> {
    if value < min_value {
        return Err(HarvestError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

/// 金額與面積欄位：必須是有限且不小於零的數字
pub fn validate_non_negative(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(HarvestError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number greater than or equal to 0".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(HarvestError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    // NaN 不滿足任何比較，這裡用反向條件把它一起擋掉
    if !(value >= min && value <= max) {
        return Err(HarvestError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("source.geocoder_endpoint", "https://example.com").is_ok());
        assert!(validate_url("source.geocoder_endpoint", "http://example.com").is_ok());
        assert!(validate_url("source.geocoder_endpoint", "").is_err());
        assert!(validate_url("source.geocoder_endpoint", "invalid-url").is_err());
        assert!(validate_url("source.geocoder_endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("parameters.system_lifespan_years", 10, 1).is_ok());
        assert!(validate_positive_number("parameters.system_lifespan_years", 0, 1).is_err());
        assert!(validate_positive_number("source.timeout_seconds", 30u64, 1).is_ok());
        assert!(validate_positive_number("source.timeout_seconds", 0u64, 1).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("parameters.roof_area_m2", 0.0).is_ok());
        assert!(validate_non_negative("parameters.roof_area_m2", 120.5).is_ok());
        assert!(validate_non_negative("parameters.roof_area_m2", -1.0).is_err());
        assert!(validate_non_negative("parameters.roof_area_m2", f64::NAN).is_err());
        assert!(validate_non_negative("parameters.roof_area_m2", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_range_rejects_nan() {
        assert!(validate_range("parameters.collection_efficiency_pct", 85.0, 50.0, 100.0).is_ok());
        assert!(validate_range("parameters.collection_efficiency_pct", 49.9, 50.0, 100.0).is_err());
        assert!(validate_range("parameters.collection_efficiency_pct", f64::NAN, 50.0, 100.0).is_err());
    }
}
