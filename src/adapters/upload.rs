//! 從使用者上傳的 CSV 表格取得年雨量
//!
//! 只讀取 (0,0) 儲存格；沒有標題列，第一格之後的內容一律忽略

use crate::utils::error::{HarvestError, Result};

pub fn parse_upload(raw_table: &[u8]) -> Result<f64> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(raw_table);

    let first_row = match reader.records().next() {
        Some(Ok(record)) => record,
        Some(Err(e)) => {
            return Err(HarvestError::invalid_upload(format!(
                "could not read the first row: {}",
                e
            )))
        }
        None => return Err(HarvestError::invalid_upload("the table is empty")),
    };

    let cell = first_row
        .get(0)
        .filter(|cell| !cell.is_empty())
        .ok_or_else(|| HarvestError::invalid_upload("the first cell is empty"))?;

    let value: f64 = cell.parse().map_err(|_| {
        HarvestError::invalid_upload(format!("the first cell '{}' is not a number", cell))
    })?;

    if !value.is_finite() || value < 0.0 {
        return Err(HarvestError::invalid_upload(format!(
            "annual rainfall must be a finite, non-negative number, got {}",
            value
        )));
    }

    tracing::debug!(
        "Upload parsed: {} mm from a {}-column first row",
        value,
        first_row.len()
    );
    Ok(value)
}
