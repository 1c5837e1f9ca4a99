use crate::core::{HarvestReport, YearlySavings};
use crate::utils::error::{HarvestError, Result};
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const SAVINGS_CSV: &str = "cumulative_savings.csv";
pub const SAVINGS_CHART: &str = "cumulative_savings.svg";
pub const SUMMARY_JSON: &str = "harvest_summary.json";
pub const REPORT_BUNDLE: &str = "harvest_report.zip";

const SAVINGS_HEADER: [&str; 2] = ["Year", "Cumulative Savings"];

/// `Year,Cumulative Savings` 表格：第一列為標題，之後每年一列
pub fn write_savings_csv(points: &[YearlySavings]) -> Result<Vec<u8>> {
    // 手動寫標頭，確保沒有資料列時也有標頭
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(SAVINGS_HEADER)?;
    for point in points {
        writer.serialize(point)?;
    }
    writer
        .into_inner()
        .map_err(|e| HarvestError::IoError(e.into_error()))
}

pub fn read_savings_csv(data: &[u8]) -> Result<Vec<YearlySavings>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(data);

    let headers = reader.headers()?.clone();
    if headers.iter().ne(SAVINGS_HEADER.iter().copied()) {
        return Err(HarvestError::CsvError(csv::Error::from(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("unexpected savings header: {:?}", headers),
        ))));
    }

    let mut points = Vec::new();
    for row in reader.deserialize() {
        points.push(row?);
    }
    Ok(points)
}

pub fn write_summary_json(report: &HarvestReport) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(report)?)
}

/// 依傳入順序把檔案打包成一個 ZIP
pub fn bundle_zip(files: &[(&str, Vec<u8>)]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for (name, data) in files {
        zip.start_file::<_, ()>(*name, FileOptions::default())?;
        zip.write_all(data)?;
    }
    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}
