use crate::core::Storage;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// 報表輸出目錄；所有檔名都相對於這個目錄
#[derive(Debug, Clone)]
pub struct LocalStorage {
    output_dir: PathBuf,
}

impl LocalStorage {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, name: &str, data: &[u8]) -> Result<()> {
        let target = self.output_dir.join(name);
        if let Some(dir) = target.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }

        tracing::debug!("Saving {} ({} bytes)", target.display(), data.len());
        tokio::fs::write(&target, data).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::HarvestError;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_missing_directories() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("reports").join("2023");
        let storage = LocalStorage::new(&base);

        tokio_test::block_on(storage.write_file("cumulative_savings.csv", b"Year\n")).unwrap();

        assert_eq!(storage.output_dir(), base.as_path());
        assert_eq!(
            std::fs::read(base.join("cumulative_savings.csv")).unwrap(),
            b"Year\n"
        );
    }

    #[test]
    fn test_write_overwrites_previous_report() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        tokio_test::block_on(storage.write_file("harvest_summary.json", b"{\"old\":1}")).unwrap();
        tokio_test::block_on(storage.write_file("harvest_summary.json", b"{}")).unwrap();

        assert_eq!(
            std::fs::read(temp_dir.path().join("harvest_summary.json")).unwrap(),
            b"{}"
        );
    }

    #[test]
    fn test_write_into_a_file_path_fails() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("output");
        std::fs::write(&blocker, b"not a directory").unwrap();
        let storage = LocalStorage::new(&blocker);

        let result = tokio_test::block_on(storage.write_file("cumulative_savings.csv", b"Year\n"));

        assert!(matches!(result, Err(HarvestError::IoError(_))));
    }
}
