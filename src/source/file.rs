use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use super::{DeviceSnapshot, PunchSource, SourceError};

/// Reads the JSON export the terminal sync job drops on disk.
#[derive(Debug, Clone)]
pub struct FilePunchSource {
    path: PathBuf,
}

impl FilePunchSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PunchSource for FilePunchSource {
    #[instrument(name = "punch_source_file", skip(self), fields(path = %self.path.display()))]
    async fn fetch(&self) -> Result<Arc<DeviceSnapshot>, SourceError> {
        let path = self.path.display().to_string();
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| SourceError::Io { path: path.clone(), source })?;

        let snapshot: DeviceSnapshot =
            serde_json::from_slice(&bytes).map_err(|source| SourceError::Decode { path, source })?;

        debug!(
            users = snapshot.users.len(),
            punches = snapshot.attendance.len(),
            "Loaded terminal snapshot"
        );
        Ok(Arc::new(snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn reads_terminal_export() {
        let file = temp_file(
            r#"{
                "users": [{"user_id": "7", "name": "Nadia"}],
                "attendance": [
                    {"user_id": "7", "timestamp": "2024-05-06 08:55:00", "punch": 0},
                    {"user_id": "7", "timestamp": "2024-05-06 18:30:00", "punch": 1}
                ]
            }"#,
        );

        let snapshot = FilePunchSource::new(file.path()).fetch().await.unwrap();
        assert_eq!(snapshot.users.len(), 1);
        assert_eq!(snapshot.attendance.len(), 2);
        assert_eq!(snapshot.attendance[1].punch, 1);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let source = FilePunchSource::new("/nonexistent/punchclock/export.json");
        assert!(matches!(source.fetch().await, Err(SourceError::Io { .. })));
    }

    #[tokio::test]
    async fn garbage_is_decode_error() {
        let file = temp_file("not json at all");
        let result = FilePunchSource::new(file.path()).fetch().await;
        assert!(matches!(result, Err(SourceError::Decode { .. })));
    }

    #[tokio::test]
    async fn unavailable_source_is_no_data() {
        let source = FilePunchSource::new("/nonexistent/punchclock/export.json");
        let result = crate::source::fetch_snapshot(&source).await;
        assert!(matches!(result, Err(crate::error::AttendanceError::NoData(_))));
    }
}
