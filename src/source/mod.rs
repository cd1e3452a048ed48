pub mod cache;
pub mod file;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use crate::error::AttendanceError;
use crate::model::punch::RawPunch;
use crate::model::roster::RawUser;

pub use cache::CachedPunchSource;
pub use file::FilePunchSource;

/// Roster and punch log as read from the terminal in one go.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DeviceSnapshot {
    #[serde(default)]
    pub users: Vec<RawUser>,
    #[serde(default)]
    pub attendance: Vec<RawPunch>,
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read punch log {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("punch log {path} is not a valid terminal export: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Shared(Arc<SourceError>),
}

#[async_trait]
pub trait PunchSource: Send + Sync {
    async fn fetch(&self) -> Result<Arc<DeviceSnapshot>, SourceError>;
}

/// Fetches a snapshot, folding terminal failures into `NoData` so that an
/// unreachable device is never reported as a day without attendance.
pub async fn fetch_snapshot(source: &dyn PunchSource) -> Result<Arc<DeviceSnapshot>, AttendanceError> {
    source.fetch().await.map_err(|e| {
        error!(error = %e, "Punch source unavailable");
        AttendanceError::no_data("terminal (punch source unavailable)")
    })
}
